use std::io;

use uuid::Uuid;

use crate::Service;

/// Path prefix of train lookups, followed by the train id
const DATA_FOR_TRAIN_PREFIX: &str = "/data_for_train/";

/// Kind of the request
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum RequestKind {
    /// Retrieve a train with all its seats
    ///
    /// The train id is the last segment of the URL, see
    /// [`Request::train_id()`].
    DataForTrain,

    /// Book seats; the body is a JSON encoded [`Reservation`][crate::Reservation]
    ///
    /// The response contains the train after the booking.
    Reserve,

    /// Release all bookings of all trains
    ///
    /// The response contains all trains after the reset.
    Reset,

    /// Draw a fresh booking reference
    BookingReference,
}

impl RequestKind {
    /// Determine which kind of request `method` and `url` make up for the
    /// given `service`
    ///
    /// Returns [`None`] if the service does not offer such a request.
    pub fn route(service: Service, method: RequestMethod, url: &str) -> Option<Self> {
        let path = url.split('?').next().unwrap_or_default();
        match service {
            Service::BookingReference => Some(RequestKind::BookingReference),
            Service::TrainData => match (method, path) {
                (RequestMethod::Get, p) if p.starts_with(DATA_FOR_TRAIN_PREFIX) => {
                    Some(RequestKind::DataForTrain)
                }
                (RequestMethod::Post, "/reserve") => Some(RequestKind::Reserve),
                (RequestMethod::Post, "/reset") => Some(RequestKind::Reset),
                _ => None,
            },
        }
    }
}

/// Request received by one of the services
///
/// 📌 Handlers primarily interact with instances of this type.
pub struct Request {
    kind: RequestKind,
    id: Uuid,
    raw: Box<dyn RawRequest + Send>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("raw", &format_args!(".."))
            .finish()
    }
}

/// HTTP request method
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum RequestMethod {
    /// GET request
    Get,
    /// POST request, may have a payload
    Post,
}

/// Interface for handling requests
pub trait RequestHandler {
    /// Handle a request
    ///
    /// This method may be called concurrently from different threads.
    fn handle(&self, request: Request);
}

/// A raw request, implemented by the HTTP server
///
/// 📌 Only the transport (and test infrastructure) implements this trait.
pub trait RawRequest {
    /// Get the URL
    fn url(&self) -> &str;
    /// Get the request method
    fn method(&self) -> RequestMethod;

    /// Read the request body as bytes
    fn read_bytes(&mut self) -> io::Result<Vec<u8>>;

    /// Respond with a JSON document
    fn respond_with_json(self: Box<Self>, status: u16, json: String, id: Uuid);
    /// Respond with an empty body
    fn respond_with_status(self: Box<Self>, status: u16, id: Uuid);
}

impl Request {
    /// Get the request's kind
    #[inline]
    pub fn kind(&self) -> &RequestKind {
        &self.kind
    }

    /// Get the request's id
    ///
    /// The id is sent back to the client in the `X-Request-Id` header.
    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the request URL
    #[inline]
    pub fn url(&self) -> &str {
        self.raw.url()
    }

    /// Get the request method
    #[inline]
    pub fn method(&self) -> RequestMethod {
        self.raw.method()
    }

    /// Train id addressed by a [`RequestKind::DataForTrain`] request
    ///
    /// Returns [`None`] for other kinds of requests or an empty id.
    pub fn train_id(&self) -> Option<&str> {
        if self.kind != RequestKind::DataForTrain {
            return None;
        }
        let path = self.url().split('?').next()?;
        path.strip_prefix(DATA_FOR_TRAIN_PREFIX)
            .map(|id| id.trim_end_matches('/'))
            .filter(|id| !id.is_empty())
    }

    /// Read the payload as bytes
    ///
    /// Returns [`Err`] in case of a communication error. This method has side
    /// effects and should be called only once per request.
    #[inline]
    pub fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
        self.raw.read_bytes()
    }

    /// Respond with status 200 and a JSON document
    ///
    /// This method blocks until the response has been sent.
    #[inline]
    pub fn respond_with_json(self, json: impl Into<String>) {
        self.raw.respond_with_json(200, json.into(), self.id);
    }

    /// Respond with the given status code and an empty body
    ///
    /// This method blocks until the response has been sent.
    #[inline]
    pub fn respond_with_status(self, status: u16) {
        self.raw.respond_with_status(status, self.id);
    }

    /// Create a new request from a [`RawRequest`]
    #[inline]
    pub fn from_raw(kind: RequestKind, id: Uuid, raw: Box<dyn RawRequest + Send>) -> Self {
        Self { kind, id, raw }
    }
}
