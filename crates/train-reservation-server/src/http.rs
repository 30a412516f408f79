//! 🏗 HTTP request implementation

use std::io;
use std::io::Read;

use tiny_http::{Header, Response};
use train_reservation_core::{RequestKind, Service};
use uuid::Uuid;

struct HTTPRequest(tiny_http::Request);

impl train_reservation_core::RawRequest for HTTPRequest {
    fn url(&self) -> &str {
        self.0.url()
    }

    fn method(&self) -> train_reservation_core::RequestMethod {
        match self.0.method() {
            tiny_http::Method::Post => train_reservation_core::RequestMethod::Post,
            _ => train_reservation_core::RequestMethod::Get,
        }
    }

    fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.0.body_length().unwrap_or(0));
        self.0.as_reader().read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn respond_with_json(self: Box<Self>, status: u16, json: String, id: Uuid) {
        let mut res = Response::from_string(json).with_status_code(status);
        add_header(&mut res, b"Content-Type", b"application/json");
        self.respond(res, id)
    }

    fn respond_with_status(self: Box<Self>, status: u16, id: Uuid) {
        self.respond(Response::empty(status), id)
    }
}

impl HTTPRequest {
    /// Add the X-Request-Id header to `res` and send it
    fn respond<R: Read>(self, mut res: Response<R>, id: Uuid) {
        add_header(&mut res, b"X-Request-Id", id.hyphenated().to_string().as_bytes());
        send(self.0, res);
    }
}

/// Parse the given HTTP request for `service`
///
/// If [`None`] is returned, the request was already answered with a
/// corresponding error message.
pub fn parse(rq: tiny_http::Request, service: Service) -> Option<train_reservation_core::Request> {
    use tiny_http::Method::*;

    let method = match rq.method() {
        Get => train_reservation_core::RequestMethod::Get,
        Post => train_reservation_core::RequestMethod::Post,
        _ => {
            send(rq, Response::empty(405));
            return None;
        }
    };

    let Some(kind) = RequestKind::route(service, method, rq.url()) else {
        tracing::debug!(method = %rq.method(), url = rq.url(), "no such route");
        let res = Response::from_string(
            "🚂 could not find the service you are looking for!

Valid requests are:
  GET  /data_for_train/{trainID}
  POST /reserve
  POST /reset",
        )
        .with_status_code(404);
        send(rq, res);
        return None;
    };

    Some(train_reservation_core::Request::from_raw(
        kind,
        Uuid::new_v4(),
        Box::new(HTTPRequest(rq)),
    ))
}

fn add_header<R: Read>(res: &mut Response<R>, field: &[u8], value: &[u8]) {
    if let Ok(header) = Header::from_bytes(field, value) {
        res.add_header(header);
    }
}

fn send<R: Read>(rq: tiny_http::Request, res: Response<R>) {
    if let Err(err) = rq.respond(res) {
        tracing::warn!(%err, "Not able to send response.");
    }
}
