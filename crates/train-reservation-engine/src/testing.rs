//! Raw requests recording their response, for handler tests

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use train_reservation_core::{RawRequest, Request, RequestKind, RequestMethod};
use uuid::Uuid;

#[derive(Debug)]
pub struct Captured {
    pub status: u16,
    pub body: String,
}

pub struct Slot(Arc<Mutex<Option<Captured>>>);

impl Slot {
    pub fn take(&self) -> Captured {
        self.0.lock().take().expect("handler did not respond")
    }
}

struct CapturingRequest {
    url: String,
    body: Option<String>,
    kind: RequestKind,
    slot: Arc<Mutex<Option<Captured>>>,
}

impl Captured {
    pub fn request(kind: RequestKind, url: &str, body: &str) -> (Request, Slot) {
        let slot = Arc::new(Mutex::new(None));
        let raw = CapturingRequest {
            url: url.into(),
            body: Some(body.into()),
            kind,
            slot: slot.clone(),
        };
        (
            Request::from_raw(kind, Uuid::new_v4(), Box::new(raw)),
            Slot(slot),
        )
    }
}

impl RawRequest for CapturingRequest {
    fn url(&self) -> &str {
        &self.url
    }

    fn method(&self) -> RequestMethod {
        match self.kind {
            RequestKind::DataForTrain | RequestKind::BookingReference => RequestMethod::Get,
            RequestKind::Reserve | RequestKind::Reset => RequestMethod::Post,
        }
    }

    fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
        Ok(self.body.take().unwrap_or_default().into_bytes())
    }

    fn respond_with_json(self: Box<Self>, status: u16, body: String, _: Uuid) {
        *self.slot.lock() = Some(Captured { status, body });
    }

    fn respond_with_status(self: Box<Self>, status: u16, _: Uuid) {
        *self.slot.lock() = Some(Captured {
            status,
            body: String::new(),
        });
    }
}
