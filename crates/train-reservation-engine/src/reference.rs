//! Booking reference generator

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use train_reservation_core::{Request, RequestHandler, RequestKind};

/// Hands out unique booking references
///
/// References are the hexadecimal representation of a counter, zero padded
/// to 16 digits. The counter is shared by all threads; references only grow.
#[derive(Debug)]
pub struct ReferenceGenerator {
    counter: AtomicU64,
}

impl ReferenceGenerator {
    /// Create a new [`ReferenceGenerator`]
    ///
    /// The first reference is `starting_point + 1`.
    pub fn new(starting_point: u64) -> Self {
        Self {
            counter: AtomicU64::new(starting_point),
        }
    }

    /// Draw the next booking reference
    pub fn next_reference(&self) -> String {
        let value = self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        format!("{value:016x}")
    }
}

#[derive(Serialize)]
struct ReferenceResponse {
    value: String,
}

/// Request handler of the booking reference service
///
/// Every request is answered with a fresh reference, whatever its path.
pub struct ReferenceHandler {
    generator: ReferenceGenerator,
}

impl ReferenceHandler {
    /// Create a new [`ReferenceHandler`]
    pub fn new(generator: ReferenceGenerator) -> Self {
        Self { generator }
    }
}

impl RequestHandler for ReferenceHandler {
    fn handle(&self, rq: Request) {
        if *rq.kind() != RequestKind::BookingReference {
            rq.respond_with_status(404);
            return;
        }

        let response = ReferenceResponse {
            value: self.generator.next_reference(),
        };
        match serde_json::to_string(&response) {
            Ok(json) => {
                tracing::debug!(request = %rq.id(), reference = %response.value, "handed out reference");
                rq.respond_with_json(json);
            }
            Err(err) => {
                tracing::warn!(request = %rq.id(), %err, "Not able to convert to json.");
                rq.respond_with_status(500);
            }
        }
    }
}
