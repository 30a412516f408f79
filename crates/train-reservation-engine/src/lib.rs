//! :steam_locomotive: Implementation of the train reservation services.
//!
//! The [engine] owns all trains and carries out reservations. The
//! [train data handler][train_data] exposes it to clients, while the
//! [reference] module implements the booking reference service.
//!
//! [`launch()`] assembles the request handler for a configured service.

#![allow(rustdoc::private_intra_doc_links)]
#![warn(missing_docs)]

use train_reservation_core::{Config, Request, RequestHandler, Service};

mod engine;
mod reference;
mod train_data;
mod trains;

#[cfg(test)]
mod testing;

pub use engine::ReservationEngine;
pub use reference::{ReferenceGenerator, ReferenceHandler};
pub use train_data::{status_of, TrainDataHandler};
pub use trains::{DataError, DEFAULT_TRAINS};

/// Request handler of one of the services
pub enum Dispatcher {
    /// Train data and seat reservations
    TrainData(TrainDataHandler<ReservationEngine>),
    /// Booking references
    BookingReference(ReferenceHandler),
}

impl RequestHandler for Dispatcher {
    fn handle(&self, request: Request) {
        match self {
            Dispatcher::TrainData(handler) => handler.handle(request),
            Dispatcher::BookingReference(handler) => handler.handle(request),
        }
    }
}

/// Entrypoint of the services
///
/// Builds the request handler for the service selected in `config`. Fails if
/// the train data cannot be loaded.
pub fn launch(config: &Config) -> Result<Dispatcher, DataError> {
    match config.service {
        Service::TrainData => {
            let engine = match &config.train_data {
                Some(path) => ReservationEngine::from_json(&trains::read(path)?)?,
                None => ReservationEngine::with_default_trains()?,
            };
            Ok(Dispatcher::TrainData(TrainDataHandler::new(engine)))
        }
        Service::BookingReference => {
            tracing::info!(
                starting_point = config.starting_point,
                "booking references start after the starting point"
            );
            let generator = ReferenceGenerator::new(config.starting_point);
            Ok(Dispatcher::BookingReference(ReferenceHandler::new(generator)))
        }
    }
}
