//! 🏗 Infrastructure shared by the train reservation services: the train
//! model, reservation requests, and the plumbing for handling requests.
#![warn(missing_docs)]

mod model;
mod request;
mod reservation;
mod service;

use std::path::PathBuf;

pub use model::{Seat, Seats, Train, Trains};
pub use request::{RawRequest, Request, RequestHandler, RequestKind, RequestMethod};
pub use reservation::{Reservation, ReservationError};
pub use service::{TrainReservationsResetter, TrainSeatsReserver, TrainService, TrainsSupplier};

/// Starting point of the booking reference counter if none is configured
pub const DEFAULT_STARTING_POINT: u64 = 12_345_678;

/// The service a process exposes
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Service {
    /// Train data and seat reservations
    TrainData,
    /// Monotonic booking reference generator
    BookingReference,
}

impl Service {
    /// Port the service listens on unless told otherwise
    pub fn default_port(self) -> u16 {
        match self {
            Service::TrainData => 8080,
            Service::BookingReference => 8082,
        }
    }
}

impl std::str::FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train-data" => Ok(Service::TrainData),
            "booking-reference" => Ok(Service::BookingReference),
            other => Err(format!("unknown service `{other}`")),
        }
    }
}

/// Configuration of the train reservation services
#[derive(Clone, Debug)]
pub struct Config {
    /// Which service to run
    pub service: Service,
    /// Value the booking reference counter starts from (exclusive)
    pub starting_point: u64,
    /// Load the trains from this JSON file instead of the built-in data
    pub train_data: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: Service::TrainData,
            starting_point: DEFAULT_STARTING_POINT,
            train_data: None,
        }
    }
}
