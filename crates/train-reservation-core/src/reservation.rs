use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Expected outcomes of a reservation that is not carried out
#[derive(Clone, Copy, PartialEq, Eq, Hash, Error, Debug)]
pub enum ReservationError {
    /// Train id, booking reference, or seat list missing
    #[error("invalid reservation")]
    InvalidRequest,
    /// No train with the requested id exists
    #[error("train not found")]
    TrainNotFound,
    /// At least one requested seat is already booked, possibly by the same
    /// request naming a seat twice
    #[error("seat already reserved")]
    SeatAlreadyReserved,
}

/// Request to book seats of a train under one booking reference
///
/// Seats are booked in the given order. The list may name a seat more than
/// once; such a request conflicts with itself.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Reservation {
    /// Id of the train
    #[serde(default)]
    pub train_id: String,
    /// Reference stored on every booked seat
    #[serde(default)]
    pub booking_reference: String,
    /// Ids of the seats to book
    #[serde(default)]
    pub seats: Vec<String>,
}

impl Reservation {
    /// Create a new [`Reservation`]
    pub fn new<I, S>(
        train_id: impl Into<String>,
        booking_reference: impl Into<String>,
        seats: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            train_id: train_id.into(),
            booking_reference: booking_reference.into(),
            seats: seats.into_iter().map(Into::into).collect(),
        }
    }

    /// Check that all required fields are present
    ///
    /// Duplicate seats are accepted here; they are rejected as a conflict
    /// when the reservation is applied.
    pub fn validate(&self) -> Result<(), ReservationError> {
        if self.train_id.is_empty() || self.booking_reference.is_empty() || self.seats.is_empty()
        {
            return Err(ReservationError::InvalidRequest);
        }
        Ok(())
    }
}
