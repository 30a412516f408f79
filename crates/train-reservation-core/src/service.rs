use crate::{Reservation, ReservationError, Train, Trains};

/// Read access to the trains
pub trait TrainsSupplier {
    /// Snapshot of all trains
    fn trains(&self) -> Trains;

    /// Snapshot of a single train, [`None`] if there is no such train
    fn train_by_id(&self, train_id: &str) -> Option<Train>;
}

/// Booking of seats
pub trait TrainSeatsReserver {
    /// Book all seats of `reservation`, or none of them
    ///
    /// Returns the train as it is after the booking.
    fn reserve_seats(&self, reservation: &Reservation) -> Result<Train, ReservationError>;
}

/// Release of all bookings
pub trait TrainReservationsResetter {
    /// Free every seat of every train
    fn reset_all_reservations(&self);
}

/// Everything the train data transport needs from the reservation engine
///
/// 📌 Implemented for every type providing the three capabilities, so test
/// doubles only need to implement those.
pub trait TrainService:
    TrainsSupplier + TrainSeatsReserver + TrainReservationsResetter + Send + Sync
{
}

impl<T> TrainService for T where
    T: TrainsSupplier + TrainSeatsReserver + TrainReservationsResetter + Send + Sync
{
}
