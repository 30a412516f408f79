//! Implementation of the reservation engine holding all trains

use parking_lot::RwLock;
use train_reservation_core::{
    Reservation, ReservationError, Train, TrainReservationsResetter, TrainSeatsReserver, Trains,
    TrainsSupplier,
};

use crate::trains::{self, DataError};

/// Implementation of the reservation engine
///
/// The engine exclusively owns the trains. Callers only ever get copies, so
/// the state can only change through [`Self::reserve_seats()`] and
/// [`Self::reset_all_reservations()`].
pub struct ReservationEngine {
    trains: RwLock<Trains>,
}

impl ReservationEngine {
    /// Create a new [`ReservationEngine`] owning `trains`
    pub fn new(trains: Trains) -> Self {
        tracing::info!(trains = trains.len(), "Loaded a few trains. Choooo, chooo");
        Self {
            trains: RwLock::new(trains),
        }
    }

    /// Create a new [`ReservationEngine`] from JSON encoded trains
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(Self::new(trains::parse(json)?))
    }

    /// Create a new [`ReservationEngine`] with the built-in trains
    pub fn with_default_trains() -> Result<Self, DataError> {
        Self::from_json(trains::DEFAULT_TRAINS)
    }

    /// Get a copy of all trains
    pub fn trains(&self) -> Trains {
        self.trains.read().clone()
    }

    /// Get a copy of the train with id `train_id`
    pub fn train_by_id(&self, train_id: &str) -> Option<Train> {
        self.trains.read().get(train_id).cloned()
    }

    /// Book the seats of `reservation`, all or nothing
    ///
    /// Seats are booked one after another in the requested order on a copy of
    /// the train. The first seat that is already booked aborts the whole
    /// reservation and the copy is dropped. A seat requested twice is booked
    /// by its first occurrence, so its second occurrence conflicts. Seat ids
    /// unknown to the train count as free seats.
    ///
    /// Only when every seat could be booked, the copy replaces the train.
    pub fn reserve_seats(&self, reservation: &Reservation) -> Result<Train, ReservationError> {
        let mut trains = self.trains.write();
        let Some(train) = trains.get_mut(&reservation.train_id) else {
            return Err(ReservationError::TrainNotFound);
        };

        let mut scratch = train.clone();
        for seat_id in &reservation.seats {
            let seat = scratch.seats.entry(seat_id.clone()).or_default();
            if seat.is_booked() {
                tracing::debug!(
                    train = %reservation.train_id,
                    seat = %seat_id,
                    held_by = %seat.booking_reference,
                    "seat already reserved"
                );
                return Err(ReservationError::SeatAlreadyReserved);
            }
            seat.booking_reference.clone_from(&reservation.booking_reference);
        }

        *train = scratch;
        Ok(train.clone())
    }

    /// Release every booking of every train
    pub fn reset_all_reservations(&self) {
        let mut trains = self.trains.write();
        for train in trains.values_mut() {
            train.clear_reservations();
        }
    }
}

impl TrainsSupplier for ReservationEngine {
    fn trains(&self) -> Trains {
        ReservationEngine::trains(self)
    }

    fn train_by_id(&self, train_id: &str) -> Option<Train> {
        ReservationEngine::train_by_id(self, train_id)
    }
}

impl TrainSeatsReserver for ReservationEngine {
    fn reserve_seats(&self, reservation: &Reservation) -> Result<Train, ReservationError> {
        ReservationEngine::reserve_seats(self, reservation)
    }
}

impl TrainReservationsResetter for ReservationEngine {
    fn reset_all_reservations(&self) {
        ReservationEngine::reset_all_reservations(self)
    }
}
