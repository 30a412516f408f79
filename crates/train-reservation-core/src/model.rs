//! Trains and their seats

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// All trains, keyed by train id
pub type Trains = BTreeMap<String, Train>;

/// Seats of a train, keyed by seat id (e.g. `1A`)
pub type Seats = BTreeMap<String, Seat>;

/// A single seat
///
/// An empty booking reference means the seat is free.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Seat {
    /// Coach the seat is in
    #[serde(default)]
    pub coach: String,
    /// Number of the seat within its coach
    #[serde(default)]
    pub seat_number: String,
    /// Reference of the booking holding this seat
    #[serde(default)]
    pub booking_reference: String,
}

impl Seat {
    /// Create a free seat
    pub fn new(coach: impl Into<String>, seat_number: impl Into<String>) -> Self {
        Self {
            coach: coach.into(),
            seat_number: seat_number.into(),
            booking_reference: String::new(),
        }
    }

    /// Whether some booking already holds this seat
    #[inline]
    pub fn is_booked(&self) -> bool {
        !self.booking_reference.is_empty()
    }
}

/// A train with its seats
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Train {
    /// Seats by seat id
    #[serde(default)]
    pub seats: Seats,
}

impl Train {
    /// Create a train from `(seat id, seat)` pairs
    pub fn from_seats<I, K>(seats: I) -> Self
    where
        I: IntoIterator<Item = (K, Seat)>,
        K: Into<String>,
    {
        Self {
            seats: seats.into_iter().map(|(id, seat)| (id.into(), seat)).collect(),
        }
    }

    /// Release every seat of this train
    pub fn clear_reservations(&mut self) {
        for seat in self.seats.values_mut() {
            seat.booking_reference.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_wire_format() {
        let mut seat = Seat::new("A", "1");
        seat.booking_reference = "75bcd15".into();
        let json = serde_json::to_value(&seat).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"coach": "A", "seat_number": "1", "booking_reference": "75bcd15"})
        );
    }

    #[test]
    fn missing_booking_reference_means_free() {
        let seat: Seat = serde_json::from_str(r#"{"coach": "B", "seat_number": "3"}"#).unwrap();
        assert!(!seat.is_booked());
    }

    #[test]
    fn missing_coach_and_number_decode_empty() {
        let seat: Seat = serde_json::from_str(r#"{"seat_number": "3"}"#).unwrap();
        assert_eq!(seat, Seat::new("", "3"));

        let seat: Seat = serde_json::from_str("{}").unwrap();
        assert_eq!(seat, Seat::default());
    }

    #[test]
    fn registry_decodes_nested_maps() {
        let trains: Trains = serde_json::from_str(
            r#"{"express_2000": {"seats": {"1A": {"coach": "A", "seat_number": "1", "booking_reference": ""}}}}"#,
        )
        .unwrap();
        assert_eq!(trains["express_2000"].seats["1A"], Seat::new("A", "1"));
    }

    #[test]
    fn clear_reservations_frees_all_seats() {
        let mut train = Train::from_seats([("1A", Seat::new("A", "1")), ("1B", Seat::new("B", "1"))]);
        for seat in train.seats.values_mut() {
            seat.booking_reference = "abc".into();
        }
        train.clear_reservations();
        assert!(train.seats.values().all(|s| !s.is_booked()));
        assert_eq!(train.seats["1B"].coach, "B");
    }
}
