use train_reservation_core::{Seat, Train, Trains};

/// Checks that no seat of any train is booked.
#[allow(unused)]
pub fn assert_all_free(trains: &Trains) {
    for (train_id, train) in trains {
        for (seat_id, seat) in &train.seats {
            assert!(
                !seat.is_booked(),
                "Seat {seat_id} of {train_id} must be free, but is held by {}.",
                seat.booking_reference,
            );
        }
    }
}

/// Builds a train with `coaches` coaches of `seats` seats each, all free.
#[allow(unused)]
pub fn train(coaches: &str, seats: u32) -> Train {
    Train::from_seats(coaches.chars().flat_map(|coach| {
        (1..=seats).map(move |n| (format!("{n}{coach}"), Seat::new(coach, n.to_string())))
    }))
}
