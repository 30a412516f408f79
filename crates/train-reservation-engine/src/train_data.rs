//! Request handler of the train data service

use serde::Serialize;
use train_reservation_core::{
    Request, RequestHandler, RequestKind, Reservation, ReservationError, TrainService,
};

/// Translates requests into calls of a [`TrainService`] and its outcomes into
/// responses
///
/// | outcome                                      | status |
/// |----------------------------------------------|--------|
/// | body not a reservation, or fields missing    | 400    |
/// | unknown train                                | 404    |
/// | seat already reserved                        | 409    |
/// | success                                      | 200    |
pub struct TrainDataHandler<S> {
    service: S,
}

impl<S: TrainService> TrainDataHandler<S> {
    /// Create a new [`TrainDataHandler`]
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// The service requests are forwarded to
    pub fn service(&self) -> &S {
        &self.service
    }

    fn data_for_train(&self, rq: Request) {
        let train = rq.train_id().and_then(|id| self.service.train_by_id(id));
        match train {
            Some(train) => respond_encoded(rq, &train),
            None => {
                tracing::info!(url = rq.url(), "train not found");
                rq.respond_with_status(404);
            }
        }
    }

    fn reserve(&self, mut rq: Request) {
        let reservation = match rq.read_bytes() {
            Ok(body) => serde_json::from_slice::<Reservation>(&body),
            Err(err) => {
                tracing::warn!(%err, "could not read reservation");
                rq.respond_with_status(400);
                return;
            }
        };
        let reservation = match reservation {
            Ok(reservation) => reservation,
            Err(err) => {
                tracing::debug!(%err, "malformed reservation");
                rq.respond_with_status(400);
                return;
            }
        };

        let outcome = reservation
            .validate()
            .and_then(|()| self.service.reserve_seats(&reservation));
        match outcome {
            Ok(train) => {
                tracing::info!(
                    train = %reservation.train_id,
                    booking_reference = %reservation.booking_reference,
                    seats = ?reservation.seats,
                    "seats reserved"
                );
                respond_encoded(rq, &train);
            }
            Err(err) => {
                tracing::info!(train = %reservation.train_id, %err, "reservation rejected");
                rq.respond_with_status(status_of(err));
            }
        }
    }

    fn reset(&self, rq: Request) {
        // The snapshot is taken after the reset under its own lock; a
        // reservation landing in between shows up in the response.
        self.service.reset_all_reservations();
        tracing::info!("all reservations reset");
        respond_encoded(rq, &self.service.trains());
    }
}

impl<S: TrainService> RequestHandler for TrainDataHandler<S> {
    fn handle(&self, rq: Request) {
        let span = tracing::debug_span!("request", id = %rq.id(), kind = ?rq.kind());
        let _guard = span.enter();
        tracing::debug!(method = ?rq.method(), url = rq.url(), "handling request");

        match rq.kind() {
            RequestKind::DataForTrain => self.data_for_train(rq),
            RequestKind::Reserve => self.reserve(rq),
            RequestKind::Reset => self.reset(rq),
            RequestKind::BookingReference => rq.respond_with_status(404),
        }
    }
}

/// HTTP status reported for a rejected reservation
pub fn status_of(err: ReservationError) -> u16 {
    match err {
        ReservationError::InvalidRequest => 400,
        ReservationError::TrainNotFound => 404,
        ReservationError::SeatAlreadyReserved => 409,
    }
}

fn respond_encoded<T: Serialize>(rq: Request, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => rq.respond_with_json(json),
        Err(err) => {
            tracing::error!(%err, "could not encode response");
            rq.respond_with_status(500);
        }
    }
}
