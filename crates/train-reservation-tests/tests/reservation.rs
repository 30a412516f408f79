use eyre::Result;
use train_reservation_core::{RequestMethod, Reservation, Seat};
use train_reservation_tests::TestCtxBuilder;
use util::assert_all_free;

mod util;

fn express_request() -> Reservation {
    Reservation::new("express_2000", "75bcd15", ["1A", "1B"])
}

#[tokio::test] // Every test function needs to be decorated with this attribute
#[ntest::timeout(10_000)] // Test timeout in ms
async fn test_reserve_free_seats() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;

    let response = ctx.api.reserve(&express_request()).await?;
    assert!(response.request_id.is_some(), "Every response carries a request id.");
    let train = response.result?;

    let mut booked = Seat::new("A", "1");
    booked.booking_reference = "75bcd15".into();
    assert_eq!(train.seats["1A"], booked);
    assert_eq!(train.seats["1B"].booking_reference, "75bcd15");
    assert_eq!(train.seats["1B"].coach, "B");
    assert_eq!(train.seats["2A"], Seat::new("A", "2"));

    // Booked seats must be visible to later lookups.
    let looked_up = ctx.api.data_for_train("express_2000").await?.result?;
    assert_eq!(looked_up, train);

    ctx.finish().await;
    Ok(())
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_repeated_reservation_conflicts() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;

    let first = ctx.api.reserve(&express_request()).await?.result?;
    let second = ctx.api.reserve(&express_request()).await?;
    assert_eq!(second.status(), 409, "Booking the same seats twice must conflict.");

    let after = ctx.api.data_for_train("express_2000").await?.result?;
    assert_eq!(after, first, "A conflict must neither revert nor repeat the booking.");

    ctx.finish().await;
    Ok(())
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_partial_conflict_books_nothing() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;

    let taken = Reservation::new("express_2000", "first", ["2A"]);
    ctx.api.reserve(&taken).await?.result?;

    let overlapping = Reservation::new("express_2000", "second", ["1A", "1B", "2A", "3A"]);
    assert_eq!(ctx.api.reserve(&overlapping).await?.status(), 409);

    let train = ctx.api.data_for_train("express_2000").await?.result?;
    for (seat_id, seat) in &train.seats {
        let expected = if seat_id == "2A" { "first" } else { "" };
        assert_eq!(seat.booking_reference, expected, "seat {seat_id}");
    }

    ctx.finish().await;
    Ok(())
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_duplicate_seat_conflicts_with_itself() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;

    let res = Reservation::new("express_2000", "1234", ["1A", "1A"]);
    assert_eq!(ctx.api.reserve(&res).await?.status(), 409);

    let train = ctx.api.data_for_train("express_2000").await?.result?;
    assert!(!train.seats["1A"].is_booked(), "A self-conflict must not book the seat.");
    assert!(train.seats.values().all(|seat| !seat.is_booked()));

    ctx.finish().await;
    Ok(())
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_unknown_train() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;

    let res = Reservation::new("not_known", "75bcd15", ["1A", "1B"]);
    let response = ctx.api.reserve(&res).await?;
    assert_eq!(response.status(), 404);
    assert!(matches!(&response.result, Err(err) if err.body.is_empty()));

    assert_eq!(ctx.api.data_for_train("not_known").await?.status(), 404);

    ctx.finish().await;
    Ok(())
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_invalid_requests() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;

    for body in [
        "",
        "[]",
        r#"{"train_id": "express_2000", "seats": ["1A"]}"#,
        r#"{"train_id": "express_2000", "seats": [], "booking_reference": "75bcd15"}"#,
        r#"{"seats": ["1A"], "booking_reference": "75bcd15"}"#,
    ] {
        let response = ctx.api.reserve_raw(body).await?;
        assert_eq!(response.status(), 400, "body: {body}");
    }

    let train = ctx.api.data_for_train("express_2000").await?.result?;
    assert!(train.seats.values().all(|seat| !seat.is_booked()));

    ctx.finish().await;
    Ok(())
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_reset_is_idempotent() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;

    ctx.api.reserve(&express_request()).await?.result?;
    ctx.api
        .reserve(&Reservation::new("local_1000", "abc", ["1C", "2C"]))
        .await?
        .result?;

    let once = ctx.api.reset().await?.result?;
    assert_eq!(once.len(), 2);
    assert_all_free(&once);

    let twice = ctx.api.reset().await?.result?;
    assert_eq!(once, twice);

    let train = ctx.api.data_for_train("local_1000").await?.result?;
    assert_eq!(train, once["local_1000"]);

    // Seats can be booked again after a reset.
    ctx.api.reserve(&express_request()).await?.result?;

    ctx.finish().await;
    Ok(())
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_unknown_routes() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;

    for (method, url) in [
        (RequestMethod::Get, "/reserve"),
        (RequestMethod::Get, "/trains"),
        (RequestMethod::Post, "/data_for_train/express_2000"),
    ] {
        let response = ctx.api.request(method, url, None).await?;
        assert_eq!(response.status, 404, "{method:?} {url}");
    }

    let response = ctx.api.request(RequestMethod::Get, "/data_for_train/express_2000", None).await?;
    assert_eq!(response.status, 200);
    assert!(response.request_id.is_some());

    ctx.finish().await;
    Ok(())
}
