//! Places pagination tests
//!
//! Cooldown, page cap and partial-failure behavior of the pager. Time is
//! paused so the mandatory 2 s cooldown elapses instantly but measurably.

mod common;

use std::sync::Arc;
use std::time::Duration;

use beach_finder_backend::services::PlacesPager;
use beach_finder_backend::AppError;
use common::{place, FakePlaces};
use shared::Coordinates;
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;

const COOLDOWN: Duration = Duration::from_millis(2000);

fn brighton() -> Coordinates {
    Coordinates::from_f64(50.8225, -0.1372).unwrap()
}

// ============================================================================
// Cooldown
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_cooldown_elapses_before_every_follow_up_page() {
    let source = Arc::new(FakePlaces::new(vec![
        Ok(vec![place("a", 50.81, -0.13)]),
        Ok(vec![place("b", 50.82, -0.12)]),
        Ok(vec![place("c", 50.83, -0.11)]),
    ]));
    let pager = PlacesPager::new(source.clone(), 3, COOLDOWN);

    let result = pager
        .fetch(&brighton(), 5000, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.pages, 3);
    let times = source.call_times();
    assert_eq!(times.len(), 3);
    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] >= COOLDOWN, "follow-up page issued before cooldown");
    }
}

#[tokio::test(start_paused = true)]
async fn test_single_page_has_no_cooldown() {
    let source = Arc::new(FakePlaces::new(vec![Ok(vec![place("a", 50.81, -0.13)])]));
    let pager = PlacesPager::new(source.clone(), 3, COOLDOWN);

    let start = tokio::time::Instant::now();
    let result = pager
        .fetch(&brighton(), 5000, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.pages, 1);
    assert!(tokio::time::Instant::now() - start < COOLDOWN);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_cooldown_stops_paging() {
    let source = Arc::new(FakePlaces::endless(vec![place("a", 50.81, -0.13)]));
    let pager = PlacesPager::new(source.clone(), 3, COOLDOWN);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        trigger.cancel();
    });

    let err = pager.fetch(&brighton(), 5000, &cancel).await.unwrap_err();
    assert!(matches!(err, AppError::Superseded));
    assert_eq!(source.call_count(), 1);
}

// ============================================================================
// Page cap
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_page_cap_is_never_exceeded() {
    for cap in 1..=4 {
        let source = Arc::new(FakePlaces::endless(vec![place("a", 50.81, -0.13)]));
        let pager = PlacesPager::new(source.clone(), cap, COOLDOWN);

        let result = pager
            .fetch(&brighton(), 5000, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.pages, cap);
        assert_eq!(source.call_count(), cap as usize);
        assert_eq!(result.places.len(), cap as usize);
    }
}

#[tokio::test(start_paused = true)]
async fn test_pages_concatenate_in_provider_order_without_dedup() {
    let source = Arc::new(FakePlaces::new(vec![
        Ok(vec![place("a", 50.81, -0.13), place("b", 50.82, -0.12)]),
        Ok(vec![place("a", 50.81, -0.13), place("c", 50.83, -0.11)]),
    ]));
    let pager = PlacesPager::new(source, 3, COOLDOWN);

    let result = pager
        .fetch(&brighton(), 5000, &CancellationToken::new())
        .await
        .unwrap();

    let ids: Vec<_> = result.places.iter().map(|p| p.place_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "a", "c"]);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_first_page_failure_is_an_error() {
    let source = Arc::new(FakePlaces::new(vec![Err("connection reset".to_string())]));
    let pager = PlacesPager::new(source, 3, COOLDOWN);

    let err = pager
        .fetch(&brighton(), 5000, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)));
}

#[tokio::test(start_paused = true)]
async fn test_later_page_failure_keeps_earlier_pages() {
    let source = Arc::new(FakePlaces::new(vec![
        Ok(vec![place("a", 50.81, -0.13), place("b", 50.82, -0.12)]),
        Err("INVALID_REQUEST".to_string()),
        Ok(vec![place("c", 50.83, -0.11)]),
    ]));
    let pager = PlacesPager::new(source.clone(), 3, COOLDOWN);

    let result = assert_ok!(pager.fetch(&brighton(), 5000, &CancellationToken::new()).await);

    assert_eq!(result.pages, 1);
    assert!(result.truncated);
    assert_eq!(result.places.len(), 2);
    assert_eq!(source.call_count(), 2);
}

#[tokio::test]
async fn test_invalid_radius_makes_no_request() {
    let source = Arc::new(FakePlaces::new(vec![Ok(vec![])]));
    let pager = PlacesPager::new(source.clone(), 3, COOLDOWN);

    let err = assert_err!(pager.fetch(&brighton(), 60_000, &CancellationToken::new()).await);
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(source.call_count(), 0);
}
