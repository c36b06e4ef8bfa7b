use std::time::Duration;

use calgen_core::CalGenError;
use calgen_core::delete::Deleter;
use calgen_core::fakes::{Failure, MemoryCalendarStore};
use calgen_core::generate::{MemorialParams, memorial};
use calgen_core::progress::BatchStatus;
use calgen_core::register::Registrar;
use chrono::NaiveDate;

const CAL: &str = "memorial@group.calendar.google.com";
const PACING: Duration = Duration::from_millis(100);

async fn seeded_store() -> MemoryCalendarStore {
    let store = MemoryCalendarStore::with_calendar(CAL);
    let events = memorial::generate(&MemorialParams::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ))
    .unwrap();
    Registrar::new(&store, Duration::ZERO)
        .register_all(CAL, &events)
        .await;
    store
}

#[tokio::test(start_paused = true)]
async fn deletes_everything_across_all_time() {
    let store = seeded_store().await;
    // the fifty-year observance lands in 2073
    assert_eq!(store.events(CAL).len(), 19);

    let result = Deleter::new(&store, PACING).delete_all(CAL).await.unwrap();

    assert_eq!(result.status, BatchStatus::Completed);
    assert_eq!(result.total_count, 19);
    assert_eq!(result.deleted_count, 19);
    assert!(store.events(CAL).is_empty());
}

#[tokio::test(start_paused = true)]
async fn one_failed_delete_does_not_stop_the_rest() {
    let store = seeded_store().await;
    let listed = Deleter::new(&store, PACING).list_all(CAL).await.unwrap();
    store.fail_delete(&listed[0].id, Failure::Other("rate limited".into()));

    let result = Deleter::new(&store, PACING).delete_all(CAL).await.unwrap();

    assert_eq!(result.status, BatchStatus::Completed);
    assert_eq!(result.deleted_count, 18);
    assert_eq!(result.failed_count(), 1);
    assert_eq!(store.delete_calls(), 19);
    assert_eq!(store.events(CAL).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn auth_failure_stops_deletion() {
    let store = seeded_store().await;
    let listed = Deleter::new(&store, PACING).list_all(CAL).await.unwrap();
    store.fail_delete(&listed[4].id, Failure::AuthExpired);

    let result = Deleter::new(&store, PACING).delete_all(CAL).await.unwrap();

    assert_eq!(result.status, BatchStatus::AuthExpired);
    assert_eq!(result.deleted_count, 4);
    assert_eq!(store.delete_calls(), 5);
}

#[tokio::test(start_paused = true)]
async fn listing_failure_is_an_error() {
    let store = seeded_store().await;
    store.fail_list(Failure::AuthExpired);

    let result = Deleter::new(&store, PACING).delete_all(CAL).await;

    assert!(matches!(result, Err(CalGenError::AuthExpired(_))));
    assert_eq!(store.delete_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn unknown_calendar_is_not_found() {
    let store = MemoryCalendarStore::new();
    let result = Deleter::new(&store, PACING).delete_all("missing").await;
    assert!(matches!(result, Err(CalGenError::CalendarNotFound(_))));
}
