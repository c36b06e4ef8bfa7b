use std::time::Duration;

use calgen_core::fakes::{Failure, MemoryCalendarStore};
use calgen_core::generate::{AnniversaryParams, Interval, anniversary};
use calgen_core::progress::BatchStatus;
use calgen_core::register::Registrar;
use calgen_core::EventDescriptor;
use chrono::NaiveDate;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const CAL: &str = "family@group.calendar.google.com";
const PACING: Duration = Duration::from_millis(200);

fn events(count: u32) -> Vec<EventDescriptor> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    anniversary::generate(&AnniversaryParams {
        start,
        interval: Interval::Monthly,
        count,
        title_template: None,
        description: None,
    })
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn registers_every_event_in_order() {
    let store = MemoryCalendarStore::with_calendar(CAL);
    let events = events(5);

    let result = Registrar::new(&store, PACING).register_all(CAL, &events).await;

    assert_eq!(result.status, BatchStatus::Completed);
    assert_eq!(result.created_count, 5);
    assert_eq!(result.total_count, 5);
    assert!(result.outcomes.iter().all(|o| o.succeeded && o.external_id.is_some()));
    assert_eq!(store.events(CAL), events);
}

#[tokio::test(start_paused = true)]
async fn generic_failure_is_recorded_and_batch_continues() {
    let store = MemoryCalendarStore::with_calendar(CAL);
    store.fail_create(3, Failure::Other("backend hiccup".into()));

    let result = Registrar::new(&store, PACING).register_all(CAL, &events(5)).await;

    assert_eq!(result.status, BatchStatus::Completed);
    assert_eq!(result.created_count, 4);
    assert_eq!(result.total_count, 5);
    assert_eq!(result.failed_count(), 1);

    let indices: Vec<_> = result.outcomes.iter().map(|o| o.index).collect();
    assert_eq!(indices, [0, 1, 2, 3, 4]);

    let failed = &result.outcomes[3];
    assert!(!failed.succeeded);
    assert!(failed.external_id.is_none());
    assert!(failed.error_message.as_deref().unwrap().contains("backend hiccup"));
}

#[tokio::test(start_paused = true)]
async fn auth_failure_stops_the_batch() {
    let store = MemoryCalendarStore::with_calendar(CAL);
    store.fail_create(2, Failure::AuthExpired);

    let result = Registrar::new(&store, PACING).register_all(CAL, &events(5)).await;

    assert_eq!(result.status, BatchStatus::AuthExpired);
    assert_eq!(store.create_calls(), 3);
    assert_eq!(result.created_count, 2);
    assert_eq!(result.total_count, 5);
    assert_eq!(result.outcomes.len(), 3);
    // created events stay in place
    assert_eq!(store.events(CAL).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn missing_calendar_on_first_item_aborts() {
    let store = MemoryCalendarStore::new();

    let result = Registrar::new(&store, PACING)
        .register_all("nope@group.calendar.google.com", &events(4))
        .await;

    assert_eq!(result.status, BatchStatus::CalendarNotFound);
    assert_eq!(store.create_calls(), 1);
    assert_eq!(result.created_count, 0);
}

#[tokio::test(start_paused = true)]
async fn missing_calendar_mid_batch_is_an_item_failure() {
    let store = MemoryCalendarStore::with_calendar(CAL);
    store.fail_create(1, Failure::NotFound);

    let result = Registrar::new(&store, PACING).register_all(CAL, &events(3)).await;

    assert_eq!(result.status, BatchStatus::Completed);
    assert_eq!(store.create_calls(), 3);
    assert_eq!(result.created_count, 2);
    assert!(!result.outcomes[1].succeeded);
}

#[tokio::test(start_paused = true)]
async fn register_one_is_a_batch_of_one() {
    let store = MemoryCalendarStore::with_calendar(CAL);
    let event = events(1).remove(0);

    let result = Registrar::new(&store, PACING).register_one(CAL, &event).await;

    assert_eq!(result.total_count, 1);
    assert_eq!(result.created_count, 1);
    assert_eq!(result.outcomes[0].index, 0);
}

#[tokio::test(start_paused = true)]
async fn empty_batch_completes_immediately() {
    let store = MemoryCalendarStore::with_calendar(CAL);
    let result = Registrar::new(&store, PACING).register_all(CAL, &[]).await;

    assert_eq!(result.status, BatchStatus::Completed);
    assert_eq!(result.total_count, 0);
    assert_eq!(store.create_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn calls_are_paced() {
    let store = MemoryCalendarStore::with_calendar(CAL);
    let started = tokio::time::Instant::now();

    Registrar::new(&store, PACING).register_all(CAL, &events(4)).await;

    // three gaps between four calls
    assert_eq!(started.elapsed(), PACING * 3);
}

#[tokio::test(start_paused = true)]
async fn progress_is_reported_per_item() {
    let store = MemoryCalendarStore::with_calendar(CAL);
    store.fail_create(1, Failure::Other("boom".into()));
    let events = events(3);
    let (tx, mut rx) = mpsc::unbounded_channel();

    Registrar::new(&store, PACING)
        .with_progress(tx)
        .register_all(CAL, &events)
        .await;

    let mut seen = Vec::new();
    while let Ok(progress) = rx.try_recv() {
        seen.push(progress);
    }

    assert_eq!(seen.len(), 3);
    assert_eq!(
        seen.iter().map(|p| p.completed_count).collect::<Vec<_>>(),
        [1, 2, 3]
    );
    assert!(seen.iter().all(|p| p.total_count == 3));
    assert_eq!(seen[1].most_recent, events[1]);
    assert!(!seen[1].succeeded);
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_before_next_item() {
    let store = MemoryCalendarStore::with_calendar(CAL);
    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let registrar = Registrar::new(&store, PACING)
        .with_progress(tx)
        .with_cancellation(cancel.clone());

    let events = events(10);
    let run = registrar.register_all(CAL, &events);
    tokio::pin!(run);

    // let two items complete, then cancel
    let result = loop {
        tokio::select! {
            result = &mut run => break result,
            Some(progress) = rx.recv() => {
                if progress.completed_count == 2 {
                    cancel.cancel();
                }
            }
        }
    };

    assert_eq!(result.status, BatchStatus::Cancelled);
    assert_eq!(result.created_count, 2);
    assert_eq!(store.events(CAL).len(), 2);
}
