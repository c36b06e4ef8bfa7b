//! Batch registration: replay a generated sequence against a calendar
//! store, one create call at a time.
//!
//! Items are created strictly in list order with a fixed pause between
//! calls to stay under the backend's burst rate limit. An ordinary failure
//! is recorded against its index and the batch moves on; a rejected
//! credential stops the batch, as does a missing calendar on the very first
//! item. Nothing already created is rolled back and nothing is retried.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::ErrorKind;
use crate::event::EventDescriptor;
use crate::progress::{BatchStatus, ItemOutcome, Progress, ProgressSink};
use crate::store::CalendarStore;

pub const DEFAULT_PACING: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationResult {
    /// One entry per attempted item, in submission order.
    pub outcomes: Vec<ItemOutcome>,
    pub created_count: usize,
    pub total_count: usize,
    pub status: BatchStatus,
}

impl RegistrationResult {
    fn new(total_count: usize) -> Self {
        RegistrationResult {
            outcomes: Vec::with_capacity(total_count),
            created_count: 0,
            total_count,
            status: BatchStatus::Completed,
        }
    }

    fn push(&mut self, outcome: ItemOutcome) {
        if outcome.succeeded {
            self.created_count += 1;
        }
        self.outcomes.push(outcome);
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.created_count
    }
}

pub struct Registrar<'a, S: CalendarStore + ?Sized> {
    store: &'a S,
    pacing: Duration,
    progress: ProgressSink<EventDescriptor>,
    cancel: CancellationToken,
}

impl<'a, S: CalendarStore + ?Sized> Registrar<'a, S> {
    pub fn new(store: &'a S, pacing: Duration) -> Self {
        Registrar {
            store,
            pacing,
            progress: ProgressSink::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_progress(mut self, tx: UnboundedSender<Progress<EventDescriptor>>) -> Self {
        self.progress = ProgressSink::new(tx);
        self
    }

    /// Checked between items; cancelling stops further calls but keeps
    /// whatever was already created.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub async fn register_one(&self, calendar_id: &str, event: &EventDescriptor) -> RegistrationResult {
        self.register_all(calendar_id, std::slice::from_ref(event)).await
    }

    pub async fn register_all(&self, calendar_id: &str, events: &[EventDescriptor]) -> RegistrationResult {
        let mut result = RegistrationResult::new(events.len());

        info!(calendar_id, total = events.len(), "registering events");

        for (index, event) in events.iter().enumerate() {
            if index > 0 {
                tokio::select! {
                    _ = self.cancel.cancelled() => {}
                    _ = tokio::time::sleep(self.pacing) => {}
                }
            }
            if self.cancel.is_cancelled() {
                result.status = BatchStatus::Cancelled;
                break;
            }

            let outcome = match self.store.create_event(calendar_id, event).await {
                Ok(id) => ItemOutcome::success(index, id),
                Err(e) => {
                    warn!(index, title = %event.title, error = %e, "failed to create event");

                    match e.kind() {
                        ErrorKind::AuthExpired => result.status = BatchStatus::AuthExpired,
                        ErrorKind::NotFound if index == 0 => {
                            result.status = BatchStatus::CalendarNotFound
                        }
                        _ => {}
                    }
                    ItemOutcome::failure(index, e)
                }
            };

            let succeeded = outcome.succeeded;
            result.push(outcome);

            self.progress.emit(Progress {
                completed_count: result.outcomes.len(),
                total_count: events.len(),
                most_recent: event.clone(),
                succeeded,
            });

            if result.status != BatchStatus::Completed {
                break;
            }
        }

        info!(
            calendar_id,
            created = result.created_count,
            total = result.total_count,
            status = ?result.status,
            "registration finished"
        );

        result
    }
}
