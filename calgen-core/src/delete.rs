//! Bulk deletion of every event in a calendar.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{CalGenResult, ErrorKind};
use crate::event::RemoteEvent;
use crate::progress::{BatchStatus, ItemOutcome, Progress, ProgressSink};
use crate::store::CalendarStore;

/// 2100-01-01T00:00:00Z
const FAR_FUTURE_TIMESTAMP: i64 = 4_102_444_800;

/// Listing window wide enough to cover every event a calendar can hold.
pub fn all_time() -> (DateTime<Utc>, DateTime<Utc>) {
    let far_future =
        DateTime::from_timestamp(FAR_FUTURE_TIMESTAMP, 0).unwrap_or(DateTime::<Utc>::MAX_UTC);
    (DateTime::<Utc>::UNIX_EPOCH, far_future)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionResult {
    pub outcomes: Vec<ItemOutcome>,
    pub deleted_count: usize,
    pub total_count: usize,
    pub status: BatchStatus,
}

impl DeletionResult {
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.deleted_count
    }
}

pub struct Deleter<'a, S: CalendarStore + ?Sized> {
    store: &'a S,
    pacing: Duration,
    progress: ProgressSink<RemoteEvent>,
    cancel: CancellationToken,
}

impl<'a, S: CalendarStore + ?Sized> Deleter<'a, S> {
    pub fn new(store: &'a S, pacing: Duration) -> Self {
        Deleter {
            store,
            pacing,
            progress: ProgressSink::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_progress(mut self, tx: UnboundedSender<Progress<RemoteEvent>>) -> Self {
        self.progress = ProgressSink::new(tx);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Events currently in the calendar, across all time.
    pub async fn list_all(&self, calendar_id: &str) -> CalGenResult<Vec<RemoteEvent>> {
        let (time_min, time_max) = all_time();
        self.store.list_events(calendar_id, time_min, time_max).await
    }

    /// Delete every event in `calendar_id`. Deletion is permanent.
    ///
    /// Listing failures are returned as errors. A failed deletion is
    /// recorded and the loop continues, except for a rejected credential,
    /// which stops the run since every later call would fail the same way.
    pub async fn delete_all(&self, calendar_id: &str) -> CalGenResult<DeletionResult> {
        let events = self.list_all(calendar_id).await?;
        Ok(self.delete_events(calendar_id, &events).await)
    }

    pub async fn delete_events(&self, calendar_id: &str, events: &[RemoteEvent]) -> DeletionResult {
        let mut result = DeletionResult {
            outcomes: Vec::with_capacity(events.len()),
            deleted_count: 0,
            total_count: events.len(),
            status: BatchStatus::Completed,
        };

        info!(calendar_id, total = events.len(), "deleting events");

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

            let outcome = match self.store.delete_event(calendar_id, &event.id).await {
                Ok(()) => {
                    result.deleted_count += 1;
                    ItemOutcome::success(index, event.id.clone())
                }
                Err(e) => {
                    warn!(index, event_id = %event.id, error = %e, "failed to delete event");
                    if e.kind() == ErrorKind::AuthExpired {
                        result.status = BatchStatus::AuthExpired;
                    }
                    ItemOutcome::failure(index, e)
                }
            };

            let succeeded = outcome.succeeded;
            result.outcomes.push(outcome);

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
            deleted = result.deleted_count,
            total = result.total_count,
            status = ?result.status,
            "deletion finished"
        );

        result
    }
}
