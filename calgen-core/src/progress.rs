//! Outcomes and progress notifications shared by the orchestrators.

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::EventDescriptor;

/// Result of one item in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    /// Position in the submitted list.
    pub index: usize,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ItemOutcome {
    pub fn success(index: usize, external_id: impl Into<String>) -> Self {
        ItemOutcome {
            index,
            succeeded: true,
            external_id: Some(external_id.into()),
            error_message: None,
        }
    }

    pub fn failure(index: usize, error: impl ToString) -> Self {
        ItemOutcome {
            index,
            succeeded: false,
            external_id: None,
            error_message: Some(error.to_string()),
        }
    }
}

/// How a batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Every item was attempted.
    Completed,
    /// The credential was rejected; re-authenticate before retrying.
    AuthExpired,
    /// The target calendar does not exist.
    CalendarNotFound,
    /// Stopped by the caller between items.
    Cancelled,
}

impl BatchStatus {
    pub fn is_fatal(self) -> bool {
        matches!(self, BatchStatus::AuthExpired | BatchStatus::CalendarNotFound)
    }
}

/// Emitted after each item completes, whether it succeeded or not.
/// `T` is the item type: descriptors when registering, listed events when
/// deleting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress<T = EventDescriptor> {
    pub completed_count: usize,
    pub total_count: usize,
    pub most_recent: T,
    pub succeeded: bool,
}

/// Optional progress side channel. A dropped receiver is ignored.
#[derive(Debug, Clone)]
pub(crate) struct ProgressSink<T>(Option<UnboundedSender<Progress<T>>>);

impl<T> Default for ProgressSink<T> {
    fn default() -> Self {
        ProgressSink(None)
    }
}

impl<T> ProgressSink<T> {
    pub(crate) fn new(tx: UnboundedSender<Progress<T>>) -> Self {
        ProgressSink(Some(tx))
    }

    pub(crate) fn emit(&self, progress: Progress<T>) {
        if let Some(tx) = &self.0 {
            let _ = tx.send(progress);
        }
    }
}
