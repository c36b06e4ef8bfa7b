//! Calendar backend seam.
//!
//! The orchestrators only ever talk to a calendar through this trait. The
//! Google implementation lives in `calgen-provider-google`; in-memory
//! doubles live in [`crate::fakes`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CalGenResult;
use crate::event::{EventDescriptor, RemoteEvent};

#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// Create one event and return the id the backend assigned to it.
    async fn create_event(&self, calendar_id: &str, event: &EventDescriptor) -> CalGenResult<String>;

    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> CalGenResult<Vec<RemoteEvent>>;

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> CalGenResult<()>;

    /// Create a new calendar and return its id.
    async fn create_calendar(&self, name: &str) -> CalGenResult<String>;
}
