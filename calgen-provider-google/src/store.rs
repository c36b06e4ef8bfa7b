use async_trait::async_trait;
use calgen_core::identity::Credential;
use calgen_core::store::CalendarStore;
use calgen_core::{CalGenResult, EventDescriptor, RemoteEvent};
use chrono::{DateTime, Utc};
use chrono_tz::Asia::Tokyo;
use google_calendar::Client;
use google_calendar::types::{Calendar, OrderBy, SendUpdates};
use tracing::debug;

use crate::client_for;
use crate::convert::{FromGoogle, ToGoogle};
use crate::errors::{classify, is_gone};

/// Calendar store backed by the Google Calendar API, authorised with a
/// single bearer token for the lifetime of one request.
pub struct GoogleCalendarStore {
    client: Client,
}

impl GoogleCalendarStore {
    pub fn new(credential: &Credential) -> Self {
        GoogleCalendarStore {
            client: client_for(credential),
        }
    }
}

#[async_trait]
impl CalendarStore for GoogleCalendarStore {
    async fn create_event(&self, calendar_id: &str, event: &EventDescriptor) -> CalGenResult<String> {
        let google_event = event.to_google();

        let response = self
            .client
            .events()
            .insert(
                calendar_id,
                0,
                0,
                false,
                SendUpdates::None,
                false,
                &google_event,
            )
            .await
            .map_err(|e| classify(e, &format!("Failed to create event '{}'", event.title)))?;

        debug!(calendar_id, id = %response.body.id, "created event");

        Ok(response.body.id)
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> CalGenResult<Vec<RemoteEvent>> {
        let time_min = time_min.to_rfc3339();
        let time_max = time_max.to_rfc3339();

        let response = self
            .client
            .events()
            .list_all(
                calendar_id,
                "",
                0,
                OrderBy::default(),
                &[],
                "", // search query
                &[],
                false,
                false,
                false,
                &time_max,
                &time_min,
                "",
                "",
            )
            .await
            .map_err(|e| classify(e, "Failed to fetch events"))?;

        Ok(response
            .body
            .into_iter()
            .filter_map(RemoteEvent::from_google)
            .collect())
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> CalGenResult<()> {
        let result = self
            .client
            .events()
            .delete(calendar_id, event_id, false, SendUpdates::None)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_gone(&e) => Ok(()),
            Err(e) => Err(classify(e, &format!("Failed to delete event {}", event_id))),
        }
    }

    async fn create_calendar(&self, name: &str) -> CalGenResult<String> {
        let calendar = new_calendar(name);

        let response = self
            .client
            .calendars()
            .insert(&calendar)
            .await
            .map_err(|e| classify(e, &format!("Failed to create calendar '{}'", name)))?;

        Ok(response.body.id)
    }
}

/// Body for `calendars.insert`. `Calendar` has no `Default`, so every field
/// is spelled out; the server fills in id, etag and kind.
fn new_calendar(name: &str) -> Calendar {
    Calendar {
        conference_properties: None,
        description: String::new(),
        etag: String::new(),
        id: String::new(),
        kind: String::new(),
        location: String::new(),
        summary: name.to_string(),
        time_zone: Tokyo.name().to_string(),
    }
}
