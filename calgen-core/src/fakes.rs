//! In-memory collaborators.
//!
//! `MemoryCalendarStore` and `StaticHolidaySource` satisfy the store and
//! holiday traits without any network access. Failures can be scripted per
//! call so orchestration paths can be exercised deterministically.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{CalGenError, CalGenResult};
use crate::event::{EventDescriptor, RemoteEvent};
use crate::holiday::{HolidaySet, HolidaySource};
use crate::identity::Credential;
use crate::store::CalendarStore;

/// A failure to inject into a fake call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    AuthExpired,
    NotFound,
    Other(String),
}

impl Failure {
    fn to_error(&self, context: &str) -> CalGenError {
        match self {
            Failure::AuthExpired => CalGenError::AuthExpired(context.to_string()),
            Failure::NotFound => CalGenError::CalendarNotFound(context.to_string()),
            Failure::Other(msg) => CalGenError::External(format!("{}: {}", context, msg)),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    /// calendar id -> event id -> event
    calendars: HashMap<String, BTreeMap<String, EventDescriptor>>,
    next_id: usize,
    create_calls: usize,
    delete_calls: usize,
    create_failures: HashMap<usize, Failure>,
    delete_failures: HashMap<String, Failure>,
    list_failure: Option<Failure>,
}

#[derive(Debug, Default)]
pub struct MemoryCalendarStore {
    state: Mutex<State>,
}

impl MemoryCalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with one empty calendar already present.
    pub fn with_calendar(calendar_id: &str) -> Self {
        let store = Self::new();
        store
            .lock()
            .calendars
            .insert(calendar_id.to_string(), BTreeMap::new());
        store
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fail the `call`-th create request (0-based, counted across all calendars).
    pub fn fail_create(&self, call: usize, failure: Failure) {
        self.lock().create_failures.insert(call, failure);
    }

    pub fn fail_delete(&self, event_id: &str, failure: Failure) {
        self.lock()
            .delete_failures
            .insert(event_id.to_string(), failure);
    }

    pub fn fail_list(&self, failure: Failure) {
        self.lock().list_failure = Some(failure);
    }

    pub fn create_calls(&self) -> usize {
        self.lock().create_calls
    }

    pub fn delete_calls(&self) -> usize {
        self.lock().delete_calls
    }

    /// Events in a calendar, ordered by id (which is creation order).
    pub fn events(&self, calendar_id: &str) -> Vec<EventDescriptor> {
        self.lock()
            .calendars
            .get(calendar_id)
            .map(|events| events.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CalendarStore for MemoryCalendarStore {
    async fn create_event(&self, calendar_id: &str, event: &EventDescriptor) -> CalGenResult<String> {
        let mut state = self.lock();
        let call = state.create_calls;
        state.create_calls += 1;

        if let Some(failure) = state.create_failures.get(&call) {
            return Err(failure.to_error(&event.title));
        }

        state.next_id += 1;
        let id = format!("evt{:06}", state.next_id);

        let calendar = state
            .calendars
            .get_mut(calendar_id)
            .ok_or_else(|| CalGenError::CalendarNotFound(calendar_id.to_string()))?;
        calendar.insert(id.clone(), event.clone());

        Ok(id)
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> CalGenResult<Vec<RemoteEvent>> {
        let state = self.lock();

        if let Some(failure) = &state.list_failure {
            return Err(failure.to_error(calendar_id));
        }

        let calendar = state
            .calendars
            .get(calendar_id)
            .ok_or_else(|| CalGenError::CalendarNotFound(calendar_id.to_string()))?;

        let (from, to) = (time_min.date_naive(), time_max.date_naive());

        Ok(calendar
            .iter()
            .filter(|(_, e)| {
                let date = e.start.date();
                date >= from && date <= to
            })
            .map(|(id, e)| RemoteEvent {
                id: id.clone(),
                title: e.title.clone(),
                start: e.start.clone(),
            })
            .collect())
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> CalGenResult<()> {
        let mut state = self.lock();
        state.delete_calls += 1;

        if let Some(failure) = state.delete_failures.get(event_id) {
            return Err(failure.to_error(event_id));
        }

        let calendar = state
            .calendars
            .get_mut(calendar_id)
            .ok_or_else(|| CalGenError::CalendarNotFound(calendar_id.to_string()))?;

        calendar
            .remove(event_id)
            .map(|_| ())
            .ok_or_else(|| CalGenError::External(format!("event {} does not exist", event_id)))
    }

    async fn create_calendar(&self, name: &str) -> CalGenResult<String> {
        let mut state = self.lock();
        state.next_id += 1;
        let id = format!("{}-{:06}@calendar.local", name.to_lowercase().replace(' ', "-"), state.next_id);
        state.calendars.insert(id.clone(), BTreeMap::new());
        Ok(id)
    }
}

/// Holiday source backed by a fixed set of dates, or a fixed failure.
#[derive(Debug, Default)]
pub struct StaticHolidaySource {
    holidays: HolidaySet,
    failure: Option<Failure>,
    calls: Mutex<usize>,
}

impl StaticHolidaySource {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        StaticHolidaySource {
            holidays: dates.into_iter().collect(),
            failure: None,
            calls: Mutex::new(0),
        }
    }

    pub fn failing(failure: Failure) -> Self {
        StaticHolidaySource {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl HolidaySource for StaticHolidaySource {
    async fn list_holiday_dates(
        &self,
        credential: &Credential,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CalGenResult<HolidaySet> {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner()) += 1;

        if let Some(failure) = &self.failure {
            return Err(failure.to_error("holiday lookup"));
        }
        credential.ensure_valid(Utc::now())?;

        Ok(self
            .holidays
            .iter()
            .copied()
            .filter(|d| *d >= from && *d <= to)
            .collect())
    }
}
