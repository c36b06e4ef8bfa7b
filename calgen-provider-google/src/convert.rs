//! Conversion between calgen descriptors and Google Calendar events.

use calgen_core::date::{add_days, tokyo_offset};
use calgen_core::{EventDescriptor, EventTime, RemoteEvent};
use chrono::{NaiveDate, Utc};
use chrono_tz::Asia::Tokyo;
use google_calendar::types::{Event, EventDateTime};

pub(crate) trait ToGoogle {
    fn to_google(&self) -> Event;
}

impl ToGoogle for EventDescriptor {
    fn to_google(&self) -> Event {
        let (start, end) = match (&self.start, &self.end) {
            // Google's all-day end date is exclusive
            (EventTime::Date(start), EventTime::Date(end)) => (
                date_to_google(*start),
                date_to_google(add_days(*end, 1).unwrap_or(*end)),
            ),
            (start, end) => (event_time_to_google(start), event_time_to_google(end)),
        };

        Event {
            summary: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }
}

fn date_to_google(date: NaiveDate) -> EventDateTime {
    EventDateTime {
        date: Some(date),
        date_time: None,
        time_zone: String::new(),
    }
}

fn event_time_to_google(time: &EventTime) -> EventDateTime {
    match time {
        EventTime::Date(d) => date_to_google(*d),
        EventTime::DateTime(dt) => EventDateTime {
            date: None,
            date_time: Some(dt.with_timezone(&Utc)),
            time_zone: Tokyo.name().to_string(),
        },
    }
}

pub(crate) fn event_time_from_google(time: &EventDateTime) -> Option<EventTime> {
    if let Some(dt) = time.date_time {
        Some(EventTime::DateTime(dt.with_timezone(&tokyo_offset())))
    } else {
        time.date.map(EventTime::Date)
    }
}

pub(crate) trait FromGoogle: Sized {
    fn from_google(event: Event) -> Option<Self>;
}

impl FromGoogle for RemoteEvent {
    /// Cancelled instances and events without an id or start are skipped.
    fn from_google(event: Event) -> Option<Self> {
        if event.id.is_empty() || event.status == "cancelled" {
            return None;
        }

        let start = event.start.as_ref().and_then(event_time_from_google)?;

        Some(RemoteEvent {
            id: event.id,
            title: if event.summary.is_empty() {
                "(No title)".to_string()
            } else {
                event.summary
            },
            start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn all_day_end_becomes_exclusive() {
        let event = EventDescriptor::all_day("一周忌", ymd(2025, 1, 1), Some("memo".into()));
        let google = event.to_google();

        assert_eq!(google.summary, "一周忌");
        assert_eq!(google.description, "memo");
        assert_eq!(google.start.unwrap().date, Some(ymd(2025, 1, 1)));
        assert_eq!(google.end.unwrap().date, Some(ymd(2025, 1, 2)));
    }

    #[test]
    fn timed_event_is_sent_in_utc_with_tokyo_zone() {
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        let start = jst.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        let end = jst.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap();
        let google = EventDescriptor::timed("記念日", start, end, None).to_google();

        let google_start = google.start.unwrap();
        assert_eq!(
            google_start.date_time,
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap())
        );
        assert_eq!(google_start.time_zone, "Asia/Tokyo");
        assert_eq!(google.description, "");
    }

    #[test]
    fn listed_event_converts_back_to_tokyo_time() {
        let event = Event {
            id: "abc".into(),
            summary: "定例会".into(),
            start: Some(EventDateTime {
                date: None,
                date_time: Some(Utc.with_ymd_and_hms(2024, 1, 8, 1, 0, 0).unwrap()),
                time_zone: String::new(),
            }),
            ..Default::default()
        };

        let remote = RemoteEvent::from_google(event).unwrap();
        assert_eq!(remote.id, "abc");
        assert_eq!(remote.start.to_string(), "2024-01-08T10:00:00+09:00");
    }

    #[test]
    fn cancelled_or_anonymous_events_are_skipped() {
        let start = Some(date_to_google(ymd(2024, 1, 1)));
        let cancelled = Event {
            id: "x".into(),
            status: "cancelled".into(),
            start: start.clone(),
            ..Default::default()
        };
        let anonymous = Event {
            start,
            ..Default::default()
        };

        assert!(RemoteEvent::from_google(cancelled).is_none());
        assert!(RemoteEvent::from_google(anonymous).is_none());
    }

    #[test]
    fn untitled_event_gets_placeholder() {
        let event = Event {
            id: "y".into(),
            start: Some(date_to_google(ymd(2024, 1, 1))),
            ..Default::default()
        };
        assert_eq!(RemoteEvent::from_google(event).unwrap().title, "(No title)");
    }
}
