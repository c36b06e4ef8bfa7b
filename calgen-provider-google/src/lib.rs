//! Google Calendar backend for calgen.
//!
//! - [`GoogleCalendarStore`] creates, lists and deletes events and creates
//!   calendars through the Calendar v3 API
//! - [`GoogleHolidaySource`] reads a public-holiday calendar
//! - [`Session`] hands out the stored access token
//!
//! Tokens are obtained elsewhere and never refreshed here; an expired or
//! rejected token surfaces as `CalGenError::AuthExpired`.

mod convert;
mod errors;
mod holidays;
mod session;
mod store;

pub use holidays::GoogleHolidaySource;
pub use session::{Session, SessionData};
pub use store::GoogleCalendarStore;

use calgen_core::identity::Credential;
use google_calendar::Client;

/// API client authorised with a bearer token only. No client id or
/// secret is needed since tokens are never refreshed here.
fn client_for(credential: &Credential) -> Client {
    Client::new(
        String::new(),
        String::new(),
        String::new(),
        credential.access_token.clone(),
        String::new(),
    )
}
