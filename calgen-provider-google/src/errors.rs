use calgen_core::CalGenError;

/// Sort an API error into the error kinds the orchestrators act on.
///
/// The client only exposes failures as text. HTTP failures render as
/// `HTTP Error. Code: <status>, message: <body>`, so the status is read from
/// that prefix rather than from digits anywhere in the message, which may
/// hold request URLs and calendar ids.
pub(crate) fn classify(error: impl std::fmt::Display, context: &str) -> CalGenError {
    let text = error.to_string();
    let lower = text.to_lowercase();

    if has_status(&text, 401)
        || lower.contains("unauthenticated")
        || lower.contains("invalid_grant")
        || lower.contains("invalid credentials")
    {
        CalGenError::AuthExpired(format!("{}: {}", context, text))
    } else if has_status(&text, 404) {
        CalGenError::CalendarNotFound(format!("{}: {}", context, text))
    } else {
        CalGenError::External(format!("{}: {}", context, text))
    }
}

/// Deleting something that is already gone counts as done.
pub(crate) fn is_gone(error: &impl std::fmt::Display) -> bool {
    has_status(&error.to_string(), 410)
}

fn has_status(text: &str, status: u16) -> bool {
    text.contains(&format!("Code: {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calgen_core::ErrorKind;

    #[test]
    fn unauthorized_is_auth_expired() {
        let e = classify("HTTP Error. Code: 401 Unauthorized, message: Login Required", "create");
        assert_eq!(e.kind(), ErrorKind::AuthExpired);

        let e = classify("Request had invalid authentication credentials: UNAUTHENTICATED", "list");
        assert_eq!(e.kind(), ErrorKind::AuthExpired);
    }

    #[test]
    fn missing_calendar_is_not_found() {
        let e = classify("HTTP Error. Code: 404 Not Found, message: Not Found", "create");
        assert_eq!(e.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn status_digits_in_urls_are_not_statuses() {
        let e = classify(
            "error sending request for url (https://www.googleapis.com/calendar/v3/calendars/\
             c_9a401f7e@group.calendar.google.com/events): connection reset",
            "create",
        );
        assert!(matches!(e, CalGenError::External(_)));

        let e = classify(
            "error sending request for url (https://www.googleapis.com/calendar/v3/calendars/\
             c_404b2e11@group.calendar.google.com/events): operation timed out",
            "create",
        );
        assert!(matches!(e, CalGenError::External(_)));
        assert!(!is_gone(&"error sending request for url (https://example.com/c_410a): timed out"));
    }

    #[test]
    fn everything_else_is_external() {
        let e = classify("HTTP Error. Code: 403 Forbidden, message: rateLimitExceeded", "create");
        assert!(matches!(e, CalGenError::External(_)));
        assert!(e.to_string().contains("rateLimitExceeded"));
    }

    #[test]
    fn gone_is_detected() {
        assert!(is_gone(&"HTTP Error. Code: 410 Gone, message: deleted"));
        assert!(!is_gone(&"HTTP Error. Code: 500 Internal Server Error, message: backendError"));
    }
}
