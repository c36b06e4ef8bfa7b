//! Bearer credentials handed to the core by an identity provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CalGenError, CalGenResult};

#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>) -> Self {
        Credential {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.access_token.is_empty() || self.expires_at.is_some_and(|exp| now >= exp)
    }

    /// Fail with `AuthExpired` if the credential can no longer be used.
    pub fn ensure_valid(&self, now: DateTime<Utc>) -> CalGenResult<&Self> {
        if self.is_expired_at(now) {
            return Err(CalGenError::AuthExpired(
                "access token has expired, sign in again".into(),
            ));
        }
        Ok(self)
    }
}

// Keep tokens out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Supplies the bearer credential for a request. Implementations never
/// refresh tokens; an unusable credential is reported as `AuthExpired`.
pub trait IdentityProvider {
    fn credential(&self) -> CalGenResult<Credential>;
}
