//! Stored Google access token, handed to the core as a `Credential`.

use std::path::Path;

use anyhow::{Context, Result};
use calgen_core::identity::{Credential, IdentityProvider};
use calgen_core::{CalGenError, CalGenResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct SessionData {
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

impl SessionData {
    pub fn new(access_token: String, expires_in: Option<i64>) -> Self {
        SessionData {
            access_token,
            expires_at: expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

pub struct Session {
    source: String,
    data: Option<SessionData>,
}

impl Session {
    /// Token given directly, e.g. from the command line or environment.
    pub fn from_token(access_token: impl Into<String>) -> Self {
        Session {
            source: "command line".to_string(),
            data: Some(SessionData {
                access_token: access_token.into(),
                expires_at: None,
            }),
        }
    }

    /// Load the session file. A missing file is not an error here; asking
    /// for a credential later reports it as an expired session.
    pub fn load(path: &Path) -> Result<Self> {
        let source = path.display().to_string();

        if !path.exists() {
            return Ok(Session { source, data: None });
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read Google session from {}", path.display()))?;

        let data: SessionData = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse Google session from {}", path.display()))?;

        Ok(Session {
            source,
            data: Some(data),
        })
    }

    pub fn save(path: &Path, data: &SessionData) -> Result<()> {
        let contents = toml::to_string_pretty(data).context("Failed to serialize session")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write session to {}", path.display()))?;

        // Set to owner-only (0600) since file contains an access token:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
        }

        Ok(())
    }

    /// Remove the session file if there is one.
    pub fn clear(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove session {}", path.display()))?;
        Ok(true)
    }
}

impl IdentityProvider for Session {
    fn credential(&self) -> CalGenResult<Credential> {
        let data = self.data.as_ref().ok_or_else(|| {
            CalGenError::AuthExpired(format!(
                "no Google session found at {}, run `calgen login` first",
                self.source
            ))
        })?;

        let credential = Credential {
            access_token: data.access_token.clone(),
            expires_at: data.expires_at,
        };
        credential.ensure_valid(Utc::now())?;

        Ok(credential)
    }
}
