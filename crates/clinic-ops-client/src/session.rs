//! Local session state, persisted across runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use clinic_ops_core::normalize;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session data error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The two things remembered between runs: who is signed in, and as what.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    #[serde(rename = "userRole")]
    pub role: String,
    pub user: Value,
}

impl Session {
    /// Reconcile a login response into a session.
    ///
    /// Role and user live under `data` or at the top level depending on
    /// backend version; the role key itself varies in casing.
    pub fn from_login_response(response: &Value) -> Option<Self> {
        let record = normalize::record(response);
        let role = ["role", "userRole", "user_role"]
            .iter()
            .find_map(|key| record.get(*key).and_then(Value::as_str))?
            .to_string();
        let user = record.get("user").cloned().unwrap_or(Value::Null);
        Some(Self { role, user })
    }
}

/// File-backed JSON session store.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the saved session, if one exists.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let text = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the saved session. Called on logout.
    pub fn clear(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
