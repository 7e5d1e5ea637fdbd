use std::path::{Path, PathBuf};

use super::SessionProvider;
use crate::error::AuthError;
use crate::permissions::GrantSet;
use crate::types::{LoginResponse, StoredSession};

/// Session persisted as JSON on disk, written at login and removed at logout.
/// Every read goes back to the file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, login: &LoginResponse) -> Result<StoredSession, AuthError> {
        let session = StoredSession {
            token: login.token.clone(),
            user: login.user.clone(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(&session)?)?;
        tracing::info!(user_id = session.user.user_id, "session saved");
        Ok(session)
    }

    /// Remove the stored session. Already signed out is not an error.
    pub fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read the stored session; unreadable or malformed data reads as none.
    pub fn load(&self) -> Option<StoredSession> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "cannot read session: {e}");
                return None;
            }
        };
        match serde_json::from_slice::<StoredSession>(&bytes) {
            Ok(session) => {
                tracing::debug!(path = %self.path.display(), "session loaded");
                Some(session)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "malformed session data: {e}");
                None
            }
        }
    }
}

impl SessionProvider for FileSessionStore {
    fn current_grants(&self) -> GrantSet {
        self.load()
            .map(|s| s.user.permission_names().into_iter().collect())
            .unwrap_or_default()
    }

    fn token(&self) -> Option<String> {
        self.load().map(|s| s.token)
    }
}
