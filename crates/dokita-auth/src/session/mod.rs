pub mod file;

pub use file::FileSessionStore;

use crate::permissions::GrantSet;

/// Source of the signed-in identity's grants.
pub trait SessionProvider: Send + Sync {
    /// Permission names held by the session; empty when signed out or when
    /// the stored session cannot be read.
    fn current_grants(&self) -> GrantSet;

    /// Bearer token for backend calls.
    fn token(&self) -> Option<String>;
}

/// Session held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    grants: GrantSet,
    token: Option<String>,
}

impl StaticSession {
    pub fn new(grants: GrantSet) -> Self {
        Self {
            grants,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl SessionProvider for StaticSession {
    fn current_grants(&self) -> GrantSet {
        self.grants.clone()
    }

    fn token(&self) -> Option<String> {
        self.token.clone()
    }
}
