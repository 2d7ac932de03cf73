//! Session store port - where the bearer token lives between runs

use crate::domain::result::Result;
use crate::domain::SessionToken;

/// Process-wide storage of a single session token
pub trait SessionStore: Send + Sync {
    /// Current token, if one is stored
    fn get(&self) -> Result<Option<SessionToken>>;

    /// Store a token, replacing any previous one
    fn set(&self, token: &SessionToken) -> Result<()>;

    /// Forget the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;

    /// Whether a token is present. An unreadable store counts as signed out.
    fn has_token(&self) -> bool {
        matches!(self.get(), Ok(Some(_)))
    }
}
