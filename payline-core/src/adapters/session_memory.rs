//! In-memory session store, for tests and embedding

use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::SessionToken;
use crate::ports::SessionStore;

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<SessionToken>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts signed in
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(SessionToken::new(token))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<SessionToken>> {
        let guard = self
            .token
            .lock()
            .map_err(|e| Error::Session(format!("Lock poisoned: {}", e)))?;
        Ok(guard.clone())
    }

    fn set(&self, token: &SessionToken) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|e| Error::Session(format!("Lock poisoned: {}", e)))?;
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|e| Error::Session(format!("Lock poisoned: {}", e)))?;
        *guard = None;
        Ok(())
    }
}
