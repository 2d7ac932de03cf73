//! Session token

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque bearer credential issued by the payments service
///
/// Presence alone gates access to protected pages; the client never
/// inspects its contents.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens end up in debug output of larger structs; keep them out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_token() {
        let token = SessionToken::new("secret-jwt");
        assert_eq!(format!("{:?}", token), "SessionToken(<redacted>)");
        assert_eq!(token.as_str(), "secret-jwt");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let token = SessionToken::new("abc");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"abc\"");
    }
}
