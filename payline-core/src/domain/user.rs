//! People: the signed-in user's profile and search candidates

use serde::{Deserialize, Serialize};

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub firstname: String,
    pub lastname: String,
}

impl UserProfile {
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }
}

/// A user returned by a directory search, eligible as a transfer recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            email: email.into(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let candidate = Candidate::new("u1", "Grace", "Hopper", "grace@example.com");
        assert_eq!(candidate.display_name(), "Grace Hopper");
    }
}
