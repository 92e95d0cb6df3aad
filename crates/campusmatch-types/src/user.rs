//! User identifiers and account data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier the service assigns to a user.
///
/// The service uses plain integer ids; on the wire this serializes as a
/// bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Create a UserId from a raw integer.
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(UserId)
            .map_err(|_| format!("invalid user id: '{s}'"))
    }
}

/// The account record the service returns for a registered user.
///
/// Returned by `POST /auth/register` and `GET /users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display_roundtrip() {
        let id = UserId::new(42);
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_id_parse_rejects_garbage() {
        assert!("not-a-number".parse::<UserId>().is_err());
    }

    #[test]
    fn test_user_id_serde_transparent() {
        let json = serde_json::to_string(&UserId::new(7)).unwrap();
        assert_eq!(json, "7");
        let parsed: UserId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, UserId::new(7));
    }

    #[test]
    fn test_account_deserialize() {
        let account: Account = serde_json::from_str(
            r#"{"id": 3, "email": "andrew@cmu.edu", "full_name": "Andrew Carnegie"}"#,
        )
        .unwrap();
        assert_eq!(account.id, UserId::new(3));
        assert_eq!(account.email, "andrew@cmu.edu");
    }
}
