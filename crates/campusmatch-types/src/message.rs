//! Chat message and AI chat-helper types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// A message in a two-person thread, as returned by
/// `GET /messages/thread/{other_user_id}`.
///
/// Threads arrive oldest-first and the server's order is trusted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /messages`.
#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub to_user_id: UserId,
    pub text: String,
}

/// Which side of the conversation a message belongs to.
///
/// `Theirs` is the required fallback whenever the caller's own identity
/// cannot be derived from the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorship {
    Mine,
    Theirs,
}

/// Response of `GET /ai/chat-helper/{other_user_id}`.
///
/// Both fields default to empty when absent so a partial response still
/// renders.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatHelper {
    /// Short AI-written summary of the other user's profile.
    #[serde(default)]
    pub summary: String,
    /// Suggested next lines, usable as selectable quick-replies.
    #[serde(default)]
    pub openers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_deserialize() {
        let msg: ChatMessage = serde_json::from_str(
            r#"{
                "id": 1,
                "from_user_id": 3,
                "to_user_id": 8,
                "text": "hey!",
                "created_at": "2025-11-02T16:40:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(msg.from_user_id, UserId::new(3));
        assert_eq!(msg.text, "hey!");
    }

    #[test]
    fn test_chat_helper_defaults() {
        let helper: ChatHelper = serde_json::from_str("{}").unwrap();
        assert!(helper.summary.is_empty());
        assert!(helper.openers.is_empty());
    }

    #[test]
    fn test_chat_helper_full() {
        let helper: ChatHelper = serde_json::from_str(
            r#"{"summary": "Loves film.", "openers": ["Seen anything good lately?"]}"#,
        )
        .unwrap();
        assert_eq!(helper.openers.len(), 1);
    }

    #[test]
    fn test_new_message_serialize() {
        let msg = NewMessage {
            to_user_id: UserId::new(8),
            text: "hi".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"to_user_id":8,"text":"hi"}"#);
    }
}
