use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ROLE_USER: &str = "user";
pub const ROLE_CHARACTER: &str = "character";
pub const ROLE_SYSTEM: &str = "system";

/// One entry of a conversation transcript. Ids are v7 so that messages
/// created in order sort in order, which rendering relies on for keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    /// "user", "character" or "system"
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: role.into(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == ROLE_USER
    }

    pub fn is_character(&self) -> bool {
        self.role == ROLE_CHARACTER
    }

    pub fn is_system(&self) -> bool {
        self.role == ROLE_SYSTEM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_round_trips_role_and_content() {
        let transcript = vec![
            ChatMessage::new(ROLE_USER, "Hi"),
            ChatMessage::new(ROLE_CHARACTER, "Well met, traveller."),
            ChatMessage::new(ROLE_SYSTEM, "note"),
        ];

        let payload = serde_json::to_string(&transcript).unwrap();
        let restored: Vec<ChatMessage> = serde_json::from_str(&payload).unwrap();

        assert_eq!(restored.len(), transcript.len());
        for (before, after) in transcript.iter().zip(&restored) {
            assert_eq!(before.role, after.role);
            assert_eq!(before.content, after.content);
            assert_eq!(before.id, after.id);
        }
    }

    #[test]
    fn message_ids_are_unique() {
        let a = ChatMessage::new(ROLE_USER, "one");
        let b = ChatMessage::new(ROLE_USER, "one");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn role_predicates() {
        assert!(ChatMessage::new(ROLE_USER, "x").is_user());
        assert!(ChatMessage::new(ROLE_CHARACTER, "x").is_character());
        assert!(ChatMessage::new(ROLE_SYSTEM, "x").is_system());
    }
}
