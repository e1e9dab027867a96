use gloo_storage::{LocalStorage, Storage};
use shared::models::ChatMessage;
use uuid::Uuid;

fn storage_key(character_id: Uuid) -> String {
    format!("chat_{character_id}")
}

/// Durable per-character transcript log. The whole transcript is the
/// unit of persistence; there is no delta write a reader could observe
/// half-applied.
pub trait TranscriptStore {
    /// Empty when nothing is stored or the stored payload is malformed.
    /// A broken cache must never block chatting.
    fn load(&self, character_id: Uuid) -> Vec<ChatMessage>;
    fn save(&self, character_id: Uuid, transcript: &[ChatMessage]);
    fn clear(&self, character_id: Uuid);
}

/// LocalStorage-backed store used by the browser app, one entry per
/// character.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct BrowserStore;

impl TranscriptStore for BrowserStore {
    fn load(&self, character_id: Uuid) -> Vec<ChatMessage> {
        LocalStorage::get(storage_key(character_id)).unwrap_or_default()
    }

    fn save(&self, character_id: Uuid, transcript: &[ChatMessage]) {
        if let Err(e) = LocalStorage::set(storage_key(character_id), transcript) {
            tracing::error!("Failed to persist transcript: {:?}", e);
        }
    }

    fn clear(&self, character_id: Uuid) {
        LocalStorage::delete(storage_key(character_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_derived_from_the_character_id() {
        let id = Uuid::nil();
        assert_eq!(
            storage_key(id),
            "chat_00000000-0000-0000-0000-000000000000"
        );
    }
}
