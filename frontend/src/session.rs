use crate::storage::TranscriptStore;
use shared::models::{ChatMessage, ROLE_CHARACTER, ROLE_SYSTEM, ROLE_USER};
use uuid::Uuid;

pub const NETWORK_ERROR_TEXT: &str = "Network error. Please check your connection.";

/// Resolution of one chat turn, as mapped from the API by `crate::api`.
/// Every case resolves the session back to idle; nothing is fatal.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnOutcome {
    /// In-character reply; `note` is set when the fallback path answered
    /// and must be shown separately from the reply.
    Reply {
        content: String,
        note: Option<String>,
    },
    /// Classified backend failure with user-facing text and, when known,
    /// a remediation hint.
    Failed {
        message: String,
        suggestion: Option<String>,
    },
    /// Transport-level failure before the service answered.
    NetworkError,
}

/// One character's conversation view: the transcript plus the in-flight
/// guard. At most one turn is in flight per session; the transcript is
/// append-only within a session and persisted whole on every append.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatSession {
    pub character_id: Uuid,
    pub transcript: Vec<ChatMessage>,
    pub is_sending: bool,
}

impl ChatSession {
    /// Rehydrate the session from durable storage.
    pub fn open(character_id: Uuid, store: &impl TranscriptStore) -> Self {
        Self {
            character_id,
            transcript: store.load(character_id),
            is_sending: false,
        }
    }

    /// Start a turn: append the user message optimistically and enter
    /// the sending state. Returns false, touching nothing, when the
    /// text is blank or another turn is still in flight.
    pub fn begin_turn(&mut self, text: &str, store: &impl TranscriptStore) -> bool {
        if text.trim().is_empty() || self.is_sending {
            return false;
        }
        self.push(ChatMessage::new(ROLE_USER, text), store);
        self.is_sending = true;
        true
    }

    /// Resolve the in-flight turn and return to idle. An outcome with
    /// no matching in-flight turn is dropped, so a stray resolution can
    /// never append an unmatched reply.
    pub fn finish_turn(&mut self, outcome: TurnOutcome, store: &impl TranscriptStore) {
        if !self.is_sending {
            return;
        }
        match outcome {
            TurnOutcome::Reply { content, note } => {
                self.push(ChatMessage::new(ROLE_CHARACTER, content), store);
                if let Some(note) = note {
                    self.push(ChatMessage::new(ROLE_SYSTEM, format!("ℹ️ {note}")), store);
                }
            }
            TurnOutcome::Failed {
                message,
                suggestion,
            } => {
                self.push(ChatMessage::new(ROLE_SYSTEM, message), store);
                if let Some(suggestion) = suggestion {
                    self.push(
                        ChatMessage::new(ROLE_SYSTEM, format!("💡 {suggestion}")),
                        store,
                    );
                }
            }
            TurnOutcome::NetworkError => {
                self.push(ChatMessage::new(ROLE_SYSTEM, NETWORK_ERROR_TEXT), store);
            }
        }
        self.is_sending = false;
    }

    /// Wipe the transcript, in memory and in durable storage.
    pub fn clear(&mut self, store: &impl TranscriptStore) {
        self.transcript.clear();
        store.clear(self.character_id);
    }

    fn push(&mut self, message: ChatMessage, store: &impl TranscriptStore) {
        self.transcript.push(message);
        store.save(self.character_id, &self.transcript);
    }
}
