use crate::fallback::fallback_reply;
use crate::prompt::persona_prompt;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use shared::models::{ChatReply, ChatRequest};
use thiserror::Error;

const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";
const MODEL: &str = "openai/gpt-3.5-turbo";
const MAX_REPLY_TOKENS: u32 = 150;
/// Biased toward varied, characterful phrasing; this is roleplay, not
/// factual lookup.
const REPLY_TEMPERATURE: f32 = 0.8;
/// Substituted when the provider returns an empty completion.
const PLACEHOLDER_REPLY: &str = "Sorry, I cannot respond right now.";

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("provider rejected credentials: {raw}")]
    Configuration { raw: String },
    #[error("provider rate limited the request: {raw}")]
    Throttled { raw: String },
    #[error("provider quota exhausted: {raw}")]
    QuotaExceeded { raw: String },
    #[error("provider call failed: {raw}")]
    Provider { raw: String },
}

impl ChatError {
    /// Text shown to the end user, in-conversation.
    pub fn user_message(&self) -> &str {
        match self {
            ChatError::InvalidRequest(message) => message,
            ChatError::Configuration { .. } => {
                "OpenRouter API is not properly configured. Please check your environment variables."
            }
            ChatError::Throttled { .. } => {
                "Too many requests. Please wait a moment and try again."
            }
            ChatError::QuotaExceeded { .. } => {
                "OpenRouter quota exceeded. Please check your account."
            }
            ChatError::Provider { .. } => "Sorry, I encountered an error. Please try again.",
        }
    }

    /// Raw provider diagnostic, absent for local validation failures.
    pub fn raw(&self) -> Option<&str> {
        match self {
            ChatError::InvalidRequest(_) => None,
            ChatError::Configuration { raw }
            | ChatError::Throttled { raw }
            | ChatError::QuotaExceeded { raw }
            | ChatError::Provider { raw } => Some(raw),
        }
    }

    /// Remediation hint, only known for credential problems.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ChatError::Configuration { .. } => {
                Some("Check your environment for OPENROUTER_API_KEY")
            }
            _ => None,
        }
    }
}

/// Maps a provider failure description onto the error taxonomy by
/// substring, in priority order. Fragile by design: it mirrors the raw
/// text the provider emits today, and lives in one place so it can be
/// swapped for structured error codes without touching callers.
pub(crate) fn classify_provider_error(raw: String) -> ChatError {
    if raw.contains("API key") {
        ChatError::Configuration { raw }
    } else if raw.contains("rate limit") {
        ChatError::Throttled { raw }
    } else if raw.contains("quota") {
        ChatError::QuotaExceeded { raw }
    } else {
        ChatError::Provider { raw }
    }
}

/// Turns one user utterance plus a persona into an in-character reply.
///
/// With no credential configured every valid request takes the fallback
/// path. The live path issues a single chat completion with no retry
/// and, matching the original behavior, no timeout; a hung provider
/// hangs the turn.
pub struct ChatService {
    api_key: Option<String>,
    api_base: String,
}

impl ChatService {
    pub fn new(api_key: Option<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.is_empty()),
            api_base: api_base.into(),
        }
    }

    /// Reads the provider credential from `OPENROUTER_API_KEY`. An
    /// absent or empty variable selects the fallback path.
    pub fn from_env() -> Self {
        Self::new(std::env::var("OPENROUTER_API_KEY").ok(), DEFAULT_API_BASE)
    }

    pub async fn generate(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        if request.message.trim().is_empty() || request.character_name.trim().is_empty() {
            return Err(ChatError::InvalidRequest(
                "Message and character name are required".to_string(),
            ));
        }

        let Some(api_key) = &self.api_key else {
            tracing::debug!(
                character = %request.character_name,
                "no provider credential configured, using fallback reply"
            );
            return Ok(fallback_reply(
                &request.character_name,
                request.character_description.as_deref(),
            )
            .await);
        };

        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&self.api_base);
        let client = Client::with_config(config);

        let system_prompt = persona_prompt(
            &request.character_name,
            request.character_description.as_deref(),
        );

        let mut conversation: Vec<ChatCompletionRequestMessage> = Vec::new();
        if let Ok(msg) = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()
        {
            conversation.push(ChatCompletionRequestMessage::System(msg));
        }
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(request.message.clone())
            .build()
            .unwrap_or_default();
        conversation.push(ChatCompletionRequestMessage::User(user_msg));

        let completion_request = CreateChatCompletionRequestArgs::default()
            .model(MODEL)
            .messages(conversation)
            .max_tokens(MAX_REPLY_TOKENS)
            .temperature(REPLY_TEMPERATURE)
            .build()
            .map_err(|e| ChatError::Provider { raw: e.to_string() })?;

        let completion = client
            .chat()
            .create(completion_request)
            .await
            .map_err(|e| {
                tracing::error!("chat completion failed: {e}");
                classify_provider_error(e.to_string())
            })?;

        let response = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_REPLY.to_string());

        Ok(ChatReply {
            response,
            note: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FALLBACK_NOTE;

    fn valid_request() -> ChatRequest {
        ChatRequest {
            message: "Hi".to_string(),
            character_name: "Zara".to_string(),
            character_description: None,
        }
    }

    #[tokio::test]
    async fn empty_message_is_rejected_before_any_provider_call() {
        // An unroutable base would fail loudly if the call were attempted.
        let service = ChatService::new(Some("key".into()), "http://127.0.0.1:0");
        let request = ChatRequest {
            message: "".to_string(),
            ..valid_request()
        };

        let err = service.generate(&request).await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidRequest(_)));
        assert_eq!(err.user_message(), "Message and character name are required");
        assert_eq!(err.raw(), None);
    }

    #[tokio::test]
    async fn blank_character_name_is_rejected() {
        let service = ChatService::new(None, DEFAULT_API_BASE);
        let request = ChatRequest {
            character_name: "   ".to_string(),
            ..valid_request()
        };

        let err = service.generate(&request).await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidRequest(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn no_credential_always_takes_the_fallback_path() {
        let service = ChatService::new(None, DEFAULT_API_BASE);

        let reply = service.generate(&valid_request()).await.unwrap();
        assert!(!reply.response.is_empty());
        assert!(reply.response.contains("Zara"));
        assert_eq!(reply.note.as_deref(), Some(FALLBACK_NOTE));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_credential_counts_as_unconfigured() {
        let service = ChatService::new(Some(String::new()), DEFAULT_API_BASE);

        let reply = service.generate(&valid_request()).await.unwrap();
        assert_eq!(reply.note.as_deref(), Some(FALLBACK_NOTE));
    }

    #[test]
    fn classifies_credential_problems() {
        let err = classify_provider_error("Incorrect API key provided".to_string());
        assert!(matches!(err, ChatError::Configuration { .. }));
        assert_eq!(
            err.suggestion(),
            Some("Check your environment for OPENROUTER_API_KEY")
        );
    }

    #[test]
    fn classifies_rate_limiting() {
        let err = classify_provider_error("429: rate limit exceeded for model".to_string());
        assert!(matches!(err, ChatError::Throttled { .. }));
        assert_eq!(
            err.user_message(),
            "Too many requests. Please wait a moment and try again."
        );
    }

    #[test]
    fn classifies_quota_exhaustion() {
        let err = classify_provider_error("You have exceeded your quota".to_string());
        assert!(matches!(err, ChatError::QuotaExceeded { .. }));
    }

    #[test]
    fn unknown_failures_fall_through() {
        let err = classify_provider_error("connection reset by peer".to_string());
        assert!(matches!(err, ChatError::Provider { .. }));
        assert_eq!(
            err.user_message(),
            "Sorry, I encountered an error. Please try again."
        );
    }

    #[test]
    fn classification_order_is_credential_then_rate_limit_then_quota() {
        let err = classify_provider_error("API key rate limit quota".to_string());
        assert!(matches!(err, ChatError::Configuration { .. }));

        let err = classify_provider_error("rate limit because quota".to_string());
        assert!(matches!(err, ChatError::Throttled { .. }));
    }

    #[test]
    fn raw_diagnostic_is_preserved() {
        let err = classify_provider_error("rate limit hit at 12:00".to_string());
        assert_eq!(err.raw(), Some("rate limit hit at 12:00"));
    }
}
