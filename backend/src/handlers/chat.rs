use crate::AppState;
use crate::auth::AuthUser;
use crate::chat::ChatError;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use shared::models::{ChatFailure, ChatRequest};

/// `POST /api/chat`: one turn of conversation with a character persona.
/// Maps the service's error taxonomy onto the wire: 400 for local
/// validation, 500 with diagnostic and optional remediation hint for
/// provider-side failures.
pub async fn generate_reply(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ChatRequest>,
) -> axum::response::Response {
    tracing::debug!(
        user = %user_id,
        character = %payload.character_name,
        "chat turn requested"
    );

    match state.chat.generate(&payload).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(err @ ChatError::InvalidRequest(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ChatFailure {
                message: err.user_message().to_string(),
                error: None,
                suggestion: None,
            }),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatFailure {
                message: err.user_message().to_string(),
                error: err.raw().map(String::from),
                suggestion: err.suggestion().map(String::from),
            }),
        )
            .into_response(),
    }
}
