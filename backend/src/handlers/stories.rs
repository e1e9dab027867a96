use crate::AppState;
use crate::auth::AuthUser;
use crate::dbs::DbError;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{Value, json};
use shared::models::{AddCharacterToStoryRequest, CreateStoryRequest, Story};
use uuid::Uuid;

pub async fn list_stories(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Story>>, StatusCode> {
    let stories = state.db.get_stories(&user_id).await.map_err(|e| {
        tracing::error!("Failed to list stories: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(stories))
}

pub async fn create_story(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateStoryRequest>,
) -> Result<(StatusCode, Json<Story>), (StatusCode, Json<Value>)> {
    if payload.title.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Title is required" })),
        ));
    }

    let story = Story {
        id: Uuid::new_v4(),
        user_id: Some(user_id),
        title: payload.title,
        description: payload.description,
        character_ids: Vec::new(),
        created_at: Utc::now(),
    };

    state.db.create_story(story.clone()).await.map_err(|e| {
        tracing::error!("Failed to create story: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Failed to create story" })),
        )
    })?;

    Ok((StatusCode::CREATED, Json(story)))
}

pub async fn add_character_to_story(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(story_id): Path<Uuid>,
    Json(payload): Json<AddCharacterToStoryRequest>,
) -> Result<Json<()>, StatusCode> {
    state
        .db
        .add_character_to_story(story_id, payload.character_id)
        .await
        .map_err(|e| {
            if matches!(e, DbError::NotFound(_)) {
                StatusCode::NOT_FOUND
            } else {
                tracing::error!("Failed to add character to story: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;
    Ok(Json(()))
}
