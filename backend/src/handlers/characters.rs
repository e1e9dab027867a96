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
use shared::models::{Character, CreateCharacterRequest};
use uuid::Uuid;

pub async fn list_characters(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Character>>, StatusCode> {
    let characters = state.db.get_characters(&user_id).await.map_err(|e| {
        tracing::error!("Failed to list characters: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(characters))
}

pub async fn create_character(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<Character>), (StatusCode, Json<Value>)> {
    if payload.name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Character name is required" })),
        ));
    }

    let character = Character {
        id: Uuid::new_v4(),
        user_id: Some(user_id),
        name: payload.name,
        description: payload.description,
        image_url: payload.image_url,
        created_at: Utc::now(),
    };

    state
        .db
        .create_character(character.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create character: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Failed to create character" })),
            )
        })?;

    Ok((StatusCode::CREATED, Json(character)))
}

pub async fn get_character(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(character_id): Path<Uuid>,
) -> Result<Json<Character>, StatusCode> {
    let character = state
        .db
        .get_character(&user_id, character_id)
        .await
        .map_err(|e| {
            if matches!(e, DbError::NotFound(_)) {
                StatusCode::NOT_FOUND
            } else {
                tracing::error!("Failed to get character: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;
    Ok(Json(character))
}

pub async fn delete_character(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(character_id): Path<Uuid>,
) -> Result<Json<()>, StatusCode> {
    state
        .db
        .delete_character(&user_id, character_id)
        .await
        .map_err(|e| {
            if matches!(e, DbError::NotFound(_)) {
                StatusCode::NOT_FOUND
            } else {
                tracing::error!("Failed to delete character: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;
    Ok(Json(()))
}
