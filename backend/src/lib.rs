pub mod auth;
pub mod chat;
pub mod dbs;
pub mod fallback;
pub mod handlers;
pub mod prompt;

use crate::chat::ChatService;
use crate::dbs::local::LocalDatabase;
use crate::handlers::{
    add_character_to_story, create_character, create_story, delete_character, generate_reply,
    get_character, list_characters, list_stories,
};
use axum::{
    Router,
    routing::{get, patch, post},
};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn dbs::Database>,
    pub chat: Arc<ChatService>,
}

pub fn init(router: Router<AppState>, db_path: Option<PathBuf>) -> Router<()> {
    let db = LocalDatabase::load(db_path);
    tracing::info!("Record store at {}", db.path().display());
    let state = AppState {
        db: Arc::new(RwLock::new(db)),
        chat: Arc::new(ChatService::from_env()),
    };

    router
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/characters",
            get(list_characters).post(create_character),
        )
        .route(
            "/api/characters/{character_id}",
            get(get_character).delete(delete_character),
        )
        .route("/api/stories", get(list_stories).post(create_story))
        .route("/api/stories/{story_id}", patch(add_character_to_story))
        .route("/api/chat", post(generate_reply))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
