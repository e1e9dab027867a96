use async_trait::async_trait;
use shared::models::{Character, Story};
use thiserror::Error;
use uuid::Uuid;

pub mod local;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Record storage seam. Reads are scoped to the requesting user: a
/// record is visible to its owner or, for legacy ownerless records, to
/// everyone.
#[async_trait]
pub trait Database: Send + Sync {
    async fn get_characters(&self, user_id: &str) -> DbResult<Vec<Character>>;
    async fn get_character(&self, user_id: &str, character_id: Uuid) -> DbResult<Character>;
    async fn create_character(&self, character: Character) -> DbResult<()>;
    async fn delete_character(&self, user_id: &str, character_id: Uuid) -> DbResult<()>;
    async fn get_stories(&self, user_id: &str) -> DbResult<Vec<Story>>;
    async fn create_story(&self, story: Story) -> DbResult<()>;
    async fn add_character_to_story(&self, story_id: Uuid, character_id: Uuid) -> DbResult<()>;
}
