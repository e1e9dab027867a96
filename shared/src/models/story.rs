use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A story groups characters by id. Same ownership rules as characters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: Uuid,
    #[serde(default)]
    pub user_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub character_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Story {
    pub fn visible_to(&self, user_id: &str) -> bool {
        match &self.user_id {
            Some(owner) => owner == user_id,
            None => true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreateStoryRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AddCharacterToStoryRequest {
    pub character_id: Uuid,
}
