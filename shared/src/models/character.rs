use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fictional character. Identity is immutable once created; records
/// without an owner are legacy entries visible to every user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: Uuid,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Character {
    /// Owner gating: a record is visible to its owner, and ownerless
    /// records are visible to everyone.
    pub fn visible_to(&self, user_id: &str) -> bool {
        match &self.user_id {
            Some(owner) => owner == user_id,
            None => true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreateCharacterRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}
