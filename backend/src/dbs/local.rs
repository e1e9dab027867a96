use super::{Database, DbError, DbResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{Character, Story};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use uuid::Uuid;

const DB_PATH: &str = "db.json";

/// JSON-file record store. The whole file is rewritten on every
/// mutation; fine at this scale and trivially portable.
#[derive(Serialize, Deserialize, Default)]
pub struct LocalDatabase {
    #[serde(skip)]
    path: PathBuf,
    pub characters: Vec<Character>,
    pub stories: Vec<Story>,
}

impl LocalDatabase {
    pub fn load(path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(|| PathBuf::from(DB_PATH));
        let mut db = if let Ok(content) = std::fs::read_to_string(&path) {
            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {}: {e}, starting empty", path.display());
                Self::default()
            })
        } else {
            Self::default()
        };
        db.path = path;
        db
    }

    fn save(&self) -> DbResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&self.path, content)
            .map_err(|e| DbError::Internal(format!("Failed to write {}: {e}", self.path.display())))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Database for RwLock<LocalDatabase> {
    async fn get_characters(&self, user_id: &str) -> DbResult<Vec<Character>> {
        let db = self.read().unwrap();
        let mut characters: Vec<Character> = db
            .characters
            .iter()
            .filter(|c| c.visible_to(user_id))
            .cloned()
            .collect();
        characters.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(characters)
    }

    async fn get_character(&self, user_id: &str, character_id: Uuid) -> DbResult<Character> {
        let db = self.read().unwrap();
        db.characters
            .iter()
            .find(|c| c.id == character_id && c.visible_to(user_id))
            .cloned()
            .ok_or_else(|| DbError::NotFound(format!("character {character_id}")))
    }

    async fn create_character(&self, character: Character) -> DbResult<()> {
        let mut db = self.write().unwrap();
        db.characters.push(character);
        db.save()
    }

    async fn delete_character(&self, user_id: &str, character_id: Uuid) -> DbResult<()> {
        let mut db = self.write().unwrap();
        let before = db.characters.len();
        db.characters
            .retain(|c| !(c.id == character_id && c.visible_to(user_id)));
        if db.characters.len() == before {
            return Err(DbError::NotFound(format!("character {character_id}")));
        }
        db.save()
    }

    async fn get_stories(&self, user_id: &str) -> DbResult<Vec<Story>> {
        let db = self.read().unwrap();
        let mut stories: Vec<Story> = db
            .stories
            .iter()
            .filter(|s| s.visible_to(user_id))
            .cloned()
            .collect();
        stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(stories)
    }

    async fn create_story(&self, story: Story) -> DbResult<()> {
        let mut db = self.write().unwrap();
        db.stories.push(story);
        db.save()
    }

    async fn add_character_to_story(&self, story_id: Uuid, character_id: Uuid) -> DbResult<()> {
        let mut db = self.write().unwrap();
        let story = db
            .stories
            .iter_mut()
            .find(|s| s.id == story_id)
            .ok_or_else(|| DbError::NotFound(format!("story {story_id}")))?;
        story.character_ids.push(character_id);
        db.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn character(owner: Option<&str>, name: &str) -> Character {
        Character {
            id: Uuid::new_v4(),
            user_id: owner.map(String::from),
            name: name.to_string(),
            description: String::new(),
            image_url: None,
            created_at: Utc::now(),
        }
    }

    fn story(owner: Option<&str>, title: &str) -> Story {
        Story {
            id: Uuid::new_v4(),
            user_id: owner.map(String::from),
            title: title.to_string(),
            description: String::new(),
            character_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn temp_db(dir: &tempfile::TempDir) -> RwLock<LocalDatabase> {
        RwLock::new(LocalDatabase::load(Some(dir.path().join("db.json"))))
    }

    #[tokio::test]
    async fn owner_gating_on_listing() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(&dir);
        db.create_character(character(Some("alice"), "Zara"))
            .await
            .unwrap();
        db.create_character(character(Some("bob"), "Kato"))
            .await
            .unwrap();
        db.create_character(character(None, "Legacy")).await.unwrap();

        let names: Vec<String> = db
            .get_characters("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert!(names.contains(&"Zara".to_string()));
        assert!(names.contains(&"Legacy".to_string()));
        assert!(!names.contains(&"Kato".to_string()));
    }

    #[tokio::test]
    async fn delete_refuses_records_of_other_owners() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(&dir);
        let kato = character(Some("bob"), "Kato");
        let kato_id = kato.id;
        db.create_character(kato).await.unwrap();

        let err = db.delete_character("alice", kato_id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
        assert_eq!(db.get_characters("bob").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn legacy_ownerless_records_can_be_deleted_by_anyone() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(&dir);
        let legacy = character(None, "Legacy");
        let legacy_id = legacy.id;
        db.create_character(legacy).await.unwrap();

        db.delete_character("alice", legacy_id).await.unwrap();
        assert!(db.get_characters("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listings_are_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(&dir);
        let mut old = character(Some("alice"), "Old");
        old.created_at = Utc::now() - chrono::Duration::hours(1);
        db.create_character(old).await.unwrap();
        db.create_character(character(Some("alice"), "New"))
            .await
            .unwrap();

        let names: Vec<String> = db
            .get_characters("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["New".to_string(), "Old".to_string()]);
    }

    #[tokio::test]
    async fn stories_collect_character_ids() {
        let dir = tempfile::tempdir().unwrap();
        let db = temp_db(&dir);
        let tale = story(Some("alice"), "The Voyage");
        let tale_id = tale.id;
        db.create_story(tale).await.unwrap();

        let zara = Uuid::new_v4();
        db.add_character_to_story(tale_id, zara).await.unwrap();

        let stories = db.get_stories("alice").await.unwrap();
        assert_eq!(stories[0].character_ids, vec![zara]);

        let err = db
            .add_character_to_story(Uuid::new_v4(), zara)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[tokio::test]
    async fn survives_a_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        {
            let db = RwLock::new(LocalDatabase::load(Some(path.clone())));
            db.create_character(character(Some("alice"), "Zara"))
                .await
                .unwrap();
        }

        let reloaded = RwLock::new(LocalDatabase::load(Some(path)));
        let characters = reloaded.get_characters("alice").await.unwrap();
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].name, "Zara");
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{not json").unwrap();

        let db = LocalDatabase::load(Some(path));
        assert!(db.characters.is_empty());
        assert!(db.stories.is_empty());
    }
}
