//! JSON-file record store.
//!
//! One pretty-printed JSON document per character at
//! `<root>/<owner>/<name>.json`. Owner and name are encoded so that any valid
//! name maps to exactly one file name.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use charsheet_domain::{Character, CharacterName, OwnerId};

use crate::infrastructure::ports::{CharacterRepo, RepoError};

const EXTENSION: &str = "json";

/// Filesystem implementation of the record store.
pub struct JsonFileCharacterRepo {
    root: PathBuf,
}

impl JsonFileCharacterRepo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn owner_dir(&self, owner: &OwnerId) -> PathBuf {
        self.root.join(encode_component(owner.as_str()))
    }

    fn record_path(&self, owner: &OwnerId, name: &CharacterName) -> PathBuf {
        self.owner_dir(owner)
            .join(format!("{}.{}", encode_component(name.as_str()), EXTENSION))
    }

    async fn read_record(path: &Path) -> Result<Option<Character>, RepoError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepoError::io("load", e)),
        };
        let character =
            serde_json::from_str(&content).map_err(RepoError::serialization)?;
        Ok(Some(character))
    }
}

/// Keep ASCII alphanumerics, escape everything else as `_<hex>_`.
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            encoded.push(c);
        } else {
            encoded.push_str(&format!("_{:x}_", u32::from(c)));
        }
    }
    encoded
}

#[async_trait]
impl CharacterRepo for JsonFileCharacterRepo {
    async fn load(
        &self,
        owner: &OwnerId,
        name: &CharacterName,
    ) -> Result<Option<Character>, RepoError> {
        Self::read_record(&self.record_path(owner, name)).await
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        let dir = self.owner_dir(character.owner());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| RepoError::io("save", e))?;

        let content =
            serde_json::to_string_pretty(character).map_err(RepoError::serialization)?;

        // Write to temp file first, then rename for atomicity
        let path = self.record_path(character.owner(), character.name());
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &content)
            .await
            .map_err(|e| RepoError::io("save", e))?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(RepoError::io("save", e));
        }
        Ok(())
    }

    async fn list(&self, owner: &OwnerId) -> Result<Vec<Character>, RepoError> {
        let mut entries = match tokio::fs::read_dir(self.owner_dir(owner)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RepoError::io("list", e)),
        };

        let mut characters = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RepoError::io("list", e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            match Self::read_record(&path).await {
                Ok(Some(character)) => characters.push(character),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable record");
                }
            }
        }
        characters.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(characters)
    }

    async fn delete(&self, owner: &OwnerId, name: &CharacterName) -> Result<(), RepoError> {
        match tokio::fs::remove_file(self.record_path(owner, name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(RepoError::not_found("Character", name))
            }
            Err(e) => Err(RepoError::io("delete", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charsheet_domain::{CharacterClass, Race};

    fn owner(id: &str) -> OwnerId {
        OwnerId::new(id).unwrap()
    }

    fn character(owner_id: &str, name: &str) -> Character {
        Character::create(
            owner(owner_id),
            CharacterName::new(name).unwrap(),
            Race::Gnome,
            CharacterClass::Wizard,
            1,
            &[8, 14, 12, 16, 10, 11],
        )
        .unwrap()
    }

    #[test]
    fn encoding_is_injective_for_lookalike_names() {
        assert_eq!(encode_component("Aria"), "Aria");
        assert_ne!(encode_component("Mr. T"), encode_component("Mr_ T"));
        assert_ne!(encode_component("a/b"), encode_component("a_b"));
        assert!(!encode_component("../etc").contains('/'));
        assert!(!encode_component("../etc").contains('.'));
    }

    #[tokio::test]
    async fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileCharacterRepo::new(dir.path());
        let pc = character("42", "Sir Reginald");

        repo.save(&pc).await.unwrap();
        let loaded = repo.load(&owner("42"), pc.name()).await.unwrap();
        assert_eq!(loaded, Some(pc));
    }

    #[tokio::test]
    async fn load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileCharacterRepo::new(dir.path());
        let name = CharacterName::new("Nobody").unwrap();
        assert!(repo.load(&owner("42"), &name).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_scoped_by_owner_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileCharacterRepo::new(dir.path());
        repo.save(&character("1", "Zed")).await.unwrap();
        repo.save(&character("1", "Aria")).await.unwrap();
        repo.save(&character("2", "Brom")).await.unwrap();

        let names: Vec<String> = repo
            .list(&owner("1"))
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["Aria", "Zed"]);
        assert!(repo.list(&owner("3")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_overwrites_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileCharacterRepo::new(dir.path());
        let mut pc = character("1", "Aria");
        repo.save(&pc).await.unwrap();
        pc.set_armor_class(15);
        repo.save(&pc).await.unwrap();

        let loaded = repo.load(&owner("1"), pc.name()).await.unwrap().unwrap();
        assert_eq!(loaded.progression().armor_class(), 15);

        let files: Vec<_> = std::fs::read_dir(dir.path().join("1"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_record_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileCharacterRepo::new(dir.path());
        let pc = character("1", "Aria");
        repo.save(&pc).await.unwrap();

        repo.delete(&owner("1"), pc.name()).await.unwrap();
        assert!(repo.load(&owner("1"), pc.name()).await.unwrap().is_none());
        assert!(repo
            .delete(&owner("1"), pc.name())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn corrupt_record_is_skipped_by_list() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileCharacterRepo::new(dir.path());
        repo.save(&character("1", "Aria")).await.unwrap();
        std::fs::write(dir.path().join("1").join("Broken.json"), "{ not json").unwrap();

        let listed = repo.list(&owner("1")).await.unwrap();
        assert_eq!(listed.len(), 1);
    }
}
