use super::KeyValueStore;
use crate::error::CoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// JSON-object file holding string entries.
///
/// Every mutation rewrites the whole file through a temp file in the same
/// directory followed by a rename, so readers observe either the previous
/// or the new contents, never a mix.
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, CoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Entries to rewrite from. An unparseable file is dropped so the next
    /// write replaces it; the flag reports that a rewrite is owed.
    async fn load_for_write(&self) -> Result<(BTreeMap<String, String>, bool), CoreError> {
        match self.load().await {
            Ok(entries) => Ok((entries, false)),
            Err(CoreError::Serialization(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Discarding unreadable store file"
                );
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(entries)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = tokio::fs::File::create(&tmp_path).await?;
        tmp_file.write_all(&json).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf, CoreError> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| CoreError::Storage(format!("invalid store path {:?}", self.path)))?;

        let mut tmp_name = std::ffi::OsString::from(".");
        tmp_name.push(file_name);
        tmp_name.push(".tmp");

        Ok(self.path.with_file_name(tmp_name))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.load().await?.remove(key))
    }

    async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, CoreError> {
        let mut entries = self.load().await?;
        Ok(keys.iter().map(|key| entries.remove(*key)).collect())
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;

        let (mut current, _) = self.load_for_write().await?;
        for (key, value) in entries {
            current.insert((*key).to_string(), (*value).to_string());
        }
        self.save(&current).await
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;

        let (mut current, discarded) = self.load_for_write().await?;
        let before = current.len();
        for key in keys {
            current.remove(*key);
        }

        if current.len() == before && !discarded {
            return Ok(());
        }
        self.save(&current).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));

        assert_eq!(store.get("userKey").await.unwrap(), None);
    }

    #[tokio::test]
    async fn entries_survive_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileStore::new(&path)
            .set_many(&[("userKey", "abc"), ("mail", "a@b.c")])
            .await
            .unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get_many(&["userKey", "mail", "role"]).await.unwrap(),
            vec![Some("abc".to_string()), Some("a@b.c".to_string()), None]
        );
        assert!(!path.with_file_name(".session.json.tmp").exists());
    }

    #[tokio::test]
    async fn remove_many_keeps_other_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));

        store
            .set_many(&[("userKey", "abc"), ("theme", "dark")])
            .await
            .unwrap();
        store.remove_many(&["userKey", "mail"]).await.unwrap();

        assert_eq!(store.get("userKey").await.unwrap(), None);
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("userKey").await,
            Err(CoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn write_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ truncated").unwrap();

        let store = FileStore::new(&path);
        store
            .set_many(&[("userKey", "abc"), ("mail", "a@b.c")])
            .await
            .unwrap();

        assert_eq!(store.get("userKey").await.unwrap().as_deref(), Some("abc"));
        assert_eq!(store.get("mail").await.unwrap().as_deref(), Some("a@b.c"));
    }

    #[tokio::test]
    async fn remove_many_clears_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ truncated").unwrap();

        let store = FileStore::new(&path);
        store.remove_many(&["userKey"]).await.unwrap();

        assert_eq!(store.get("userKey").await.unwrap(), None);
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
    }
}
