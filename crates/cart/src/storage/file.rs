//! File-backed storage.
//!
//! Each key maps to `<dir>/<percent-encoded key>.json`. Writes go to a
//! temporary sibling file which is then renamed over the target, so readers
//! never observe a partially written value.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStorage, StorageError};

/// Storage in a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl KeyValueStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "Wrote storage item");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_encodes_key() {
        let storage = FileStorage::new("/data");
        assert_eq!(
            storage.path_for("@GoMarket:products"),
            PathBuf::from("/data/%40GoMarket%3Aproducts.json")
        );
    }

    #[test]
    fn test_path_for_cannot_escape_dir() {
        let storage = FileStorage::new("/data");
        let path = storage.path_for("../../etc/passwd");
        assert_eq!(path.parent(), Some(Path::new("/data")));
    }

    #[tokio::test]
    async fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_dir_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set_item("cart", "first").await.unwrap();
        storage.set_item("cart", "second").await.unwrap();

        assert_eq!(storage.get_item("cart").await.unwrap().as_deref(), Some("second"));
        assert!(!storage.path_for("cart").with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_remove_missing_key_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.remove_item("cart").await.unwrap();
        storage.set_item("cart", "x").await.unwrap();
        storage.remove_item("cart").await.unwrap();
        assert_eq!(storage.get_item("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        // A directory where the file should be cannot be read as a string.
        std::fs::create_dir(storage.path_for("cart")).unwrap();

        assert!(matches!(
            storage.get_item("cart").await,
            Err(StorageError::Io(_))
        ));
    }
}
