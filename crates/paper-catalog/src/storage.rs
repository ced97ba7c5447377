//! # Upload Storage
//!
//! Uploaded PDFs live on disk under the configured upload directory, in a `papers/`
//! subdirectory. Papers record the *public* path of their file (`uploads/papers/<name>`),
//! which is also where the HTTP layer serves the directory read-only.

use crate::error::StorageError;
use chrono::Utc;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Public prefix of stored files.
pub const PUBLIC_PREFIX: &str = "uploads";
const PAPERS_DIR: &str = "papers";

/// A file part received with an upload request, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A file written to the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Public path, e.g. `uploads/papers/file-1700000000000-3f2a….pdf`.
    pub path: String,
    /// Name the file was uploaded under.
    pub name: String,
    pub size: u64,
}

/// Handle to the upload directory. Cheap to clone.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_bytes: u64,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Largest accepted upload, in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Creates the directory layout if it does not exist yet.
    pub async fn init(&self) -> Result<(), StorageError> {
        self.ensure_dir().await?;
        info!(root = %self.root.display(), "Upload directory ready");
        Ok(())
    }

    async fn ensure_dir(&self) -> Result<(), StorageError> {
        let dir = self.root.join(PAPERS_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StorageError::Io {
                action: "create",
                path: dir,
                source,
            })
    }

    /// Writes `bytes` under a fresh unique name and returns where they went.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile, StorageError> {
        self.ensure_dir().await?;
        let name = format!(
            "file-{}-{}.pdf",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        );
        let disk = self.root.join(PAPERS_DIR).join(&name);
        tokio::fs::write(&disk, bytes)
            .await
            .map_err(|source| StorageError::Io {
                action: "write",
                path: disk.clone(),
                source,
            })?;

        let path = format!("{PUBLIC_PREFIX}/{PAPERS_DIR}/{name}");
        debug!(%path, size = bytes.len(), "Stored upload");
        Ok(StoredFile {
            path,
            name: original_name.to_string(),
            size: bytes.len() as u64,
        })
    }

    /// Maps a public path back to its location on disk. Rejects paths that would
    /// escape the upload directory.
    pub fn resolve(&self, public_path: &str) -> Result<PathBuf, StorageError> {
        let relative = public_path
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| StorageError::OutsideRoot(public_path.to_string()))?;

        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(StorageError::OutsideRoot(public_path.to_string()));
        }
        Ok(self.root.join(relative))
    }

    pub async fn exists(&self, public_path: &str) -> Result<bool, StorageError> {
        let disk = self.resolve(public_path)?;
        tokio::fs::try_exists(&disk)
            .await
            .map_err(|source| StorageError::Io {
                action: "inspect",
                path: disk,
                source,
            })
    }

    pub async fn read(&self, public_path: &str) -> Result<Vec<u8>, StorageError> {
        let disk = self.resolve(public_path)?;
        tokio::fs::read(&disk)
            .await
            .map_err(|source| StorageError::Io {
                action: "read",
                path: disk,
                source,
            })
    }

    /// Deletes a stored file. Returns `false` if it was already gone.
    pub async fn remove(&self, public_path: &str) -> Result<bool, StorageError> {
        let disk = self.resolve(public_path)?;
        match tokio::fs::remove_file(&disk).await {
            Ok(()) => {
                debug!(path = public_path, "Removed upload");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StorageError::Io {
                action: "remove",
                path: disk,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saved_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path(), 1024);

        let stored = store.save("midterm.pdf", b"%PDF-1.4 body").await.unwrap();
        assert!(stored.path.starts_with("uploads/papers/file-"));
        assert_eq!(stored.name, "midterm.pdf");
        assert_eq!(stored.size, 13);

        assert!(store.exists(&stored.path).await.unwrap());
        assert_eq!(store.read(&stored.path).await.unwrap(), b"%PDF-1.4 body");

        assert!(store.remove(&stored.path).await.unwrap());
        assert!(!store.exists(&stored.path).await.unwrap());
        assert!(!store.remove(&stored.path).await.unwrap());
    }

    #[test]
    fn paths_cannot_escape_the_root() {
        let store = UploadStore::new("/srv/uploads", 1024);
        assert!(store.resolve("uploads/../etc/passwd").is_err());
        assert!(store.resolve("/etc/passwd").is_err());
        assert!(store.resolve("elsewhere/papers/a.pdf").is_err());
        assert_eq!(
            store.resolve("uploads/papers/a.pdf").unwrap(),
            PathBuf::from("/srv/uploads/papers/a.pdf")
        );
    }
}
