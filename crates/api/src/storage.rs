//! Room image object storage.
//!
//! Handlers talk to an [`ImageStore`]; production uses [`LocalImageStore`],
//! which writes into `MEDIA_ROOT` and is served back under the public URL
//! prefix by the static file service.

use std::path::PathBuf;

use async_trait::async_trait;
use hotel_core::media;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object key '{0}'")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat key/value store for uploaded room images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `bytes` under `key`, replacing any existing object.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Delete the object under `key`. Removing a missing object succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL clients use to fetch `key`.
    fn public_url(&self, key: &str) -> String;

    /// Inverse of [`ImageStore::public_url`]. `None` for URLs this store did
    /// not produce.
    fn key_for_url(&self, url: &str) -> Option<String>;
}

/// Stores images as files directly under `root`.
pub struct LocalImageStore {
    root: PathBuf,
    public_base: String,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    /// Keys are a single file name. `.` and `..` are refused as whole
    /// names; dots inside a name (`sea..view.png`) are fine.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !media::is_plain_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(key, size = bytes.len(), "Stored room image");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, key: &str) -> String {
        media::public_url(&self.public_base, key)
    }

    fn key_for_url(&self, url: &str) -> Option<String> {
        media::key_from_public_url(&self.public_base, url)
    }
}
