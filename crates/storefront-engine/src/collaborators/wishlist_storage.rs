//! Wishlist persistence: an in-memory store and a JSON file store.

use super::WishlistStorage;
use crate::model::ProductId;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WishlistError {
    #[error("Wishlist storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Wishlist file is not a JSON array of ids: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Wishlist storage unavailable: {0}")]
    Unavailable(String),
}

/// Keeps the ids for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryWishlistStorage {
    ids: Mutex<Vec<ProductId>>,
}

impl MemoryWishlistStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WishlistStorage for MemoryWishlistStorage {
    async fn read(&self) -> Result<Vec<ProductId>, WishlistError> {
        Ok(self.ids.lock().await.clone())
    }

    async fn write(&self, ids: &[ProductId]) -> Result<(), WishlistError> {
        *self.ids.lock().await = ids.to_vec();
        Ok(())
    }
}

/// Stores the ids as a JSON array in one file. A missing file reads as an empty list.
#[derive(Debug)]
pub struct JsonFileWishlistStorage {
    path: PathBuf,
}

impl JsonFileWishlistStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WishlistStorage for JsonFileWishlistStorage {
    async fn read(&self) -> Result<Vec<ProductId>, WishlistError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, ids: &[ProductId]) -> Result<(), WishlistError> {
        let bytes = serde_json::to_vec(ids)?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), count = ids.len(), "Wishlist written");
        Ok(())
    }
}
