//! JSON-file row store.
//!
//! Layout: `{root}/{table}/{guild_id}.json`. Each save writes a temporary
//! file in the same directory and renames it over the target, so a row is
//! either fully replaced or left as it was.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::store::{ConfigRow, ConfigStore, validate_table};

/// Row store persisting one JSON document per guild and table.
#[derive(Debug, Clone)]
pub struct JsonFileConfigStore {
    root: PathBuf,
}

impl JsonFileConfigStore {
    /// Create a store rooted at `root`. The directory is created lazily.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn row_path(&self, guild_id: u64, table: &str) -> PathBuf {
        self.root.join(table).join(format!("{guild_id}.json"))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> StorageResult<()> {
    let dir = path
        .parent()
        .ok_or_else(|| StorageError::Internal(format!("no parent for {}", path.display())))?;
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StorageError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl ConfigStore for JsonFileConfigStore {
    async fn load(&self, guild_id: u64, table: &str) -> StorageResult<Option<ConfigRow>> {
        validate_table(table)?;
        let path = self.row_path(guild_id, table);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let row = serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::Serialization(format!("{}: {e}", path.display())))?;
        Ok(Some(row))
    }

    async fn save(&self, guild_id: u64, table: &str, row: ConfigRow) -> StorageResult<()> {
        validate_table(table)?;
        let path = self.row_path(guild_id, table);
        let bytes = serde_json::to_vec_pretty(&row)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        debug!(guild_id, table, path = %path.display(), "Writing configuration row");
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))?
    }

    async fn reset(&self, guild_id: u64, table: &str) -> StorageResult<bool> {
        validate_table(table)?;
        let path = self.row_path(guild_id, table);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
