//! Configuration row store trait and the in-memory implementation.
//!
//! A guild's configuration for one feature area is a single **row**: a map of
//! column name to JSON value, keyed by `(guild_id, table)`. A missing row, a
//! missing column, and a JSON `null` all mean "unset, use the default".
//!
//! Rows are written whole. [`ConfigStore::save`] replaces the previous row in
//! one step so that a reader never observes half of a batch.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;

use crate::error::{StorageError, StorageResult};

/// A stored configuration row: column name to JSON value.
pub type ConfigRow = BTreeMap<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a table name is safe for use as a key or a directory name.
///
/// Table names must be non-empty and consist of ASCII alphanumerics,
/// `_` or `-`.
pub(crate) fn validate_table(table: &str) -> StorageResult<()> {
    if table.is_empty() {
        return Err(StorageError::InvalidTable(
            "table name must not be empty".into(),
        ));
    }
    if !table
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(StorageError::InvalidTable(table.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Persistence collaborator for guild configuration rows.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the row for a guild and table.
    ///
    /// Returns `None` if nothing was ever saved (or the row was reset).
    async fn load(&self, guild_id: u64, table: &str) -> StorageResult<Option<ConfigRow>>;

    /// Replace the row for a guild and table.
    async fn save(&self, guild_id: u64, table: &str, row: ConfigRow) -> StorageResult<()>;

    /// Restore defaults by deleting the row.
    ///
    /// Returns `true` if a row existed.
    async fn reset(&self, guild_id: u64, table: &str) -> StorageResult<bool>;
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// In-memory row store for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    rows: std::sync::RwLock<HashMap<(u64, String), ConfigRow>>,
}

impl MemoryConfigStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows across all guilds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the lock is poisoned.
    pub fn len(&self) -> StorageResult<usize> {
        let rows = self
            .rows
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        Ok(rows.len())
    }

    /// Whether the store holds no rows.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the lock is poisoned.
    pub fn is_empty(&self) -> StorageResult<bool> {
        self.len().map(|n| n == 0)
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn load(&self, guild_id: u64, table: &str) -> StorageResult<Option<ConfigRow>> {
        validate_table(table)?;
        let rows = self
            .rows
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        Ok(rows.get(&(guild_id, table.to_string())).cloned())
    }

    async fn save(&self, guild_id: u64, table: &str, row: ConfigRow) -> StorageResult<()> {
        validate_table(table)?;
        let mut rows = self
            .rows
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        rows.insert((guild_id, table.to_string()), row);
        Ok(())
    }

    async fn reset(&self, guild_id: u64, table: &str) -> StorageResult<bool> {
        validate_table(table)?;
        let mut rows = self
            .rows
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        Ok(rows.remove(&(guild_id, table.to_string())).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(prefix: &str) -> ConfigRow {
        let mut row = ConfigRow::new();
        row.insert("prefix".into(), json!(prefix));
        row.insert("locale".into(), serde_json::Value::Null);
        row
    }

    #[tokio::test]
    async fn load_missing_row_is_none() {
        let store = MemoryConfigStore::new();
        assert!(store.load(1, "core_config").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_whole_row() {
        let store = MemoryConfigStore::new();
        store.save(1, "core_config", row("!")).await.unwrap();

        let mut second = ConfigRow::new();
        second.insert("prefix".into(), json!("?"));
        store.save(1, "core_config", second).await.unwrap();

        let loaded = store.load(1, "core_config").await.unwrap().unwrap();
        assert_eq!(loaded.get("prefix"), Some(&json!("?")));
        assert!(!loaded.contains_key("locale"));
    }

    #[tokio::test]
    async fn rows_are_scoped_per_guild_and_table() {
        let store = MemoryConfigStore::new();
        store.save(1, "core_config", row("!")).await.unwrap();
        store.save(2, "core_config", row("?")).await.unwrap();
        store.save(1, "music", row("m")).await.unwrap();

        assert_eq!(store.len().unwrap(), 3);
        let one = store.load(1, "core_config").await.unwrap().unwrap();
        assert_eq!(one.get("prefix"), Some(&json!("!")));
        let two = store.load(2, "core_config").await.unwrap().unwrap();
        assert_eq!(two.get("prefix"), Some(&json!("?")));
    }

    #[tokio::test]
    async fn reset_reports_existence() {
        let store = MemoryConfigStore::new();
        assert!(!store.reset(1, "core_config").await.unwrap());
        store.save(1, "core_config", row("!")).await.unwrap();
        assert!(store.reset(1, "core_config").await.unwrap());
        assert!(store.load(1, "core_config").await.unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn invalid_table_names_rejected() {
        let store = MemoryConfigStore::new();
        assert!(matches!(
            store.load(1, "").await,
            Err(StorageError::InvalidTable(_))
        ));
        assert!(matches!(
            store.save(1, "../etc", ConfigRow::new()).await,
            Err(StorageError::InvalidTable(_))
        ));
    }
}
