//! Configurators: named bundles of entries scoped to one guild.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use guildconf_storage::{ConfigRow, ConfigStore};
use serde_json::Value;
use tracing::{debug, info};

use crate::entry::ConfigEntry;
use crate::error::{CoreError, CoreResult};
use crate::ids::GuildId;
use crate::value::EntryValue;

/// Side effect run after a configurator's values were committed.
///
/// Fires after a successful save and after a successful reset (with every
/// entry unset), so in-process caches can follow the stored state.
#[async_trait]
pub trait CommitHook: Send + Sync {
    /// Called with the committed entries.
    async fn committed(&self, guild_id: GuildId, entries: &[ConfigEntry]);
}

/// An unhydrated configurator: the shape of the entries without values.
#[derive(Clone)]
pub struct ConfiguratorTemplate {
    table: String,
    name: String,
    description: String,
    entries: Vec<ConfigEntry>,
    hook: Option<Arc<dyn CommitHook>>,
}

impl ConfiguratorTemplate {
    /// Start a template for `table`, shown to operators as `name`.
    pub fn new(
        table: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            description: description.into(),
            entries: Vec::new(),
            hook: None,
        }
    }

    /// Append an entry. Declaration order is display and edit order.
    #[must_use]
    pub fn entry(mut self, entry: ConfigEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Run `hook` after every commit.
    #[must_use]
    pub fn on_commit(mut self, hook: Arc<dyn CommitHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Storage table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Load the guild's stored row and bind the template to it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Storage`] if the load fails and
    /// [`CoreError::Decode`] if a stored column does not fit its entry.
    pub async fn hydrate(
        self,
        guild_id: GuildId,
        store: Arc<dyn ConfigStore>,
    ) -> CoreResult<GuildConfigurator> {
        let row = store.load(guild_id.get(), &self.table).await?;
        let mut entries = self.entries;
        if let Some(row) = row {
            for entry in &mut entries {
                let stored = row.get(entry.key()).unwrap_or(&Value::Null);
                let value = EntryValue::from_json(entry.kind(), stored).map_err(|source| {
                    CoreError::Decode {
                        table: self.table.clone(),
                        column: entry.key().to_string(),
                        source,
                    }
                })?;
                entry.load(value);
            }
        }
        debug!(guild_id = %guild_id, table = %self.table, "Hydrated configurator");
        Ok(GuildConfigurator {
            table: self.table,
            name: self.name,
            description: self.description,
            guild_id,
            entries,
            store,
            hook: self.hook,
        })
    }
}

impl fmt::Debug for ConfiguratorTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguratorTemplate")
            .field("table", &self.table)
            .field("name", &self.name)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

/// A configurator bound to one guild, holding staged values.
pub struct GuildConfigurator {
    table: String,
    name: String,
    description: String,
    guild_id: GuildId,
    entries: Vec<ConfigEntry>,
    store: Arc<dyn ConfigStore>,
    hook: Option<Arc<dyn CommitHook>>,
}

impl GuildConfigurator {
    /// Storage table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Guild this configurator is bound to.
    #[must_use]
    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    /// All entries in declared order.
    #[must_use]
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    /// Look up an entry by key.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&ConfigEntry> {
        self.entries.iter().find(|e| e.key() == key)
    }

    /// Look up an entry by key for staging.
    pub fn entry_mut(&mut self, key: &str) -> Option<&mut ConfigEntry> {
        self.entries.iter_mut().find(|e| e.key() == key)
    }

    /// Keys of writable entries, in declared order.
    #[must_use]
    pub fn editable_keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| !e.is_read_only())
            .map(|e| e.key().to_string())
            .collect()
    }

    /// Keys whose value was staged since the last load or commit.
    #[must_use]
    pub fn dirty_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.is_dirty())
            .map(ConfigEntry::key)
            .collect()
    }

    /// Persist every entry's staged value as one row.
    ///
    /// Unset entries are written as `null`. After the store accepts the row
    /// the dirty flags are cleared and the commit hook runs.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Storage`] if the store rejects the row. The
    /// staged values are left untouched in that case.
    pub async fn save(&mut self) -> CoreResult<()> {
        let row: ConfigRow = self
            .entries
            .iter()
            .map(|e| {
                let value = e.get().map_or(Value::Null, EntryValue::to_json);
                (e.key().to_string(), value)
            })
            .collect();

        self.store.save(self.guild_id.get(), &self.table, row).await?;

        for entry in &mut self.entries {
            let value = entry.get().cloned();
            entry.load(value);
        }
        info!(guild_id = %self.guild_id, table = %self.table, "Configuration saved");

        if let Some(hook) = &self.hook {
            hook.committed(self.guild_id, &self.entries).await;
        }
        Ok(())
    }

    /// Restore defaults in the store and unset every staged value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Storage`] if the store fails. Staged values are
    /// left untouched in that case.
    pub async fn reset(&mut self) -> CoreResult<()> {
        let existed = self.store.reset(self.guild_id.get(), &self.table).await?;
        for entry in &mut self.entries {
            entry.load(None);
        }
        info!(guild_id = %self.guild_id, table = %self.table, existed, "Configuration reset");

        if let Some(hook) = &self.hook {
            hook.committed(self.guild_id, &self.entries).await;
        }
        Ok(())
    }
}

impl fmt::Debug for GuildConfigurator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuildConfigurator")
            .field("table", &self.table)
            .field("guild_id", &self.guild_id)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::EntryKind;
    use guildconf_storage::MemoryConfigStore;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn template() -> ConfiguratorTemplate {
        ConfiguratorTemplate::new("moderation", "Moderation", "Moderation settings")
            .entry(ConfigEntry::new("owner", EntryKind::Member).read_only())
            .entry(ConfigEntry::new("timeout_seconds", EntryKind::Integer))
            .entry(ConfigEntry::new("strict", EntryKind::Boolean))
    }

    #[derive(Default)]
    struct CountingHook(AtomicUsize);

    #[async_trait]
    impl CommitHook for CountingHook {
        async fn committed(&self, _guild_id: GuildId, _entries: &[ConfigEntry]) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn hydrate_without_row_leaves_entries_unset() {
        let store = Arc::new(MemoryConfigStore::new());
        let cfg = template().hydrate(GuildId(1), store).await.unwrap();
        assert!(cfg.entries().iter().all(|e| e.get().is_none()));
        assert_eq!(cfg.editable_keys(), vec!["timeout_seconds", "strict"]);
    }

    #[tokio::test]
    async fn hydrate_reads_stored_columns() {
        let store = Arc::new(MemoryConfigStore::new());
        let mut row = ConfigRow::new();
        row.insert("timeout_seconds".into(), json!(30));
        row.insert("strict".into(), json!(true));
        store.save(1, "moderation", row).await.unwrap();

        let cfg = template().hydrate(GuildId(1), store).await.unwrap();
        assert_eq!(
            cfg.entry("timeout_seconds").unwrap().get(),
            Some(&EntryValue::Integer(30))
        );
        assert!(cfg.dirty_keys().is_empty());
    }

    #[tokio::test]
    async fn hydrate_rejects_mistyped_column() {
        let store = Arc::new(MemoryConfigStore::new());
        let mut row = ConfigRow::new();
        row.insert("strict".into(), json!("perhaps"));
        store.save(1, "moderation", row).await.unwrap();

        let err = template().hydrate(GuildId(1), store).await.unwrap_err();
        assert!(matches!(err, CoreError::Decode { ref column, .. } if column == "strict"));
    }

    #[tokio::test]
    async fn save_writes_every_column_and_runs_hook() {
        let store = Arc::new(MemoryConfigStore::new());
        let hook = Arc::new(CountingHook::default());
        let mut cfg = template()
            .on_commit(hook.clone())
            .hydrate(GuildId(1), store.clone())
            .await
            .unwrap();

        cfg.entry_mut("timeout_seconds")
            .unwrap()
            .set(Some(EntryValue::Integer(45)))
            .unwrap();
        assert_eq!(cfg.dirty_keys(), vec!["timeout_seconds"]);
        cfg.save().await.unwrap();

        let row = store.load(1, "moderation").await.unwrap().unwrap();
        assert_eq!(row.get("timeout_seconds"), Some(&json!(45)));
        assert_eq!(row.get("strict"), Some(&Value::Null));
        assert_eq!(row.get("owner"), Some(&Value::Null));
        assert!(cfg.dirty_keys().is_empty());
        assert_eq!(hook.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reset_clears_store_and_staged_values() {
        let store = Arc::new(MemoryConfigStore::new());
        let mut cfg = template().hydrate(GuildId(1), store.clone()).await.unwrap();
        cfg.entry_mut("strict")
            .unwrap()
            .set(Some(EntryValue::Boolean(true)))
            .unwrap();
        cfg.save().await.unwrap();

        cfg.reset().await.unwrap();
        assert!(store.load(1, "moderation").await.unwrap().is_none());
        assert!(cfg.entry("strict").unwrap().get().is_none());
    }
}
