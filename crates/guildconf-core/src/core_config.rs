//! The built-in server configurator: command prefix, changelog channel,
//! and reply language.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::catalog::ConfiguratorBlueprint;
use crate::configurator::{CommitHook, ConfiguratorTemplate};
use crate::entry::ConfigEntry;
use crate::i18n::{SUPPORTED_LOCALES, Translator, is_supported_locale};
use crate::ids::GuildId;
use crate::validator::Validator;
use crate::value::{EntryKind, EntryValue};

/// Storage table of the core configurator.
pub const CORE_TABLE: &str = "core_config";

/// Per-guild command prefixes, kept in step with saved configuration.
#[derive(Debug, Clone, Default)]
pub struct GuildPrefixes {
    inner: Arc<RwLock<HashMap<GuildId, String>>>,
}

impl GuildPrefixes {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current prefix for `guild`, if one is configured.
    pub async fn get(&self, guild: GuildId) -> Option<String> {
        self.inner.read().await.get(&guild).cloned()
    }

    /// Record or clear the prefix for `guild`.
    pub async fn set(&self, guild: GuildId, prefix: Option<String>) {
        let mut map = self.inner.write().await;
        match prefix {
            Some(p) => {
                map.insert(guild, p);
            },
            None => {
                map.remove(&guild);
            },
        }
    }
}

#[async_trait]
impl CommitHook for GuildPrefixes {
    async fn committed(&self, guild_id: GuildId, entries: &[ConfigEntry]) {
        let prefix = entries
            .iter()
            .find(|e| e.key() == "prefix")
            .and_then(ConfigEntry::get)
            .and_then(|v| match v {
                EntryValue::Text(s) => Some(s.clone()),
                _ => None,
            });
        debug!(guild_id = %guild_id, ?prefix, "Updating guild prefix");
        self.set(guild_id, prefix).await;
    }
}

/// Blueprint for the core server configurator.
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBlueprint {
    prefixes: GuildPrefixes,
}

impl CoreConfigBlueprint {
    /// Create a blueprint that publishes saved prefixes into `prefixes`.
    #[must_use]
    pub fn new(prefixes: GuildPrefixes) -> Self {
        Self { prefixes }
    }
}

fn locale_description(tr: &dyn Translator) -> String {
    let mut desc = tr.translate("desc_locale", &[]);
    for (tag, name) in SUPPORTED_LOCALES {
        let _ = write!(desc, "\n- `{tag}` [{name}]");
    }
    desc
}

impl ConfiguratorBlueprint for CoreConfigBlueprint {
    fn table(&self) -> &str {
        CORE_TABLE
    }

    fn build(&self, tr: &dyn Translator) -> ConfiguratorTemplate {
        ConfiguratorTemplate::new(
            CORE_TABLE,
            tr.translate("core_guildconfig_title", &[]),
            tr.translate("core_guildconfig_desc", &[]),
        )
        .entry(
            ConfigEntry::new("prefix", EntryKind::Text)
                .with_display_name(tr.translate("prefix", &[]))
                .with_validator(Validator::not_blank(tr.translate("validate_not_blank", &[]))),
        )
        .entry(
            ConfigEntry::new("channel_changelog", EntryKind::Channel)
                .with_display_name(tr.translate("display_channel_changelog", &[])),
        )
        .entry(
            ConfigEntry::new("locale", EntryKind::Text)
                .with_display_name(tr.translate("language", &[]))
                .with_description(locale_description(tr))
                .with_validator(Validator::allowing_if(
                    tr.translate("unrecognized_locale", &[]),
                    |v| matches!(v, EntryValue::Text(tag) if is_supported_locale(tag)),
                )),
        )
        .on_commit(Arc::new(self.prefixes.clone()))
    }
}
