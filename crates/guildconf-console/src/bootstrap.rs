//! Turning a loaded [`Config`] into wizard collaborators.

use std::sync::Arc;

use anyhow::{Context, Result};
use guildconf_config::{Config, DirectorySection, StorageBackend};
use guildconf_core::{
    CORE_TABLE, ChannelId, GuildId, MessageBundle, RoleId, StaticDirectory, Translator, UserId,
    is_supported_locale,
};
use guildconf_storage::{ConfigStore, JsonFileConfigStore, MemoryConfigStore};
use guildconf_wizard::{SelectionMode, WizardOptions};
use serde_json::Value;
use tracing::{info, warn};

/// The configured row store.
pub(crate) fn build_store(config: &Config) -> Result<Arc<dyn ConfigStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; nothing is kept after exit");
            Ok(Arc::new(MemoryConfigStore::new()))
        },
        StorageBackend::Json => {
            let dir = config
                .storage
                .data_dir
                .clone()
                .or_else(guildconf_config::default_data_dir)
                .context("no data directory available; set storage.data_dir")?;
            info!(path = %dir.display(), "Using JSON file storage");
            Ok(Arc::new(JsonFileConfigStore::new(dir)))
        },
    }
}

/// A directory holding the seeded guild listings.
pub(crate) async fn build_directory(section: &DirectorySection) -> StaticDirectory {
    let directory = StaticDirectory::new();
    for guild in &section.guilds {
        let id = GuildId(guild.id);
        for channel in &guild.channels {
            directory
                .add_channel(id, ChannelId(channel.id), channel.name.clone())
                .await;
        }
        for role in &guild.roles {
            directory.add_role(id, RoleId(role.id), role.name.clone()).await;
        }
        for member in &guild.members {
            directory
                .add_member(
                    id,
                    UserId(member.id),
                    member.name.clone(),
                    member.discriminator.clone(),
                )
                .await;
        }
    }
    directory
}

/// Wizard options from the `[wizard]` and `[surface]` sections.
pub(crate) fn wizard_options(config: &Config) -> WizardOptions {
    WizardOptions {
        page_char_limit: config.wizard.page_char_limit,
        selection: match config.wizard.selection {
            guildconf_config::SelectionMode::Menu => SelectionMode::Menu,
            guildconf_config::SelectionMode::Page => SelectionMode::Page,
        },
        delete_on_close: config.surface.delete_on_close,
    }
}

/// Locale stored in the guild's core configuration, if any.
pub(crate) async fn stored_locale(store: &dyn ConfigStore, guild: GuildId) -> Option<String> {
    match store.load(guild.get(), CORE_TABLE).await {
        Ok(row) => row?.get("locale").and_then(Value::as_str).map(str::to_string),
        Err(e) => {
            warn!(guild_id = %guild, error = %e, "Could not read guild locale");
            None
        },
    }
}

/// Translator for the first supported locale among `candidates`, else
/// English.
pub(crate) fn translator(candidates: &[Option<&str>]) -> Result<Arc<dyn Translator>> {
    for tag in candidates.iter().flatten() {
        if is_supported_locale(tag) {
            return Ok(Arc::new(MessageBundle::builtin(tag)?));
        }
        warn!(locale = %tag, "Unsupported locale, ignoring");
    }
    Ok(Arc::new(MessageBundle::english()?))
}
