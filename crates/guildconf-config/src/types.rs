//! Configuration schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Wizard behavior.
    pub wizard: WizardSection,
    /// Interaction surface settings.
    pub surface: SurfaceSection,
    /// Persistence backend.
    pub storage: StorageSection,
    /// Logging.
    pub logging: LoggingSection,
    /// Seed data for the in-process directory.
    #[serde(default)]
    pub directory: DirectorySection,
}

/// How the operator picks the configurator to edit or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// A numbered picker listing every configurator.
    Menu,
    /// The configurator shown on the current summary page.
    Page,
}

/// `[wizard]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSection {
    /// Maximum characters per summary page.
    pub page_char_limit: usize,
    /// Configurator selection mode.
    pub selection: SelectionMode,
    /// Locale used when the guild has none configured.
    pub default_locale: String,
}

/// `[surface]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSection {
    /// Seconds a menu waits for input before timing out.
    pub menu_timeout_secs: u64,
    /// Whether closed menus are removed from the conversation.
    pub delete_on_close: bool,
}

/// Storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; lost on exit.
    Memory,
    /// One JSON file per guild and configurator.
    Json,
}

/// `[storage]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSection {
    /// Backend kind.
    pub backend: StorageBackend,
    /// Data directory for the JSON backend. Defaults to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Base level filter.
    pub level: String,
    /// `pretty`, `compact`, `json` or `full`.
    pub format: String,
    /// Per-target overrides.
    #[serde(default)]
    pub directives: Vec<String>,
}

/// `[directory]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySection {
    /// Guild listings.
    #[serde(default)]
    pub guilds: Vec<GuildSeed>,
}

/// One `[[directory.guilds]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildSeed {
    /// Guild id.
    pub id: u64,
    /// Text channels.
    #[serde(default)]
    pub channels: Vec<NamedSeed>,
    /// Roles.
    #[serde(default)]
    pub roles: Vec<NamedSeed>,
    /// Members.
    #[serde(default)]
    pub members: Vec<MemberSeed>,
}

/// A channel or role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSeed {
    /// Snowflake.
    pub id: u64,
    /// Name.
    pub name: String,
}

/// A member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSeed {
    /// User snowflake.
    pub id: u64,
    /// Username.
    pub name: String,
    /// Legacy discriminator.
    #[serde(default)]
    pub discriminator: Option<String>,
}
