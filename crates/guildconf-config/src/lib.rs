//! Guildconf Config - layered configuration.
//!
//! Configuration is assembled from three layers, later ones winning:
//! embedded defaults, a TOML file, and `GUILDCONF_*` environment variables.
//! The merged tree is deserialized into [`Config`] and validated.
//!
//! ```toml
//! [wizard]
//! page_char_limit = 1000
//! selection = "menu"     # or "page"
//! default_locale = "en"
//!
//! [surface]
//! menu_timeout_secs = 120
//!
//! [storage]
//! backend = "json"       # or "memory"
//! data_dir = "/var/lib/guildconf"
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod env;
mod error;
mod loader;
mod merge;
mod types;
mod validate;

pub use env::{apply_env_overrides, collect_env_vars};
pub use error::{ConfigError, ConfigResult};
pub use loader::{default_data_dir, load, load_with, user_config_path};
pub use merge::deep_merge;
pub use types::{
    Config, DirectorySection, GuildSeed, LoggingSection, MemberSeed, NamedSeed, SelectionMode,
    StorageBackend, StorageSection, SurfaceSection, WizardSection,
};
pub use validate::validate;
