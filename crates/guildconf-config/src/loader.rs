//! Config file discovery and layered loading.
//!
//! 1. Parse the embedded `defaults.toml` → base
//! 2. Merge the config file: an explicit path if given (must exist),
//!    otherwise the platform config dir's `config.toml` (optional)
//! 3. Apply `GUILDCONF_*` environment overrides
//! 4. Deserialize the merged tree → [`Config`]
//! 5. Validate

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{apply_env_overrides, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::deep_merge;
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Load configuration from the environment of the current process.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a file is malformed, an explicit file is
/// missing, or the merged result fails validation.
pub fn load(explicit: Option<&Path>) -> ConfigResult<Config> {
    let user_path = if explicit.is_none() {
        user_config_path()
    } else {
        None
    };
    load_with(explicit, user_path.as_deref(), &collect_env_vars())
}

/// Load configuration with every input supplied by the caller.
///
/// # Errors
///
/// See [`load`].
pub fn load_with(
    explicit: Option<&Path>,
    user_path: Option<&Path>,
    env: &HashMap<String, String>,
) -> ConfigResult<Config> {
    // 1. Embedded defaults.
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    // 2. Config file.
    if let Some(path) = explicit {
        let overlay =
            try_load_file(path)?.ok_or_else(|| ConfigError::NotFound(path.display().to_string()))?;
        deep_merge(&mut merged, &overlay);
        info!(path = %path.display(), "loaded config file");
    } else if let Some(path) = user_path
        && let Some(overlay) = try_load_file(path)?
    {
        deep_merge(&mut merged, &overlay);
        info!(path = %path.display(), "loaded user config");
    }

    // 3. Environment.
    let applied = apply_env_overrides(&mut merged, env);
    if applied > 0 {
        debug!(count = applied, "applied environment overrides");
    }

    // 4. Deserialize.
    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    // 5. Validate.
    validate::validate(&config)?;
    Ok(config)
}

/// `config.toml` inside the platform config directory for `guildconf`.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "guildconf")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Platform data directory for `guildconf`.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "guildconf").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Try to load a file, returning `None` if the file doesn't exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    // Check size after reading to avoid TOCTOU between stat and read.
    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                content.len()
            ),
        });
    }

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SelectionMode, StorageBackend};

    #[test]
    fn defaults_alone() {
        let config = load_with(None, None, &HashMap::new()).unwrap();
        assert_eq!(config.wizard.page_char_limit, 1000);
        assert_eq!(config.wizard.selection, SelectionMode::Menu);
        assert_eq!(config.wizard.default_locale, "en");
        assert_eq!(config.surface.menu_timeout_secs, 120);
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert!(config.directory.guilds.is_empty());
    }

    #[test]
    fn user_file_overlays_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[wizard]
selection = "page"

[storage]
backend = "memory"

[[directory.guilds]]
id = 1
channels = [{ id = 10, name = "general" }]
members = [{ id = 30, name = "ann", discriminator = "0001" }]
"#,
        )
        .unwrap();

        let config = load_with(None, Some(&path), &HashMap::new()).unwrap();
        assert_eq!(config.wizard.selection, SelectionMode::Page);
        assert_eq!(config.wizard.page_char_limit, 1000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.directory.guilds[0].channels[0].name, "general");
        assert_eq!(
            config.directory.guilds[0].members[0].discriminator.as_deref(),
            Some("0001")
        );
    }

    #[test]
    fn missing_user_file_is_skipped_but_explicit_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_with(None, Some(&path), &HashMap::new()).is_ok());
        let err = load_with(Some(&path), None, &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn env_overrides_win_over_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[wizard]\ndefault_locale = \"en\"").unwrap();
        let env = HashMap::from([
            ("GUILDCONF_LOCALE".to_string(), "fr".to_string()),
            ("GUILDCONF_DATA_DIR".to_string(), "/srv/guildconf".to_string()),
        ]);

        let config = load_with(Some(&path), None, &env).unwrap();
        assert_eq!(config.wizard.default_locale, "fr");
        assert_eq!(
            config.storage.data_dir.as_deref(),
            Some(Path::new("/srv/guildconf"))
        );
    }

    #[test]
    fn bad_enum_value_is_parse_error() {
        let env = HashMap::from([("GUILDCONF_SELECTION".to_string(), "wheel".to_string())]);
        let err = load_with(None, None, &env).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[wizard\n").unwrap();
        let err = load_with(Some(&path), None, &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn oversized_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let padding = "#".repeat(usize::try_from(MAX_CONFIG_FILE_SIZE).unwrap().saturating_add(1));
        std::fs::write(&path, padding).unwrap();
        let err = load_with(Some(&path), None, &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }
}
