//! Post-merge configuration validation.

use std::collections::HashSet;

use crate::error::{ConfigError, ConfigResult};
use crate::types::{Config, StorageBackend};

/// Smallest page that still fits a configurator header and one entry.
const MIN_PAGE_CHARS: usize = 100;

/// Platform message limit.
const MAX_PAGE_CHARS: usize = 2000;

/// Upper bound on menu timeouts (one day).
const MAX_MENU_TIMEOUT_SECS: u64 = 86_400;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_wizard(config)?;
    validate_surface(config)?;
    validate_storage(config)?;
    validate_logging(config)?;
    validate_directory(config)?;
    Ok(())
}

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message,
    }
}

fn validate_wizard(config: &Config) -> ConfigResult<()> {
    let w = &config.wizard;
    if !(MIN_PAGE_CHARS..=MAX_PAGE_CHARS).contains(&w.page_char_limit) {
        return Err(invalid(
            "wizard.page_char_limit",
            format!(
                "{} is out of range; must be between {MIN_PAGE_CHARS} and {MAX_PAGE_CHARS}",
                w.page_char_limit
            ),
        ));
    }
    if w.default_locale.trim().is_empty() {
        return Err(invalid(
            "wizard.default_locale",
            "must not be empty".to_owned(),
        ));
    }
    Ok(())
}

fn validate_surface(config: &Config) -> ConfigResult<()> {
    let secs = config.surface.menu_timeout_secs;
    if secs == 0 || secs > MAX_MENU_TIMEOUT_SECS {
        return Err(invalid(
            "surface.menu_timeout_secs",
            format!("{secs} is out of range; must be between 1 and {MAX_MENU_TIMEOUT_SECS}"),
        ));
    }
    Ok(())
}

fn validate_storage(config: &Config) -> ConfigResult<()> {
    let s = &config.storage;
    if s.backend == StorageBackend::Memory && s.data_dir.is_some() {
        tracing::warn!("storage.data_dir is ignored by the memory backend");
    }
    if let Some(dir) = &s.data_dir
        && dir.as_os_str().is_empty()
    {
        return Err(invalid("storage.data_dir", "must not be empty".to_owned()));
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let l = &config.logging;
    if !matches!(
        l.level.as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    ) {
        return Err(invalid(
            "logging.level",
            format!(
                "unsupported level '{}'; expected one of: trace, debug, info, warn, error, off",
                l.level
            ),
        ));
    }
    if !matches!(l.format.as_str(), "pretty" | "compact" | "json" | "full") {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported format '{}'; expected one of: pretty, compact, json, full",
                l.format
            ),
        ));
    }
    Ok(())
}

fn validate_directory(config: &Config) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for guild in &config.directory.guilds {
        if !seen.insert(guild.id) {
            return Err(invalid(
                "directory.guilds",
                format!("guild {} is listed twice", guild.id),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GuildSeed;

    fn defaults() -> Config {
        toml::from_str(include_str!("defaults.toml")).unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        validate(&defaults()).unwrap();
    }

    #[test]
    fn page_limit_bounds() {
        let mut c = defaults();
        c.wizard.page_char_limit = 10;
        let err = validate(&c).unwrap_err();
        assert!(err.to_string().contains("wizard.page_char_limit"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut c = defaults();
        c.surface.menu_timeout_secs = 0;
        assert!(validate(&c).is_err());
    }

    #[test]
    fn unknown_log_level_rejected() {
        let mut c = defaults();
        c.logging.level = "loud".into();
        let err = validate(&c).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "logging.level"));
    }

    #[test]
    fn duplicate_guild_seeds_rejected() {
        let mut c = defaults();
        let seed = GuildSeed {
            id: 1,
            channels: Vec::new(),
            roles: Vec::new(),
            members: Vec::new(),
        };
        c.directory.guilds = vec![seed.clone(), seed];
        assert!(validate(&c).is_err());
    }
}
