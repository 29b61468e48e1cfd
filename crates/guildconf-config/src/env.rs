//! Environment variable overrides.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `GUILDCONF_LOG_LEVEL` | `logging.level` |
//! | `GUILDCONF_DATA_DIR` | `storage.data_dir` |
//! | `GUILDCONF_LOCALE` | `wizard.default_locale` |
//! | `GUILDCONF_SELECTION` | `wizard.selection` |

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::merge::set_path;

/// Mapping of environment variables to dotted config paths.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("GUILDCONF_LOG_LEVEL", "logging.level"),
    ("GUILDCONF_DATA_DIR", "storage.data_dir"),
    ("GUILDCONF_LOCALE", "wizard.default_locale"),
    ("GUILDCONF_SELECTION", "wizard.selection"),
];

/// Snapshot the `GUILDCONF_*` variables of the current process.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("GUILDCONF_"))
        .collect()
}

/// Apply overrides from `env` onto the merged tree.
///
/// Empty values are ignored. Returns how many overrides were applied.
pub fn apply_env_overrides(merged: &mut toml::Value, env: &HashMap<String, String>) -> usize {
    let mut applied = 0usize;
    for (var, path) in ENV_OVERRIDES {
        let Some(value) = env.get(*var).filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        if set_path(merged, path, toml::Value::String(value.trim().to_owned())) {
            debug!(var, path, "applied environment override");
            applied = applied.saturating_add(1);
        } else {
            warn!(var, path, "could not apply environment override");
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_values() {
        let mut merged: toml::Value =
            toml::from_str("[wizard]\ndefault_locale = \"en\"\n[logging]\nlevel = \"warn\"")
                .unwrap();
        let env = HashMap::from([
            ("GUILDCONF_LOCALE".to_string(), "fr".to_string()),
            ("GUILDCONF_LOG_LEVEL".to_string(), " debug ".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
        ]);
        assert_eq!(apply_env_overrides(&mut merged, &env), 2);
        assert_eq!(merged["wizard"]["default_locale"].as_str(), Some("fr"));
        assert_eq!(merged["logging"]["level"].as_str(), Some("debug"));
    }

    #[test]
    fn empty_values_are_ignored() {
        let mut merged: toml::Value = toml::from_str("[wizard]\nselection = \"menu\"").unwrap();
        let env = HashMap::from([("GUILDCONF_SELECTION".to_string(), "  ".to_string())]);
        assert_eq!(apply_env_overrides(&mut merged, &env), 0);
        assert_eq!(merged["wizard"]["selection"].as_str(), Some("menu"));
    }
}
