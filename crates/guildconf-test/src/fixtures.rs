//! Test fixtures: ids, a seeded directory, translators and a sample
//! configurator.

use std::sync::Arc;

use guildconf_core::{
    ChannelId, ConfigEntry, ConfiguratorBlueprint, ConfiguratorTemplate, EntryKind, EntryValue,
    GuildId, MessageBundle, RoleId, StaticDirectory, Translator, UserId, Validator,
};
use guildconf_storage::ConfigRow;
use serde_json::json;

/// Table of [`ModerationBlueprint`].
pub const MODERATION_TABLE: &str = "moderation";

/// The guild every fixture lives in.
#[must_use]
pub fn test_guild() -> GuildId {
    GuildId(100)
}

/// The operator driving test wizards.
#[must_use]
pub fn test_operator() -> UserId {
    UserId(200)
}

/// `#general` (10), `#changelog` (11) and `#mod-log` (12).
pub const GENERAL: ChannelId = ChannelId(10);
/// See [`GENERAL`].
pub const CHANGELOG: ChannelId = ChannelId(11);
/// See [`GENERAL`].
pub const MOD_LOG: ChannelId = ChannelId(12);
/// `@Mods`.
pub const MODS: RoleId = RoleId(20);
/// `ann#0001`, the guild owner.
pub const ANN: UserId = UserId(30);

/// Directory for [`test_guild`] with a few channels, a role and a member.
pub async fn test_directory() -> StaticDirectory {
    let dir = StaticDirectory::new();
    let guild = test_guild();
    dir.add_channel(guild, GENERAL, "general").await;
    dir.add_channel(guild, CHANGELOG, "changelog").await;
    dir.add_channel(guild, MOD_LOG, "mod-log").await;
    dir.add_role(guild, MODS, "Mods").await;
    dir.add_member(guild, ANN, "ann", Some("0001".into())).await;
    dir
}

/// Embedded English bundle.
///
/// # Panics
///
/// If the embedded bundle does not parse.
#[must_use]
#[allow(clippy::expect_used)]
pub fn english() -> Arc<dyn Translator> {
    Arc::new(MessageBundle::english().expect("embedded English bundle"))
}

/// Embedded French bundle, falling back to English.
///
/// # Panics
///
/// If the embedded bundles do not parse.
#[must_use]
#[allow(clippy::expect_used)]
pub fn french() -> Arc<dyn Translator> {
    Arc::new(MessageBundle::builtin("fr").expect("embedded French bundle"))
}

/// A moderation configurator exercising every entry kind:
///
/// | key | kind | notes |
/// |-----|------|-------|
/// | `owner` | member | read-only |
/// | `timeout_seconds` | integer | `1..=86400` |
/// | `strict` | boolean | |
/// | `log_channel` | channel | |
/// | `mod_role` | role | |
/// | `banner` | text | |
/// | `quota` | long | |
#[derive(Debug, Clone, Copy, Default)]
pub struct ModerationBlueprint;

impl ConfiguratorBlueprint for ModerationBlueprint {
    fn table(&self) -> &str {
        MODERATION_TABLE
    }

    fn build(&self, _tr: &dyn Translator) -> ConfiguratorTemplate {
        ConfiguratorTemplate::new(MODERATION_TABLE, "Moderation", "Automatic moderation")
            .entry(
                ConfigEntry::new("owner", EntryKind::Member)
                    .with_display_name("Owner")
                    .read_only(),
            )
            .entry(
                ConfigEntry::new("timeout_seconds", EntryKind::Integer)
                    .with_display_name("Timeout")
                    .with_description("Seconds before a mute expires")
                    .with_validator(Validator::allowing_if(
                        "Between 1 and 86400 seconds.",
                        |v| matches!(v, EntryValue::Integer(n) if (1..=86_400).contains(n)),
                    )),
            )
            .entry(ConfigEntry::new("strict", EntryKind::Boolean).with_display_name("Strict mode"))
            .entry(
                ConfigEntry::new("log_channel", EntryKind::Channel).with_display_name("Log channel"),
            )
            .entry(ConfigEntry::new("mod_role", EntryKind::Role).with_display_name("Moderator role"))
            .entry(ConfigEntry::new("banner", EntryKind::Text).with_display_name("Banner"))
            .entry(ConfigEntry::new("quota", EntryKind::Long).with_display_name("Quota"))
    }
}

/// Stored moderation row: owner ann, 60 s timeout, strict off, logging to
/// `#mod-log`.
#[must_use]
pub fn moderation_row() -> ConfigRow {
    let mut row = ConfigRow::new();
    row.insert("owner".into(), json!(ANN.get().to_string()));
    row.insert("timeout_seconds".into(), json!(60));
    row.insert("strict".into(), json!(false));
    row.insert("log_channel".into(), json!(MOD_LOG.get().to_string()));
    row
}
