//! Guildconf Core - typed configuration entries and the collaborators the
//! configuration wizard talks to.
//!
//! This crate provides:
//! - Platform id newtypes ([`GuildId`], [`ChannelId`], [`RoleId`], [`UserId`])
//! - The closed set of entry kinds and values ([`EntryKind`], [`EntryValue`])
//! - [`ConfigEntry`] with staged values, dirty tracking and [`Validator`]s
//! - [`GuildConfigurator`]: a guild-bound bundle of entries with save/reset
//! - [`ConfigurationCatalog`] and the blueprint-driven [`RegistryCatalog`]
//! - The [`Directory`] trait for channel/role/member resolution
//! - The [`Translator`] trait and embedded [`MessageBundle`]s
//! - The built-in [`CoreConfigBlueprint`]

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod catalog;
pub mod configurator;
pub mod core_config;
pub mod directory;
pub mod entry;
pub mod error;
pub mod i18n;
pub mod ids;
pub mod validator;
pub mod value;

pub use catalog::{ConfigurationCatalog, ConfiguratorBlueprint, RegistryCatalog};
pub use configurator::{CommitHook, ConfiguratorTemplate, GuildConfigurator};
pub use core_config::{CORE_TABLE, CoreConfigBlueprint, GuildPrefixes};
pub use directory::{
    Channel, Directory, DirectoryError, DirectoryResult, Member, Role, StaticDirectory,
};
pub use entry::ConfigEntry;
pub use error::{CoreError, CoreResult, ValidationError};
pub use i18n::{MessageBundle, SUPPORTED_LOCALES, Translator, fold_token, is_supported_locale};
pub use ids::{ChannelId, GuildId, RoleId, UserId};
pub use validator::Validator;
pub use value::{DecodeError, EntryKind, EntryValue};
