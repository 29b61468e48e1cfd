//! Guildconf Storage - persistence for guild configuration rows.
//!
//! Every configurator owns one **row** per guild. The [`ConfigStore`] trait
//! loads, replaces, and resets such rows. Two backends ship with the crate:
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`MemoryConfigStore`] | Tests and throwaway sessions |
//! | [`JsonFileConfigStore`] | Single-host deployments, one JSON file per row |
//!
//! Both replace a row as a unit, so a save is either fully visible or not
//! visible at all.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod file;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use file::JsonFileConfigStore;
pub use store::{ConfigRow, ConfigStore, MemoryConfigStore};
