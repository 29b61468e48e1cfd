//! Guildconf Test - shared test utilities for the configuration wizard.
//!
//! Mock collaborators ([`ScriptedSurface`], [`RecordingStore`],
//! [`FailingDirectory`], [`CountingDirectory`]) and fixtures
//! ([`ModerationBlueprint`], [`test_directory`], translators).
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! guildconf-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use guildconf_test::{ScriptedSurface, RecordingStore};
//! use guildconf_wizard::Control;
//!
//! let surface = ScriptedSurface::new()
//!     .with_signal(Control::Edit)
//!     .with_reply("1")
//!     .with_reply("45");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

/// Route `tracing` output to the test harness, honouring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
