//! Guildconf Telemetry - logging setup.
//!
//! Libraries in this workspace only emit `tracing` events. Binaries call
//! [`setup_logging`] once at startup to install a subscriber.
//!
//! # Example
//!
//! ```rust,no_run
//! use guildconf_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), guildconf_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("guildconf_wizard=trace");
//! setup_logging(&config)?;
//! tracing::info!("ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_logging};
