//! Guildconf Wizard - the interactive configuration flow.
//!
//! A wizard shows a paginated summary of every configurator of a guild, lets
//! the operator pick one, then runs either an [`EditSession`] (one prompt per
//! writable entry, validated replies, a single save at the end) or a
//! [`ResetSession`] (one confirmation, a single reset). All interaction goes
//! through an [`InteractionSurface`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use guildconf_wizard::{ConfigWizard, WizardOptions, WizardRequest};
//!
//! let wizard = ConfigWizard::new(catalog, directory, WizardOptions::default());
//! let outcome = wizard
//!     .open(WizardRequest { guild_id, operator_id }, translator, &surface)
//!     .await?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod display;
pub mod edit;
pub mod error;
pub mod format;
pub mod markdown;
pub mod parse;
pub mod picker;
pub mod prompt;
pub mod reset;
pub mod sessions;
pub mod summary;
pub mod surface;
pub mod wizard;

pub use display::display_value;
pub use edit::{EditSession, SessionEvent, SessionState, Transition};
pub use error::{InputError, SelectionError, WizardError, WizardResult};
pub use parse::{ParseFailure, apply_input, parse_input};
pub use picker::{PickerPurpose, parse_selection, render_picker};
pub use prompt::{expectation_key, render_prompt};
pub use reset::{ResetEvent, ResetSession, ResetState, ResetTransition};
pub use sessions::{ActiveSessions, SessionClaim};
pub use summary::{DisplayCache, Summary, SummaryPage, render_summary};
pub use surface::{
    CloseReason, Control, InteractionSurface, MenuEvent, MenuId, MenuSpec, SurfaceError,
    SurfaceResult,
};
pub use wizard::{ConfigWizard, SelectionMode, WizardOptions, WizardOutcome, WizardRequest};
