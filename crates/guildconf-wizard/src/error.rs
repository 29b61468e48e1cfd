//! Wizard error types.
//!
//! Two families:
//! - [`InputError`] and [`SelectionError`] are retryable. They are recovered
//!   inside a session by re-prompting and never leave it.
//! - [`WizardError`] ends the wizard. Every variant can be rendered for the
//!   operator with [`WizardError::localized`].

use guildconf_core::{CoreError, DirectoryError, GuildId, Translator};
use thiserror::Error;

use crate::surface::SurfaceError;

/// A reply that could not be turned into a value for the current entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Not a base-10 integer in range.
    #[error("not a valid number")]
    InvalidNumber,

    /// Neither the localized yes nor no token.
    #[error("expected a yes/no answer")]
    ExpectedBoolean,

    /// The directory found nothing for the input.
    #[error("no match for {query}")]
    Unresolved {
        /// The operator's input.
        query: String,
    },

    /// The directory found several candidates.
    #[error("{query} is ambiguous")]
    Ambiguous {
        /// The operator's input.
        query: String,
    },

    /// The entry's validator rejected the value.
    #[error("constraint violated: {0}")]
    Constraint(String),
}

impl InputError {
    /// Operator-facing message.
    #[must_use]
    pub fn localized(&self, tr: &dyn Translator) -> String {
        match self {
            Self::InvalidNumber => tr.translate("error_invalid_input", &[]),
            Self::ExpectedBoolean => {
                let yes = tr.translate("yes", &[]);
                let no = tr.translate("no", &[]);
                tr.translate("error_expected_boolean", &[&yes, &no])
            },
            Self::Unresolved { query } => tr.translate("error_unresolved_reference", &[query]),
            Self::Ambiguous { query } => tr.translate("error_ambiguous_reference", &[query]),
            Self::Constraint(message) => {
                format!("{} {message}", tr.translate("error_constraint_violation", &[]))
            },
        }
    }
}

/// A configurator picker reply that does not name a configurator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The reply is not an integer.
    #[error("not a number")]
    NotANumber {
        /// Number of listed configurators.
        count: usize,
    },

    /// The number is outside `[1, count]`.
    #[error("{index} is not between 1 and {count}")]
    OutOfRange {
        /// What the operator typed.
        index: i64,
        /// Number of listed configurators.
        count: usize,
    },
}

impl SelectionError {
    /// Operator-facing message.
    #[must_use]
    pub fn localized(&self, tr: &dyn Translator) -> String {
        let (Self::NotANumber { count } | Self::OutOfRange { count, .. }) = self;
        tr.translate("error_invalid_selection", &[&count.to_string()])
    }
}

/// Errors that end a wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    /// The selected configurator has no writable entries, or the guild has
    /// no configurators at all.
    #[error("nothing to configure")]
    NothingToConfigure,

    /// Another wizard is open for the same guild.
    #[error("guild {0} is already being configured")]
    AlreadyConfiguring(GuildId),

    /// An event arrived after the session ended.
    #[error("session already closed")]
    SessionClosed,

    /// An event arrived before the session displayed its first prompt.
    #[error("session is not awaiting input")]
    NotAwaitingInput,

    /// A queued key does not name an entry of the configurator.
    #[error("unknown entry: {0}")]
    UnknownEntry(String),

    /// The summary page has no owning configurator.
    #[error("summary page {0} belongs to no configurator")]
    NoSuchPage(usize),

    /// Hydration or persistence failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The directory could not be reached.
    #[error(transparent)]
    Directory(DirectoryError),

    /// The interaction surface failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl WizardError {
    /// Whether this is an infrastructure failure (as opposed to a refusal
    /// the operator can act on).
    #[must_use]
    pub fn is_operational(&self) -> bool {
        matches!(
            self,
            Self::Core(_)
                | Self::Directory(_)
                | Self::Surface(_)
                | Self::UnknownEntry(_)
                | Self::NoSuchPage(_)
        )
    }

    /// Operator-facing message.
    #[must_use]
    pub fn localized(&self, tr: &dyn Translator) -> String {
        match self {
            Self::NothingToConfigure => tr.translate("error_nothing_to_configure", &[]),
            Self::AlreadyConfiguring(_) => tr.translate("error_already_configuring", &[]),
            other => tr.translate("error_operation_failed", &[&other.to_string()]),
        }
    }
}

/// Result type for wizard operations.
pub type WizardResult<T> = Result<T, WizardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use guildconf_core::MessageBundle;
    use guildconf_storage::StorageError;

    #[test]
    fn boolean_error_names_local_tokens() {
        let fr = MessageBundle::builtin("fr").unwrap();
        assert_eq!(
            InputError::ExpectedBoolean.localized(&fr),
            "Répondez oui ou non."
        );
    }

    #[test]
    fn constraint_error_appends_message() {
        let en = MessageBundle::english().unwrap();
        assert_eq!(
            InputError::Constraint("The value must not be blank.".into()).localized(&en),
            "Invalid value: The value must not be blank."
        );
    }

    #[test]
    fn selection_error_mentions_count() {
        let en = MessageBundle::english().unwrap();
        let err = SelectionError::OutOfRange { index: 9, count: 3 };
        assert_eq!(err.to_string(), "9 is not between 1 and 3");
        assert_eq!(err.localized(&en), "Reply with a number between 1 and 3.");
    }

    #[test]
    fn operational_errors_are_wrapped() {
        let en = MessageBundle::english().unwrap();
        let err = WizardError::Core(CoreError::Storage(StorageError::Connection(
            "refused".into(),
        )));
        assert!(err.is_operational());
        assert_eq!(
            err.localized(&en),
            "Something went wrong: connection error: refused"
        );
        assert!(!WizardError::NothingToConfigure.is_operational());
        assert!(WizardError::NoSuchPage(3).is_operational());
        assert_eq!(
            WizardError::NoSuchPage(3).localized(&en),
            "Something went wrong: summary page 3 belongs to no configurator"
        );
        assert_eq!(
            WizardError::NothingToConfigure.localized(&en),
            "There is nothing to configure here."
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WizardError>();
        assert_send_sync::<InputError>();
    }
}
