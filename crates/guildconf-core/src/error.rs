//! Error types for guild configuration.

use guildconf_storage::StorageError;
use thiserror::Error;

use crate::value::{DecodeError, EntryKind};

/// Errors from configurator hydration, persistence, and localization.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A stored column did not match its entry's kind.
    #[error("column {table}.{column}: {source}")]
    Decode {
        /// Configurator table.
        table: String,
        /// Offending column.
        column: String,
        /// Underlying decode failure.
        #[source]
        source: DecodeError,
    },

    /// A message bundle could not be parsed.
    #[error("invalid message bundle for {locale}: {message}")]
    Bundle {
        /// Locale tag of the bundle.
        locale: String,
        /// Parser message.
        message: String,
    },

    /// No built-in bundle for the requested locale.
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// A staged value was refused by an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The entry is read-only.
    #[error("entry {key} is read-only")]
    ReadOnly {
        /// Entry key.
        key: String,
    },

    /// The value's kind differs from the entry's kind.
    #[error("entry {key} expects {expected}, got {found}")]
    KindMismatch {
        /// Entry key.
        key: String,
        /// Declared kind.
        expected: EntryKind,
        /// Kind of the offered value.
        found: EntryKind,
    },

    /// The entry's validator rejected the value.
    #[error("{message}")]
    Rejected {
        /// Entry key.
        key: String,
        /// Localized rejection message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_pass_through() {
        let err: CoreError = StorageError::Connection("refused".into()).into();
        assert_eq!(err.to_string(), "connection error: refused");
    }

    #[test]
    fn decode_names_the_column() {
        let err = CoreError::Decode {
            table: "core_config".into(),
            column: "prefix".into(),
            source: DecodeError {
                expected: EntryKind::Text,
                found: "3".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "column core_config.prefix: expected text value, found 3"
        );
    }

    #[test]
    fn rejected_shows_only_the_message() {
        let err = ValidationError::Rejected {
            key: "prefix".into(),
            message: "must not be blank".into(),
        };
        assert_eq!(err.to_string(), "must not be blank");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
        assert_send_sync::<ValidationError>();
    }
}
