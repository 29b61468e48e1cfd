//! Entry kinds and typed values.
//!
//! [`EntryKind`] is the closed set of value types a configuration entry can
//! hold, and [`EntryValue`] carries one value of each kind. Every behavior
//! that differs per kind (display, prompt hints, parsing) matches on these
//! enums exhaustively, so adding a kind fails compilation until each of those
//! places handles it.

use std::fmt;

use serde_json::Value;

use crate::ids::{ChannelId, RoleId, UserId};

/// The type of value a configuration entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// Yes/no flag.
    Boolean,
    /// Free text.
    Text,
    /// Reference to a text channel.
    Channel,
    /// Reference to a role.
    Role,
    /// Reference to a guild member.
    Member,
}

impl EntryKind {
    /// Lowercase name used in logs and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Channel => "channel",
            Self::Role => "role",
            Self::Member => "member",
        }
    }

    /// Whether values of this kind are platform references that need the
    /// directory to be turned into something human-readable.
    #[must_use]
    pub const fn is_reference(self) -> bool {
        match self {
            Self::Integer | Self::Long | Self::Boolean | Self::Text => false,
            Self::Channel | Self::Role | Self::Member => true,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    /// 32-bit signed integer.
    Integer(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// Yes/no flag.
    Boolean(bool),
    /// Free text.
    Text(String),
    /// Channel reference.
    Channel(ChannelId),
    /// Role reference.
    Role(RoleId),
    /// Member reference.
    Member(UserId),
}

/// A stored column could not be decoded as the entry's kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} value, found {found}")]
pub struct DecodeError {
    /// Kind the entry declares.
    pub expected: EntryKind,
    /// The offending JSON, rendered.
    pub found: String,
}

impl EntryValue {
    /// Kind of this value.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Integer(_) => EntryKind::Integer,
            Self::Long(_) => EntryKind::Long,
            Self::Boolean(_) => EntryKind::Boolean,
            Self::Text(_) => EntryKind::Text,
            Self::Channel(_) => EntryKind::Channel,
            Self::Role(_) => EntryKind::Role,
            Self::Member(_) => EntryKind::Member,
        }
    }

    /// Persisted JSON form. References are stored as decimal strings so
    /// snowflakes survive consumers that read numbers as doubles.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Integer(n) => Value::from(*n),
            Self::Long(n) => Value::from(*n),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Text(s) => Value::String(s.clone()),
            Self::Channel(id) => Value::String(id.to_string()),
            Self::Role(id) => Value::String(id.to_string()),
            Self::Member(id) => Value::String(id.to_string()),
        }
    }

    /// Decode a stored column for an entry of `kind`.
    ///
    /// `null` decodes to `None`. References accept both the string form
    /// written by [`to_json`](Self::to_json) and bare JSON numbers.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the JSON does not fit `kind`.
    pub fn from_json(kind: EntryKind, value: &Value) -> Result<Option<Self>, DecodeError> {
        if value.is_null() {
            return Ok(None);
        }
        let mismatch = || DecodeError {
            expected: kind,
            found: value.to_string(),
        };
        let decoded = match kind {
            EntryKind::Integer => value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(Self::Integer),
            EntryKind::Long => value.as_i64().map(Self::Long),
            EntryKind::Boolean => value.as_bool().map(Self::Boolean),
            EntryKind::Text => value.as_str().map(|s| Self::Text(s.to_string())),
            EntryKind::Channel => snowflake(value).map(|id| Self::Channel(ChannelId(id))),
            EntryKind::Role => snowflake(value).map(|id| Self::Role(RoleId(id))),
            EntryKind::Member => snowflake(value).map(|id| Self::Member(UserId(id))),
        };
        decoded.map(Some).ok_or_else(mismatch)
    }
}

fn snowflake(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(EntryValue::Long(5).kind(), EntryKind::Long);
        assert_eq!(EntryValue::Role(RoleId(1)).kind(), EntryKind::Role);
        assert!(EntryKind::Member.is_reference());
        assert!(!EntryKind::Text.is_reference());
    }

    #[test]
    fn references_are_stored_as_strings() {
        let v = EntryValue::Channel(ChannelId(987_654_321_098_765_432));
        assert_eq!(v.to_json(), json!("987654321098765432"));
        assert_eq!(
            EntryValue::from_json(EntryKind::Channel, &v.to_json()).unwrap(),
            Some(v)
        );
    }

    #[test]
    fn numeric_snowflakes_are_accepted() {
        assert_eq!(
            EntryValue::from_json(EntryKind::Member, &json!(77)).unwrap(),
            Some(EntryValue::Member(UserId(77)))
        );
    }

    #[test]
    fn null_is_unset() {
        assert_eq!(
            EntryValue::from_json(EntryKind::Integer, &Value::Null).unwrap(),
            None
        );
    }

    #[test]
    fn integer_overflow_is_rejected() {
        let err = EntryValue::from_json(EntryKind::Integer, &json!(i64::MAX)).unwrap_err();
        assert_eq!(err.expected, EntryKind::Integer);
        assert_eq!(
            EntryValue::from_json(EntryKind::Long, &json!(i64::MAX)).unwrap(),
            Some(EntryValue::Long(i64::MAX))
        );
    }

    #[test]
    fn wrong_json_type_is_rejected() {
        let err = EntryValue::from_json(EntryKind::Boolean, &json!("yes")).unwrap_err();
        assert_eq!(err.to_string(), "expected boolean value, found \"yes\"");
    }
}
