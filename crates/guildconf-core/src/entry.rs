//! A single typed configuration entry.

use crate::error::ValidationError;
use crate::validator::Validator;
use crate::value::{EntryKind, EntryValue};

/// One named, typed, nullable configuration value.
///
/// The value held here is *staged*: [`set`](Self::set) changes only this
/// in-memory cell. Nothing reaches the store until the owning
/// [`GuildConfigurator`](crate::GuildConfigurator) is saved.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    key: String,
    display_name: String,
    description: Option<String>,
    kind: EntryKind,
    read_only: bool,
    validator: Option<Validator>,
    value: Option<EntryValue>,
    dirty: bool,
}

impl ConfigEntry {
    /// Create a writable, unset entry. The display name defaults to the key.
    pub fn new(key: impl Into<String>, kind: EntryKind) -> Self {
        let key = key.into();
        Self {
            display_name: key.clone(),
            key,
            description: None,
            kind,
            read_only: false,
            validator: None,
            value: None,
            dirty: false,
        }
    }

    /// Set the human-readable name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Set the description shown in prompts. Empty strings are ignored.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.is_empty()).then_some(description);
        self
    }

    /// Attach a validator.
    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Mark the entry read-only. It is shown in summaries but never edited.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Stable key, unique within the configurator. Also the storage column.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Value kind.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Whether the entry may be edited.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Staged value. `None` means unset.
    #[must_use]
    pub fn get(&self) -> Option<&EntryValue> {
        self.value.as_ref()
    }

    /// Whether [`set`](Self::set) succeeded since the entry was last loaded.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Stage a new value.
    ///
    /// Clearing (`None`) skips the validator.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::ReadOnly`] on a read-only entry.
    /// - [`ValidationError::KindMismatch`] if the value's kind differs.
    /// - [`ValidationError::Rejected`] if the validator denies the value.
    pub fn set(&mut self, value: Option<EntryValue>) -> Result<(), ValidationError> {
        if self.read_only {
            return Err(ValidationError::ReadOnly {
                key: self.key.clone(),
            });
        }
        if let Some(v) = &value {
            if v.kind() != self.kind {
                return Err(ValidationError::KindMismatch {
                    key: self.key.clone(),
                    expected: self.kind,
                    found: v.kind(),
                });
            }
            if let Some(validator) = &self.validator {
                validator
                    .check(v)
                    .map_err(|message| ValidationError::Rejected {
                        key: self.key.clone(),
                        message: message.to_string(),
                    })?;
            }
        }
        self.value = value;
        self.dirty = true;
        Ok(())
    }

    /// Replace the staged value with what the store holds, clearing the
    /// dirty flag. Validators do not run on stored data.
    pub(crate) fn load(&mut self, value: Option<EntryValue>) {
        self.value = value;
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ChannelId;

    #[test]
    fn display_name_defaults_to_key() {
        let e = ConfigEntry::new("timeout_seconds", EntryKind::Integer);
        assert_eq!(e.display_name(), "timeout_seconds");
        assert!(e.description().is_none());
        assert!(e.get().is_none());
        assert!(!e.is_dirty());
    }

    #[test]
    fn set_stages_value_and_marks_dirty() {
        let mut e = ConfigEntry::new("timeout_seconds", EntryKind::Integer);
        e.set(Some(EntryValue::Integer(45))).unwrap();
        assert_eq!(e.get(), Some(&EntryValue::Integer(45)));
        assert!(e.is_dirty());
    }

    #[test]
    fn read_only_rejects_set() {
        let mut e = ConfigEntry::new("owner", EntryKind::Text).read_only();
        let err = e.set(None).unwrap_err();
        assert!(matches!(err, ValidationError::ReadOnly { .. }));
        assert!(!e.is_dirty());
    }

    #[test]
    fn kind_mismatch_rejected() {
        let mut e = ConfigEntry::new("log", EntryKind::Channel);
        let err = e.set(Some(EntryValue::Text("general".into()))).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::KindMismatch {
                expected: EntryKind::Channel,
                found: EntryKind::Text,
                ..
            }
        ));
        e.set(Some(EntryValue::Channel(ChannelId(1)))).unwrap();
    }

    #[test]
    fn validator_runs_on_values_but_not_on_clear() {
        let mut e = ConfigEntry::new("prefix", EntryKind::Text)
            .with_validator(Validator::not_blank("blank"));
        e.set(Some(EntryValue::Text("!".into()))).unwrap();

        let err = e.set(Some(EntryValue::Text(" ".into()))).unwrap_err();
        assert_eq!(err.to_string(), "blank");
        assert_eq!(e.get(), Some(&EntryValue::Text("!".into())));

        e.set(None).unwrap();
        assert!(e.get().is_none());
    }

    #[test]
    fn empty_description_is_dropped() {
        let e = ConfigEntry::new("k", EntryKind::Text).with_description("");
        assert!(e.description().is_none());
    }

    #[test]
    fn load_clears_dirty() {
        let mut e = ConfigEntry::new("k", EntryKind::Boolean);
        e.set(Some(EntryValue::Boolean(true))).unwrap();
        e.load(Some(EntryValue::Boolean(false)));
        assert!(!e.is_dirty());
        assert_eq!(e.get(), Some(&EntryValue::Boolean(false)));
    }
}
