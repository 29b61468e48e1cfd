//! Value validators attached to configuration entries.

use std::fmt;
use std::sync::Arc;

use crate::value::EntryValue;

type Predicate = Arc<dyn Fn(&EntryValue) -> bool + Send + Sync>;

/// A predicate over candidate values plus the message shown when it fails.
///
/// The message is already localized: validators are built by blueprints,
/// which receive the translator for the operator's locale.
#[derive(Clone)]
pub struct Validator {
    accepts: Predicate,
    message: String,
}

impl Validator {
    /// Accept values for which `pred` holds.
    pub fn allowing_if<F>(message: impl Into<String>, pred: F) -> Self
    where
        F: Fn(&EntryValue) -> bool + Send + Sync + 'static,
    {
        Self {
            accepts: Arc::new(pred),
            message: message.into(),
        }
    }

    /// Reject values for which `pred` holds.
    pub fn denying_if<F>(message: impl Into<String>, pred: F) -> Self
    where
        F: Fn(&EntryValue) -> bool + Send + Sync + 'static,
    {
        Self::allowing_if(message, move |v| !pred(v))
    }

    /// Reject text that is empty or whitespace only.
    pub fn not_blank(message: impl Into<String>) -> Self {
        Self::denying_if(message, |v| matches!(v, EntryValue::Text(s) if s.trim().is_empty()))
    }

    /// Check a candidate value.
    ///
    /// # Errors
    ///
    /// Returns the rejection message if the value is not accepted.
    pub fn check(&self, value: &EntryValue) -> Result<(), &str> {
        if (self.accepts)(value) {
            Ok(())
        } else {
            Err(&self.message)
        }
    }

    /// Rejection message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_blank_rejects_whitespace() {
        let v = Validator::not_blank("must not be blank");
        assert_eq!(
            v.check(&EntryValue::Text("   ".into())),
            Err("must not be blank")
        );
        assert!(v.check(&EntryValue::Text("!".into())).is_ok());
    }

    #[test]
    fn allowing_and_denying_are_complements() {
        let positive = Validator::allowing_if("positive only", |v| {
            matches!(v, EntryValue::Integer(n) if *n > 0)
        });
        let negative = Validator::denying_if("no positives", |v| {
            matches!(v, EntryValue::Integer(n) if *n > 0)
        });
        let five = EntryValue::Integer(5);
        assert!(positive.check(&five).is_ok());
        assert!(negative.check(&five).is_err());
        assert_eq!(negative.message(), "no positives");
    }

    #[test]
    fn debug_hides_closure() {
        let v = Validator::not_blank("blank");
        assert!(format!("{v:?}").contains("blank"));
    }
}
