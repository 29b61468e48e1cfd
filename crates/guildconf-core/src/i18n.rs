//! Localization.
//!
//! Every operator-visible string goes through a [`Translator`]. The
//! [`MessageBundle`] implementation reads flat TOML tables of
//! `key = "text"` pairs, where `{0}`, `{1}`, ... are replaced by positional
//! arguments. English and French bundles are embedded in the binary.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{CoreError, CoreResult};

/// Locales with an embedded bundle, as `(tag, native name)`.
pub const SUPPORTED_LOCALES: &[(&str, &str)] = &[("en", "English"), ("fr", "Français")];

const EN_BUNDLE: &str = include_str!("locales/en.toml");
const FR_BUNDLE: &str = include_str!("locales/fr.toml");

/// Source of operator-visible strings.
pub trait Translator: Send + Sync {
    /// Locale tag, e.g. `en`.
    fn locale(&self) -> &str;

    /// Translate `key`, substituting positional `args`.
    fn translate(&self, key: &str, args: &[&str]) -> String;

    /// Whether `input` is the localized token for `key`, ignoring case and
    /// diacritics.
    fn matches_token(&self, input: &str, key: &str) -> bool {
        fold_token(input) == fold_token(&self.translate(key, &[]))
    }
}

/// Fold a token for loose comparison: trim, lowercase, and strip accents
/// from Latin letters.
#[must_use]
pub fn fold_token(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.trim().chars().flat_map(char::to_lowercase) {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => out.push('a'),
            'ç' | 'ć' | 'č' => out.push('c'),
            'ď' => out.push('d'),
            'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => out.push('e'),
            'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => out.push('i'),
            'ł' => out.push('l'),
            'ñ' | 'ń' | 'ň' => out.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => out.push('o'),
            'ř' => out.push('r'),
            'ś' | 'š' => out.push('s'),
            'ť' => out.push('t'),
            'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => out.push('u'),
            'ý' | 'ÿ' => out.push('y'),
            'ź' | 'ż' | 'ž' => out.push('z'),
            'æ' => out.push_str("ae"),
            'œ' => out.push_str("oe"),
            'ß' => out.push_str("ss"),
            other => out.push(other),
        }
    }
    out
}

/// A flat table of messages for one locale, with an optional fallback.
#[derive(Debug, Clone)]
pub struct MessageBundle {
    locale: String,
    messages: HashMap<String, String>,
    fallback: Option<Box<MessageBundle>>,
}

impl MessageBundle {
    /// Parse a bundle from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Bundle`] if the text is not a flat string table.
    pub fn from_toml(locale: impl Into<String>, text: &str) -> CoreResult<Self> {
        let locale = locale.into();
        let messages: HashMap<String, String> =
            toml::from_str(text).map_err(|e| CoreError::Bundle {
                locale: locale.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            locale,
            messages,
            fallback: None,
        })
    }

    /// The embedded English bundle.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Bundle`] if the embedded text is malformed.
    pub fn english() -> CoreResult<Self> {
        Self::from_toml("en", EN_BUNDLE)
    }

    /// The embedded bundle for `locale`, falling back to English for keys
    /// the locale does not define.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedLocale`] for unknown tags.
    pub fn builtin(locale: &str) -> CoreResult<Self> {
        match locale {
            "en" => Self::english(),
            "fr" => Ok(Self::from_toml("fr", FR_BUNDLE)?.with_fallback(Self::english()?)),
            other => Err(CoreError::UnsupportedLocale(other.to_string())),
        }
    }

    /// Consult `fallback` for keys missing here.
    #[must_use]
    pub fn with_fallback(mut self, fallback: MessageBundle) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.messages
            .get(key)
            .map(String::as_str)
            .or_else(|| self.fallback.as_ref().and_then(|f| f.lookup(key)))
    }
}

impl Translator for MessageBundle {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn translate(&self, key: &str, args: &[&str]) -> String {
        let Some(template) = self.lookup(key) else {
            warn!(locale = %self.locale, key, "Missing translation");
            return key.to_string();
        };
        let mut text = template.to_string();
        for (i, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{i}}}"), arg);
        }
        text
    }
}

/// Whether `tag` names an embedded locale.
#[must_use]
pub fn is_supported_locale(tag: &str) -> bool {
    SUPPORTED_LOCALES.iter().any(|(t, _)| *t == tag)
}
