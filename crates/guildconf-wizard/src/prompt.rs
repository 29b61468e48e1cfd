//! Prompt text shown while an entry awaits a reply.

use guildconf_core::{ConfigEntry, EntryKind, Translator};

use crate::markdown::bold;

/// Translation key of the input hint for `kind`, if the kind has one.
#[must_use]
pub fn expectation_key(kind: EntryKind) -> Option<&'static str> {
    match kind {
        EntryKind::Integer | EntryKind::Long => Some("prompt_numeric"),
        EntryKind::Boolean => Some("prompt_boolean"),
        EntryKind::Text => None,
        EntryKind::Channel => Some("prompt_channel"),
        EntryKind::Role => Some("prompt_role"),
        EntryKind::Member => Some("prompt_member"),
    }
}

/// Full prompt for `entry`.
///
/// ```text
/// **Display Name** (Configurator)
///
/// description
///
/// **Current value:** #changelog
/// ⏭️ skip · 🔄 clear · ✅ finish · 🚫 cancel
/// ⚠️ previous error, if any
/// **New value (a channel mention, id or name):**
/// ```
pub fn render_prompt(
    entry: &ConfigEntry,
    configurator_name: &str,
    current_display: &str,
    error: Option<&str>,
    tr: &dyn Translator,
) -> String {
    let mut out = format!("{} ({configurator_name})\n\n", bold(entry.display_name()));
    if let Some(description) = entry.description() {
        out.push_str(description);
        out.push_str("\n\n");
    }
    out.push_str(&bold(&tr.translate("current_value", &[])));
    out.push(' ');
    out.push_str(current_display);
    out.push('\n');
    out.push_str(&tr.translate("react_entry", &[]));
    out.push('\n');
    if let Some(error) = error {
        out.push_str("⚠️ ");
        out.push_str(error);
        out.push('\n');
    }
    let label = tr.translate("prompt_new_value", &[]);
    let label = match expectation_key(entry.kind()) {
        Some(key) => format!("{label} ({})", tr.translate(key, &[])),
        None => label,
    };
    out.push_str(&bold(&format!("{label}:")));
    out.push('\n');
    out
}
