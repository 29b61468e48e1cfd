//! Numbered configurator picker used in `menu` selection mode.

use guildconf_core::{GuildConfigurator, Translator};

use crate::error::SelectionError;
use crate::markdown::{bold, code};

/// What the picked configurator will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPurpose {
    /// Open an edit session.
    Edit,
    /// Open a reset confirmation.
    Reset,
}

impl PickerPurpose {
    fn header_key(self) -> &'static str {
        match self {
            Self::Edit => "prompt_feature_setup",
            Self::Reset => "prompt_feature_reset",
        }
    }
}

/// Picker text: a header, then one `` `i`: **Name** - Description `` line
/// per configurator, then the annotation of the previous bad reply.
#[must_use]
pub fn render_picker(
    configurators: &[GuildConfigurator],
    purpose: PickerPurpose,
    tr: &dyn Translator,
    error: Option<&str>,
) -> String {
    let mut out = bold(&tr.translate(purpose.header_key(), &[]));
    out.push_str("\n\n");
    for (i, configurator) in configurators.iter().enumerate() {
        let number = i.saturating_add(1).to_string();
        out.push_str(&format!("{}: {}", code(&number), bold(configurator.name())));
        if !configurator.description().is_empty() {
            out.push_str(" - ");
            out.push_str(configurator.description());
        }
        out.push('\n');
    }
    if let Some(error) = error {
        out.push_str("\n⚠️ ");
        out.push_str(error);
        out.push('\n');
    }
    out
}

/// Parse a 1-based picker reply into a 0-based index below `count`.
///
/// # Errors
///
/// [`SelectionError`] when the reply is not an integer or out of range.
pub fn parse_selection(input: &str, count: usize) -> Result<usize, SelectionError> {
    let index: i64 = input
        .trim()
        .parse()
        .map_err(|_| SelectionError::NotANumber { count })?;
    usize::try_from(index)
        .ok()
        .filter(|i| (1..=count).contains(i))
        .map(|i| i.saturating_sub(1))
        .ok_or(SelectionError::OutOfRange { index, count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use guildconf_core::{ConfiguratorTemplate, GuildId, MessageBundle};
    use guildconf_storage::MemoryConfigStore;

    #[test]
    fn selection_is_one_based() {
        assert_eq!(parse_selection("1", 3), Ok(0));
        assert_eq!(parse_selection(" 3 ", 3), Ok(2));
        assert_eq!(
            parse_selection("4", 3),
            Err(SelectionError::OutOfRange { index: 4, count: 3 })
        );
        assert_eq!(
            parse_selection("0", 3),
            Err(SelectionError::OutOfRange { index: 0, count: 3 })
        );
        assert_eq!(
            parse_selection("-1", 3),
            Err(SelectionError::OutOfRange { index: -1, count: 3 })
        );
        assert_eq!(
            parse_selection("two", 3),
            Err(SelectionError::NotANumber { count: 3 })
        );
        assert!(parse_selection("1", 0).is_err());
    }

    #[tokio::test]
    async fn lists_configurators_in_order() {
        let store = Arc::new(MemoryConfigStore::new());
        let tr = MessageBundle::english().unwrap();
        let cfgs = vec![
            ConfiguratorTemplate::new("core", "Server", "General settings")
                .hydrate(GuildId(1), store.clone())
                .await
                .unwrap(),
            ConfiguratorTemplate::new("music", "Music", "")
                .hydrate(GuildId(1), store)
                .await
                .unwrap(),
        ];

        let text = render_picker(&cfgs, PickerPurpose::Reset, &tr, None);
        assert_eq!(
            text,
            "**Which feature do you want to reset? Reply with its number.**\n\n\
             `1`: **Server** - General settings\n\
             `2`: **Music**\n"
        );

        let text = render_picker(&cfgs, PickerPurpose::Edit, &tr, Some("Reply with a number between 1 and 2."));
        assert!(text.starts_with("**Which feature do you want to configure?"));
        assert!(text.ends_with("\n⚠️ Reply with a number between 1 and 2.\n"));
    }
}
