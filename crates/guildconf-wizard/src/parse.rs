//! Turning operator replies into entry values.

use guildconf_core::{
    ConfigEntry, Directory, DirectoryError, EntryKind, EntryValue, GuildId, Translator,
};

use crate::error::InputError;

/// Why a reply was not applied.
#[derive(Debug)]
pub enum ParseFailure {
    /// Retryable: re-prompt the same entry.
    Input(InputError),
    /// The directory could not be reached; ends the session.
    Operational(DirectoryError),
}

impl From<DirectoryError> for ParseFailure {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::NotFound { query, .. } => Self::Input(InputError::Unresolved { query }),
            DirectoryError::Ambiguous { query, .. } => {
                Self::Input(InputError::Ambiguous { query })
            },
            transport @ DirectoryError::Transport(_) => Self::Operational(transport),
        }
    }
}

/// Convert `input` into a value of `kind`.
///
/// # Errors
///
/// [`ParseFailure::Input`] for malformed or unresolvable input,
/// [`ParseFailure::Operational`] for directory transport failures.
pub async fn parse_input(
    kind: EntryKind,
    input: &str,
    guild: GuildId,
    directory: &dyn Directory,
    tr: &dyn Translator,
) -> Result<EntryValue, ParseFailure> {
    let value = match kind {
        EntryKind::Integer => input
            .trim()
            .parse()
            .map(EntryValue::Integer)
            .map_err(|_| ParseFailure::Input(InputError::InvalidNumber))?,
        EntryKind::Long => input
            .trim()
            .parse()
            .map(EntryValue::Long)
            .map_err(|_| ParseFailure::Input(InputError::InvalidNumber))?,
        EntryKind::Boolean => {
            if tr.matches_token(input, "yes") {
                EntryValue::Boolean(true)
            } else if tr.matches_token(input, "no") {
                EntryValue::Boolean(false)
            } else {
                return Err(ParseFailure::Input(InputError::ExpectedBoolean));
            }
        },
        EntryKind::Text => EntryValue::Text(input.to_string()),
        EntryKind::Channel => {
            EntryValue::Channel(directory.resolve_channel(guild, input).await?.id)
        },
        EntryKind::Role => EntryValue::Role(directory.resolve_role(guild, input).await?.id),
        EntryKind::Member => EntryValue::Member(directory.resolve_member(guild, input).await?.id),
    };
    Ok(value)
}

/// Parse `input` for `entry` and stage it.
///
/// The entry is only touched when both parsing and validation succeed.
///
/// # Errors
///
/// See [`parse_input`]; validator rejections map to
/// [`InputError::Constraint`].
pub async fn apply_input(
    entry: &mut ConfigEntry,
    input: &str,
    guild: GuildId,
    directory: &dyn Directory,
    tr: &dyn Translator,
) -> Result<(), ParseFailure> {
    let value = parse_input(entry.kind(), input, guild, directory, tr).await?;
    entry
        .set(Some(value))
        .map_err(|e| ParseFailure::Input(InputError::Constraint(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildconf_core::{ChannelId, MessageBundle, StaticDirectory, Validator};

    const G: GuildId = GuildId(1);

    fn en() -> MessageBundle {
        MessageBundle::english().unwrap()
    }

    #[tokio::test]
    async fn integers() {
        let dir = StaticDirectory::new();
        let tr = en();
        let v = parse_input(EntryKind::Integer, " 45 ", G, &dir, &tr).await.unwrap();
        assert_eq!(v, EntryValue::Integer(45));
        let err = parse_input(EntryKind::Integer, "abc", G, &dir, &tr).await.unwrap_err();
        assert!(matches!(err, ParseFailure::Input(InputError::InvalidNumber)));
        let err = parse_input(EntryKind::Integer, "3000000000", G, &dir, &tr)
            .await
            .unwrap_err();
        assert!(matches!(err, ParseFailure::Input(InputError::InvalidNumber)));
        let v = parse_input(EntryKind::Long, "3000000000", G, &dir, &tr).await.unwrap();
        assert_eq!(v, EntryValue::Long(3_000_000_000));
    }

    #[tokio::test]
    async fn french_booleans_ignore_case() {
        let dir = StaticDirectory::new();
        let fr = MessageBundle::builtin("fr").unwrap();
        let v = parse_input(EntryKind::Boolean, "OUI", G, &dir, &fr).await.unwrap();
        assert_eq!(v, EntryValue::Boolean(true));
        let v = parse_input(EntryKind::Boolean, "Non", G, &dir, &fr).await.unwrap();
        assert_eq!(v, EntryValue::Boolean(false));
        let err = parse_input(EntryKind::Boolean, "maybe", G, &dir, &fr)
            .await
            .unwrap_err();
        assert!(matches!(err, ParseFailure::Input(InputError::ExpectedBoolean)));
        // English tokens are not accepted in a French session.
        assert!(parse_input(EntryKind::Boolean, "yes", G, &dir, &fr).await.is_err());
    }

    #[tokio::test]
    async fn text_is_verbatim() {
        let dir = StaticDirectory::new();
        let v = parse_input(EntryKind::Text, "  spaced  ", G, &dir, &en()).await.unwrap();
        assert_eq!(v, EntryValue::Text("  spaced  ".into()));
    }

    #[tokio::test]
    async fn references_map_directory_misses_to_input_errors() {
        let dir = StaticDirectory::new();
        dir.add_channel(G, ChannelId(10), "general").await;
        let tr = en();
        let v = parse_input(EntryKind::Channel, "#general", G, &dir, &tr).await.unwrap();
        assert_eq!(v, EntryValue::Channel(ChannelId(10)));

        let err = parse_input(EntryKind::Channel, "nowhere", G, &dir, &tr)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ParseFailure::Input(InputError::Unresolved { ref query }) if query == "nowhere"
        ));
    }

    #[test]
    fn transport_errors_are_operational() {
        let failure = ParseFailure::from(DirectoryError::Transport("down".into()));
        assert!(matches!(failure, ParseFailure::Operational(_)));
        let failure = ParseFailure::from(DirectoryError::Ambiguous {
            kind: "role",
            query: "mods".into(),
            matches: 2,
        });
        assert!(matches!(failure, ParseFailure::Input(InputError::Ambiguous { .. })));
    }

    #[tokio::test]
    async fn apply_stages_only_valid_values() {
        let dir = StaticDirectory::new();
        let tr = en();
        let mut entry = ConfigEntry::new("prefix", EntryKind::Text)
            .with_validator(Validator::not_blank("The value must not be blank."));

        let err = apply_input(&mut entry, "   ", G, &dir, &tr).await.unwrap_err();
        assert!(matches!(
            err,
            ParseFailure::Input(InputError::Constraint(ref m)) if m == "The value must not be blank."
        ));
        assert!(entry.get().is_none());
        assert!(!entry.is_dirty());

        apply_input(&mut entry, "?", G, &dir, &tr).await.unwrap();
        assert_eq!(entry.get(), Some(&EntryValue::Text("?".into())));
    }
}
