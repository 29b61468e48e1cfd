//! Rendering stored values for operators.

use guildconf_core::{Directory, DirectoryError, EntryValue, GuildId, Translator};

/// Short human string for a staged value.
///
/// Numbers and text are shown verbatim, booleans as the localized yes/no,
/// references as `#channel`, `@role` or `name#discriminator`. An unset value
/// renders as the localized `none`, and so does a stored reference that the
/// directory no longer knows.
///
/// # Errors
///
/// Only [`DirectoryError::Transport`] is returned; lookup misses are
/// rendered as `none`.
pub async fn display_value(
    value: Option<&EntryValue>,
    guild: GuildId,
    directory: &dyn Directory,
    tr: &dyn Translator,
) -> Result<String, DirectoryError> {
    let Some(value) = value else {
        return Ok(tr.translate("none", &[]));
    };
    let resolved = match value {
        EntryValue::Integer(n) => return Ok(n.to_string()),
        EntryValue::Long(n) => return Ok(n.to_string()),
        EntryValue::Boolean(b) => return Ok(tr.translate(if *b { "yes" } else { "no" }, &[])),
        EntryValue::Text(s) => return Ok(s.clone()),
        EntryValue::Channel(id) => directory
            .channel(guild, *id)
            .await
            .map(|c| format!("#{}", c.name)),
        EntryValue::Role(id) => directory.role(guild, *id).await.map(|r| format!("@{}", r.name)),
        EntryValue::Member(id) => directory.member(guild, *id).await.map(|m| m.tag()),
    };
    match resolved {
        Ok(text) => Ok(text),
        Err(e) if e.is_retryable() => {
            tracing::debug!(error = %e, "Stored reference no longer resolves");
            Ok(tr.translate("none", &[]))
        },
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildconf_core::{ChannelId, MessageBundle, RoleId, StaticDirectory, UserId};

    const G: GuildId = GuildId(1);

    async fn fixture() -> (StaticDirectory, MessageBundle) {
        let dir = StaticDirectory::new();
        dir.add_channel(G, ChannelId(10), "changelog").await;
        dir.add_role(G, RoleId(20), "Mods").await;
        dir.add_member(G, UserId(30), "ann", Some("0001".into())).await;
        (dir, MessageBundle::english().unwrap())
    }

    #[tokio::test]
    async fn scalars_render_verbatim() {
        let (dir, tr) = fixture().await;
        for (value, expected) in [
            (EntryValue::Integer(-4), "-4"),
            (EntryValue::Long(9_000_000_000), "9000000000"),
            (EntryValue::Text("!".into()), "!"),
            (EntryValue::Boolean(true), "yes"),
            (EntryValue::Boolean(false), "no"),
        ] {
            assert_eq!(
                display_value(Some(&value), G, &dir, &tr).await.unwrap(),
                expected
            );
        }
    }

    #[tokio::test]
    async fn references_resolve_through_directory() {
        let (dir, tr) = fixture().await;
        let channel = EntryValue::Channel(ChannelId(10));
        let role = EntryValue::Role(RoleId(20));
        let member = EntryValue::Member(UserId(30));
        assert_eq!(display_value(Some(&channel), G, &dir, &tr).await.unwrap(), "#changelog");
        assert_eq!(display_value(Some(&role), G, &dir, &tr).await.unwrap(), "@Mods");
        assert_eq!(display_value(Some(&member), G, &dir, &tr).await.unwrap(), "ann#0001");
    }

    #[tokio::test]
    async fn unset_and_dangling_render_none() {
        let (dir, tr) = fixture().await;
        assert_eq!(display_value(None, G, &dir, &tr).await.unwrap(), "none");
        let gone = EntryValue::Channel(ChannelId(99));
        assert_eq!(display_value(Some(&gone), G, &dir, &tr).await.unwrap(), "none");
    }

    #[tokio::test]
    async fn french_booleans() {
        let (dir, _) = fixture().await;
        let fr = MessageBundle::builtin("fr").unwrap();
        let v = EntryValue::Boolean(true);
        assert_eq!(display_value(Some(&v), G, &dir, &fr).await.unwrap(), "oui");
    }
}
