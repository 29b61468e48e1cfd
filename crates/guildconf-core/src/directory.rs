//! Directory resolution: channels, roles and members of a guild.
//!
//! The [`Directory`] trait turns operator text into validated references
//! and stored references back into names. [`StaticDirectory`] is an
//! in-process implementation seeded up front, used by the console harness
//! and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ids::{ChannelId, GuildId, RoleId, UserId};

/// Errors from directory lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// Nothing matched.
    #[error("{kind} not found: {query}")]
    NotFound {
        /// What was looked up (`channel`, `role`, `member`).
        kind: &'static str,
        /// The input or id.
        query: String,
    },

    /// More than one thing matched a name.
    #[error("{kind} '{query}' is ambiguous ({matches} matches)")]
    Ambiguous {
        /// What was looked up.
        kind: &'static str,
        /// The input.
        query: String,
        /// Number of matches.
        matches: usize,
    },

    /// The directory could not be reached.
    #[error("directory unavailable: {0}")]
    Transport(String),
}

impl DirectoryError {
    /// Whether the operator can fix this by typing something else.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Ambiguous { .. })
    }
}

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// A text channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Channel id.
    pub id: ChannelId,
    /// Channel name without the leading `#`.
    pub name: String,
}

/// A role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Role id.
    pub id: RoleId,
    /// Role name without the leading `@`.
    pub name: String,
}

/// A guild member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// User id.
    pub id: UserId,
    /// Username.
    pub name: String,
    /// Legacy four-digit discriminator, if the account still has one.
    pub discriminator: Option<String>,
}

impl Member {
    /// `name#discriminator`, or the bare name.
    #[must_use]
    pub fn tag(&self) -> String {
        match &self.discriminator {
            Some(d) => format!("{}#{d}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Resolves references inside a guild.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Resolve operator text (mention, id, or name) to a channel.
    async fn resolve_channel(&self, guild: GuildId, text: &str) -> DirectoryResult<Channel>;

    /// Resolve operator text to a role.
    async fn resolve_role(&self, guild: GuildId, text: &str) -> DirectoryResult<Role>;

    /// Resolve operator text to a member.
    async fn resolve_member(&self, guild: GuildId, text: &str) -> DirectoryResult<Member>;

    /// Fetch a channel by id.
    async fn channel(&self, guild: GuildId, id: ChannelId) -> DirectoryResult<Channel>;

    /// Fetch a role by id.
    async fn role(&self, guild: GuildId, id: RoleId) -> DirectoryResult<Role>;

    /// Fetch a member by id.
    async fn member(&self, guild: GuildId, id: UserId) -> DirectoryResult<Member>;
}

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

/// Extract the id from `<{prefix}id>` mention syntax.
fn mention_id(text: &str, prefixes: &[&str]) -> Option<u64> {
    let inner = text.strip_prefix('<')?.strip_suffix('>')?;
    prefixes
        .iter()
        .find_map(|p| inner.strip_prefix(p))
        .and_then(|id| id.parse().ok())
}

/// How operator text addresses an item.
enum Query<'a> {
    Id(u64),
    Name(&'a str),
}

fn classify<'a>(text: &'a str, mention_prefixes: &[&str], sigil: char) -> Query<'a> {
    let text = text.trim();
    if let Some(id) = mention_id(text, mention_prefixes) {
        return Query::Id(id);
    }
    if let Ok(id) = text.parse() {
        return Query::Id(id);
    }
    Query::Name(text.strip_prefix(sigil).unwrap_or(text))
}

/// Pick exactly one match out of `candidates`.
fn single<T: Clone>(kind: &'static str, query: &str, candidates: &[&T]) -> DirectoryResult<T> {
    match candidates {
        [one] => Ok((*one).clone()),
        [] => Err(DirectoryError::NotFound {
            kind,
            query: query.to_string(),
        }),
        many => Err(DirectoryError::Ambiguous {
            kind,
            query: query.to_string(),
            matches: many.len(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Static implementation
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
struct GuildListing {
    channels: Vec<Channel>,
    roles: Vec<Role>,
    members: Vec<Member>,
}

/// A directory backed by in-memory listings.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    guilds: RwLock<HashMap<GuildId, GuildListing>>,
}

impl StaticDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel.
    pub async fn add_channel(&self, guild: GuildId, id: ChannelId, name: impl Into<String>) {
        let mut guilds = self.guilds.write().await;
        guilds.entry(guild).or_default().channels.push(Channel {
            id,
            name: name.into(),
        });
    }

    /// Add a role.
    pub async fn add_role(&self, guild: GuildId, id: RoleId, name: impl Into<String>) {
        let mut guilds = self.guilds.write().await;
        guilds.entry(guild).or_default().roles.push(Role {
            id,
            name: name.into(),
        });
    }

    /// Add a member.
    pub async fn add_member(
        &self,
        guild: GuildId,
        id: UserId,
        name: impl Into<String>,
        discriminator: Option<String>,
    ) {
        let mut guilds = self.guilds.write().await;
        guilds.entry(guild).or_default().members.push(Member {
            id,
            name: name.into(),
            discriminator,
        });
    }

    async fn listing(&self, guild: GuildId) -> GuildListing {
        self.guilds
            .read()
            .await
            .get(&guild)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl Directory for StaticDirectory {
    async fn resolve_channel(&self, guild: GuildId, text: &str) -> DirectoryResult<Channel> {
        let listing = self.listing(guild).await;
        let found: Vec<&Channel> = match classify(text, &["#"], '#') {
            Query::Id(id) => listing.channels.iter().filter(|c| c.id.0 == id).collect(),
            Query::Name(name) => listing
                .channels
                .iter()
                .filter(|c| c.name.eq_ignore_ascii_case(name))
                .collect(),
        };
        single("channel", text.trim(), &found)
    }

    async fn resolve_role(&self, guild: GuildId, text: &str) -> DirectoryResult<Role> {
        let listing = self.listing(guild).await;
        let found: Vec<&Role> = match classify(text, &["@&"], '@') {
            Query::Id(id) => listing.roles.iter().filter(|r| r.id.0 == id).collect(),
            Query::Name(name) => listing
                .roles
                .iter()
                .filter(|r| r.name.eq_ignore_ascii_case(name))
                .collect(),
        };
        single("role", text.trim(), &found)
    }

    async fn resolve_member(&self, guild: GuildId, text: &str) -> DirectoryResult<Member> {
        let listing = self.listing(guild).await;
        let found: Vec<&Member> = match classify(text, &["@!", "@"], '@') {
            Query::Id(id) => listing.members.iter().filter(|m| m.id.0 == id).collect(),
            Query::Name(name) => listing
                .members
                .iter()
                .filter(|m| m.tag().eq_ignore_ascii_case(name) || m.name.eq_ignore_ascii_case(name))
                .collect(),
        };
        single("member", text.trim(), &found)
    }

    async fn channel(&self, guild: GuildId, id: ChannelId) -> DirectoryResult<Channel> {
        let listing = self.listing(guild).await;
        let found: Vec<&Channel> = listing.channels.iter().filter(|c| c.id == id).collect();
        single("channel", &id.to_string(), &found)
    }

    async fn role(&self, guild: GuildId, id: RoleId) -> DirectoryResult<Role> {
        let listing = self.listing(guild).await;
        let found: Vec<&Role> = listing.roles.iter().filter(|r| r.id == id).collect();
        single("role", &id.to_string(), &found)
    }

    async fn member(&self, guild: GuildId, id: UserId) -> DirectoryResult<Member> {
        let listing = self.listing(guild).await;
        let found: Vec<&Member> = listing.members.iter().filter(|m| m.id == id).collect();
        single("member", &id.to_string(), &found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: GuildId = GuildId(1);

    async fn directory() -> StaticDirectory {
        let dir = StaticDirectory::new();
        dir.add_channel(G, ChannelId(10), "general").await;
        dir.add_channel(G, ChannelId(11), "changelog").await;
        dir.add_channel(G, ChannelId(12), "Changelog").await;
        dir.add_role(G, RoleId(20), "Moderators").await;
        dir.add_member(G, UserId(30), "ann", Some("0001".into())).await;
        dir.add_member(G, UserId(31), "bob", None).await;
        dir
    }

    #[tokio::test]
    async fn channel_by_mention_id_and_name() {
        let dir = directory().await;
        assert_eq!(dir.resolve_channel(G, "<#10>").await.unwrap().id, ChannelId(10));
        assert_eq!(dir.resolve_channel(G, " 10 ").await.unwrap().id, ChannelId(10));
        assert_eq!(dir.resolve_channel(G, "#GENERAL").await.unwrap().id, ChannelId(10));
    }

    #[tokio::test]
    async fn duplicate_names_are_ambiguous() {
        let dir = directory().await;
        let err = dir.resolve_channel(G, "changelog").await.unwrap_err();
        assert!(matches!(err, DirectoryError::Ambiguous { matches: 2, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn role_mentions_use_ampersand() {
        let dir = directory().await;
        assert_eq!(dir.resolve_role(G, "<@&20>").await.unwrap().name, "Moderators");
        assert_eq!(dir.resolve_role(G, "@moderators").await.unwrap().id, RoleId(20));
    }

    #[tokio::test]
    async fn member_by_mention_tag_and_name() {
        let dir = directory().await;
        assert_eq!(dir.resolve_member(G, "<@!30>").await.unwrap().id, UserId(30));
        assert_eq!(dir.resolve_member(G, "<@31>").await.unwrap().id, UserId(31));
        assert_eq!(dir.resolve_member(G, "ann#0001").await.unwrap().id, UserId(30));
        assert_eq!(dir.resolve_member(G, "BOB").await.unwrap().tag(), "bob");
    }

    #[tokio::test]
    async fn unknown_guild_or_name_is_not_found() {
        let dir = directory().await;
        let err = dir.resolve_channel(GuildId(2), "general").await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { kind: "channel", .. }));
        let err = dir.channel(G, ChannelId(99)).await.unwrap_err();
        assert_eq!(err.to_string(), "channel not found: 99");
    }

    #[test]
    fn transport_is_not_retryable() {
        assert!(!DirectoryError::Transport("timeout".into()).is_retryable());
    }
}
