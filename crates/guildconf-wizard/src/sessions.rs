//! Registry of guilds with an open wizard.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use guildconf_core::GuildId;
use tracing::debug;

/// Guilds currently being configured.
///
/// Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct ActiveSessions {
    guilds: Arc<Mutex<HashSet<GuildId>>>,
}

impl ActiveSessions {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `guild`, or `None` if it is already claimed.
    ///
    /// The claim is released when the returned guard is dropped.
    #[must_use]
    pub fn try_claim(&self, guild: GuildId) -> Option<SessionClaim> {
        let mut guilds = self.guilds.lock().unwrap_or_else(PoisonError::into_inner);
        if !guilds.insert(guild) {
            return None;
        }
        debug!(guild_id = %guild, "Claimed wizard slot");
        Some(SessionClaim {
            guild,
            guilds: Arc::clone(&self.guilds),
        })
    }

    /// Whether `guild` is claimed.
    #[must_use]
    pub fn is_active(&self, guild: GuildId) -> bool {
        self.guilds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&guild)
    }
}

/// RAII claim on a guild's wizard slot.
#[derive(Debug)]
pub struct SessionClaim {
    guild: GuildId,
    guilds: Arc<Mutex<HashSet<GuildId>>>,
}

impl SessionClaim {
    /// The claimed guild.
    #[must_use]
    pub fn guild(&self) -> GuildId {
        self.guild
    }
}

impl Drop for SessionClaim {
    fn drop(&mut self) {
        self.guilds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.guild);
        debug!(guild_id = %self.guild, "Released wizard slot");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_refused_until_release() {
        let sessions = ActiveSessions::new();
        let claim = sessions.try_claim(GuildId(1)).unwrap();
        assert_eq!(claim.guild(), GuildId(1));
        assert!(sessions.try_claim(GuildId(1)).is_none());
        assert!(sessions.try_claim(GuildId(2)).is_some());

        drop(claim);
        assert!(!sessions.is_active(GuildId(1)));
        assert!(sessions.try_claim(GuildId(1)).is_some());
    }

    #[test]
    fn clones_share_claims() {
        let sessions = ActiveSessions::new();
        let other = sessions.clone();
        let _claim = sessions.try_claim(GuildId(5)).unwrap();
        assert!(other.is_active(GuildId(5)));
        assert!(other.try_claim(GuildId(5)).is_none());
    }
}
