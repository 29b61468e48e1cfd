//! Platform identifiers.
//!
//! Guilds, channels, roles and users are addressed by 64-bit snowflakes.
//! Each gets its own newtype so a role id can never be stored where a
//! channel id is expected.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw snowflake value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

snowflake_id!(
    /// A guild (tenant) whose configuration is edited.
    GuildId
);
snowflake_id!(
    /// A text channel inside a guild.
    ChannelId
);
snowflake_id!(
    /// A role inside a guild.
    RoleId
);
snowflake_id!(
    /// A user, or a guild member when paired with a [`GuildId`].
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let id: ChannelId = " 123456789012345678 ".parse().unwrap();
        assert_eq!(id.get(), 123_456_789_012_345_678);
        assert_eq!(id.to_string(), "123456789012345678");
        assert!("abc".parse::<RoleId>().is_err());
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&GuildId(42)).unwrap();
        assert_eq!(json, "42");
        let back: GuildId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GuildId(42));
    }
}
