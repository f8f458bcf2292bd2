//! Strongly-typed ID wrappers for marketplace entities
//!
//! Each entity gets its own newtype so a provider ID can never be passed
//! where a booking ID is expected. IDs display as a short prefixed form
//! ("pro-1a2b3c4d") which the CLI also accepts as input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Whether a short display form (e.g. "bkg-1a2b3c4d") refers to this ID
            pub fn matches_short(&self, short: &str) -> bool {
                let short = short.strip_prefix($display_prefix).unwrap_or(short);
                !short.is_empty() && self.0.to_string().starts_with(short)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Try to parse the full UUID
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                // Try stripping common prefixes
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(CategoryId, "cat-");
define_id!(ProviderId, "pro-");
define_id!(BookingId, "bkg-");
define_id!(UserId, "usr-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_prefix() {
        let id = BookingId::new();
        let display = id.to_string();
        assert!(display.starts_with("bkg-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: ProviderId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: ProviderId = format!("pro-{}", uuid_str).parse().unwrap();
        assert_eq!(prefixed, id);
    }

    #[test]
    fn test_short_display_is_a_prefix_match() {
        let id = UserId::new();
        assert!(id.matches_short(&id.to_string()));
        assert!(!UserId::new().matches_short(&id.to_string()));
    }

    #[test]
    fn test_serialization_is_transparent() {
        let id = CategoryId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let back: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
