//! Account roles reported by the marketplace backend.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The role attached to a logged-in account.
///
/// Only sellers get special treatment in the storefront. Roles the
/// storefront does not know about are kept verbatim so they round-trip
/// through the session unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// A regular buyer account (`"user"`).
    #[default]
    User,
    /// A seller account (`"seller"`).
    Seller,
    /// Any other role string.
    Other(String),
}

impl Role {
    /// The wire representation of this role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Seller => "seller",
            Self::Other(role) => role,
        }
    }

    /// Whether this account is a seller.
    #[must_use]
    pub const fn is_seller(&self) -> bool {
        matches!(self, Self::Seller)
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "user" => Self::User,
            "seller" => Self::Seller,
            _ => Self::Other(role),
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Self::from(role.to_owned())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles() {
        assert_eq!(Role::from("user"), Role::User);
        assert_eq!(Role::from("seller"), Role::Seller);
        assert!(Role::Seller.is_seller());
        assert!(!Role::User.is_seller());
    }

    #[test]
    fn test_role_matching_is_exact() {
        assert_eq!(Role::from("Seller"), Role::Other("Seller".to_string()));
        assert!(!Role::from("Seller").is_seller());
    }

    #[test]
    fn test_unknown_role_round_trips() {
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Other("admin".to_string()));
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_serialize_known() {
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), "\"seller\"");
    }
}
