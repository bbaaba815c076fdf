//! Session-related types.
//!
//! Types stored in the visitor's session: the logged-in account, the seller
//! flag, and the cart.

use serde::{Deserialize, Serialize};

use marketplace_core::{Role, UserId};

use crate::models::user::BackendUser;

/// Session-stored user identity.
///
/// Stored as JSON under [`keys::USER`] with camelCase field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Backend account ID.
    pub id: UserId,
    /// Display name derived at login.
    pub full_name: String,
    /// Account email as reported by the backend.
    pub email: String,
    /// Account role.
    pub role: Role,
}

impl From<&BackendUser> for SessionUser {
    fn from(user: &BackendUser) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name(),
            email: user.email.clone().unwrap_or_default(),
            role: user.role.clone(),
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const USER: &str = "user";

    /// Key for the seller flag. Holds `"true"` when set, absent otherwise.
    pub const IS_SELLER: &str = "isSeller";

    /// Key for the cart line items.
    pub const CART: &str = "cart";
}

/// Value stored under [`keys::IS_SELLER`].
pub const SELLER_FLAG_VALUE: &str = "true";
