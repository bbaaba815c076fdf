//! Account data returned by the marketplace backend.

use serde::Deserialize;

use marketplace_core::{Role, UserId};

/// Successful response body of `POST /auth/log-in`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: BackendUser,
}

/// The account as described by the backend.
///
/// Only `id` is required; every other field falls back to an empty value so
/// that partial profiles still log in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendUser {
    pub id: UserId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl BackendUser {
    /// Name to greet the user with.
    ///
    /// First, middle, and last name joined by single spaces, skipping blank
    /// parts. Falls back to the username when no name part is set.
    #[must_use]
    pub fn full_name(&self) -> String {
        let joined = [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .filter_map(|part| part.as_deref().map(str::trim))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() {
            self.username.clone().unwrap_or_default()
        } else {
            joined
        }
    }
}
