//! Authentication against the marketplace backend.
//!
//! The storefront does not own accounts. Logging in is a single
//! `POST {backend}/auth/log-in` with a JSON `{email, password}` body; the
//! backend answers with `{"user": {...}}` on success.

mod error;

pub use error::LoginError;

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use marketplace_core::{Email, Role};

use crate::config::BackendConfig;
use crate::models::{BackendUser, LoginResponse};

/// Where visitors land when no other destination applies.
pub const HOME_PATH: &str = "/";

/// Client for the backend authentication endpoint.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    client: reqwest::Client,
    login_url: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl AuthClient {
    /// Create a new client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. the TLS
    /// backend fails to initialize).
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(AuthClientInner {
                client,
                login_url: config.login_url(),
            }),
        })
    }

    /// Exchange credentials for the backend's account record.
    ///
    /// # Errors
    ///
    /// - `LoginError::LoginFailed` if the backend answers with a non-2xx status.
    /// - `LoginError::UnexpectedResponse` if a 2xx answer is not a JSON
    ///   `{"user": {...}}` document.
    /// - `LoginError::Network` if the request cannot be completed.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn log_in(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<BackendUser, LoginError> {
        let request = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };

        let response = self
            .inner
            .client
            .post(&self.inner.login_url)
            .json(&request)
            .send()
            .await
            .map_err(LoginError::Network)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "Backend rejected login");
            return Err(LoginError::LoginFailed {
                status: status.as_u16(),
            });
        }

        if !is_json(response.headers()) {
            tracing::warn!(
                content_type = ?response.headers().get(CONTENT_TYPE),
                "Backend login response is not JSON"
            );
            return Err(LoginError::UnexpectedResponse);
        }

        let body = response.bytes().await.map_err(LoginError::Network)?;
        let parsed: LoginResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse backend login response");
            LoginError::UnexpectedResponse
        })?;

        Ok(parsed.user)
    }
}

/// Whether the response declares a JSON body.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"))
}

/// Accept a caller-supplied redirect only if it stays on this site.
#[must_use]
pub fn safe_redirect(target: &str) -> Option<&str> {
    let local = target.starts_with('/') && !target.starts_with("//") && !target.contains('\\');
    local.then_some(target)
}

/// Page to send a freshly logged-in visitor to.
///
/// Sellers always go home. Everyone else goes to the requested page when it
/// is a local path, otherwise home.
#[must_use]
pub fn landing_path<'a>(role: &Role, redirect_to: Option<&'a str>) -> &'a str {
    if role.is_seller() {
        return HOME_PATH;
    }
    redirect_to.and_then(safe_redirect).unwrap_or(HOME_PATH)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use reqwest::header::HeaderValue;

    #[test]
    fn test_is_json() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        assert!(!is_json(&headers));

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(is_json(&headers));
    }

    #[test]
    fn test_safe_redirect() {
        assert_eq!(safe_redirect("/cart"), Some("/cart"));
        assert_eq!(safe_redirect("/orders?page=2"), Some("/orders?page=2"));
        assert_eq!(safe_redirect("//evil.test"), None);
        assert_eq!(safe_redirect("https://evil.test"), None);
        assert_eq!(safe_redirect("/\\evil.test"), None);
        assert_eq!(safe_redirect(""), None);
    }

    #[test]
    fn test_landing_path_for_seller_ignores_redirect() {
        assert_eq!(landing_path(&Role::Seller, Some("/cart")), "/");
    }

    #[test]
    fn test_landing_path_for_buyer() {
        assert_eq!(landing_path(&Role::User, Some("/cart")), "/cart");
        assert_eq!(landing_path(&Role::User, None), "/");
        assert_eq!(landing_path(&Role::User, Some("https://evil.test")), "/");
        assert_eq!(landing_path(&Role::from("admin"), Some("/orders")), "/orders");
    }
}
