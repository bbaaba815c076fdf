//! Authentication route handlers.
//!
//! Credential login against the marketplace backend, and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use marketplace_core::Email;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::SessionUser;
use crate::services::auth::{HOME_PATH, landing_path, safe_redirect};
use crate::state::AppState;

/// Shown when the form is submitted without a usable email or password.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Please enter a valid email and password.";

// =============================================================================
// Form & Query Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub redirect_to: Option<String>,
    #[serde(default)]
    pub from_cart: Option<String>,
}

/// Query parameters of the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Set when the visitor was sent here by the cart's "Pay Now".
    #[serde(default)]
    pub from_cart: Option<String>,
    /// Local path to return to after logging in.
    #[serde(default)]
    pub redirect_to: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<String>,
    pub from_cart: bool,
    pub redirect_to: String,
}

impl LoginTemplate {
    fn new(from_cart: Option<&str>, redirect_to: Option<&str>) -> Self {
        Self {
            email: String::new(),
            error: None,
            from_cart: flag_is_set(from_cart),
            redirect_to: redirect_to
                .and_then(safe_redirect)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// A presence flag such as `?from_cart`: set unless explicitly `false`/`0`.
fn flag_is_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !matches!(v.trim(), "false" | "0"))
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate::new(query.from_cart.as_deref(), query.redirect_to.as_deref())
}

/// Handle login form submission.
///
/// On success the account is stored in the session (with the seller flag
/// for sellers) and the visitor is redirected. On failure the form is shown
/// again with the reason; the session is not touched.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let mut page = LoginTemplate::new(form.from_cart.as_deref(), form.redirect_to.as_deref());
    page.email = form.email.trim().to_string();
    let password = SecretString::from(form.password);

    let email = match Email::parse(&form.email) {
        Ok(email) if !password.expose_secret().is_empty() => email,
        _ => {
            page.error = Some(MISSING_CREDENTIALS_MESSAGE.to_string());
            return Ok(page.into_response());
        }
    };

    let user = match state.auth().log_in(&email, &password).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, source = ?std::error::Error::source(&e), "Login failed");
            page.error = Some(e.to_string());
            return Ok(page.into_response());
        }
    };

    let session_user = SessionUser::from(&user);
    set_current_user(&session, &session_user).await?;

    set_sentry_user(&session_user.id, Some(session_user.email.as_str()));
    tracing::info!(
        user_id = %session_user.id,
        role = %session_user.role,
        "User logged in"
    );

    let destination = landing_path(&session_user.role, form.redirect_to.as_deref());
    Ok(Redirect::to(destination).into_response())
}

/// Handle logout.
///
/// Forgets the account and the seller flag; the cart stays.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    tracing::info!("User logged out");

    Ok(Redirect::to(HOME_PATH))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_template_drops_unsafe_redirect() {
        let page = LoginTemplate::new(None, Some("https://evil.test"));
        assert_eq!(page.redirect_to, "");

        let page = LoginTemplate::new(Some("true"), Some("/cart"));
        assert_eq!(page.redirect_to, "/cart");
        assert!(page.from_cart);
    }

    #[test]
    fn test_login_page_renders_error_and_notice() {
        let mut page = LoginTemplate::new(Some("true"), None);
        page.error = Some("Login failed. Please check your credentials.".to_string());
        let html = page.render().unwrap();

        assert!(html.contains("Login failed. Please check your credentials."));
        assert!(html.contains("Log in to complete your purchase"));
        assert!(html.contains("href=\"/signup\""));
    }

    #[test]
    fn test_from_cart_flag_is_lenient() {
        assert!(flag_is_set(Some("true")));
        assert!(flag_is_set(Some("1")));
        assert!(flag_is_set(Some("yes")));
        assert!(flag_is_set(Some("")));
        assert!(!flag_is_set(Some("false")));
        assert!(!flag_is_set(Some("0")));
        assert!(!flag_is_set(None));
    }

    #[test]
    fn test_login_page_without_error() {
        let html = LoginTemplate::new(None, None).render().unwrap();
        assert!(!html.contains("role=\"alert\""));
        assert!(!html.contains("Log in to complete your purchase"));
    }
}
