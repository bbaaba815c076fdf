//! Authentication extractors and session helpers.
//!
//! The logged-in account lives in the session under `"user"`; seller
//! accounts additionally carry the `"isSeller"` flag.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{SELLER_FLAG_VALUE, SessionUser, session_keys};

/// Extractor that requires a logged-in user.
///
/// If nobody is logged in, redirects to the login page with a
/// `redirect_to` pointing back at the requested path.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.full_name)
/// }
/// ```
pub struct RequireUser(pub SessionUser);

/// Rejection returned by [`RequireUser`].
pub enum AuthRejection {
    /// Redirect to the login page, then back to `return_to`.
    RedirectToLogin { return_to: String },
    /// No session layer is installed.
    MissingSession,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin { return_to } => {
                let target = format!("/login?redirect_to={}", urlencoding::encode(&return_to));
                Redirect::to(&target).into_response()
            }
            Self::MissingSession => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::MissingSession)?;

        current_user(session)
            .await
            .map(Self)
            .ok_or_else(|| AuthRejection::RedirectToLogin {
                return_to: parts.uri.path().to_string(),
            })
    }
}

/// Extractor that optionally gets the logged-in user.
///
/// Unlike [`RequireUser`], this never rejects the request.
pub struct OptionalUser(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => current_user(session).await,
            None => None,
        };

        Ok(Self(user))
    }
}

/// Read the logged-in user from the session.
///
/// A record that fails to deserialize is treated as logged out.
pub async fn current_user(session: &Session) -> Option<SessionUser> {
    match session.get::<SessionUser>(session_keys::USER).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Failed to read user from session: {e}");
            None
        }
    }
}

/// Whether the session carries the seller flag.
pub async fn is_seller(session: &Session) -> bool {
    session
        .get::<String>(session_keys::IS_SELLER)
        .await
        .ok()
        .flatten()
        .is_some_and(|flag| flag == SELLER_FLAG_VALUE)
}

/// Store the logged-in user and set or clear the seller flag to match
/// their role.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &SessionUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::USER, user).await?;

    if user.role.is_seller() {
        session
            .insert(session_keys::IS_SELLER, SELLER_FLAG_VALUE)
            .await?;
    } else {
        session.remove::<String>(session_keys::IS_SELLER).await?;
    }
    Ok(())
}

/// Forget the logged-in user and the seller flag (logout).
///
/// The cart is kept.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<SessionUser>(session_keys::USER).await?;
    session.remove::<String>(session_keys::IS_SELLER).await?;
    Ok(())
}
