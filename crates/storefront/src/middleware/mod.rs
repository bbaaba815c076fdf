//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, HTTP transactions)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (fill in the span field, echo the header)
//! 4. Session layer (tower-sessions with in-memory store)

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{
    OptionalUser, RequireUser, clear_current_user, current_user, is_seller, set_current_user,
};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
