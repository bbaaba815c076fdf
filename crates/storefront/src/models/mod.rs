//! Domain models for storefront.
//!
//! - [`user`] - Account data as returned by the backend login endpoint
//! - [`session`] - What the storefront keeps in the visitor's session

pub mod session;
pub mod user;

pub use session::{SELLER_FLAG_VALUE, SessionUser, keys as session_keys};
pub use user::{BackendUser, LoginResponse};
