//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Credential login against the marketplace backend

pub mod auth;
