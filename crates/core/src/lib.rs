//! Marketplace Core - Shared domain types and cart logic.
//!
//! This crate provides the types used by the storefront:
//! - typed identifiers, email addresses, prices, and account roles
//! - the shopping cart and its quantity/total arithmetic
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! sessions, no HTTP clients. Everything here is synchronous and total.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and roles
//! - [`cart`] - Cart line items and cart mutations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartItem, Photo};
pub use types::*;
