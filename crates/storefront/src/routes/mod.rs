//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add an item (JSON body, returns cart summary)
//! POST /cart/increase          - Add one unit (form: id)
//! POST /cart/decrease          - Remove one unit (form: id)
//! POST /cart/remove            - Remove a line item (form: id)
//! POST /cart/checkout          - "Pay Now": place order or log in first
//!
//! # Checkout
//! GET  /place-order            - Order summary (requires login)
//!
//! # Auth
//! GET  /login                  - Login page (?from_cart, ?redirect_to)
//! POST /login                  - Login action
//! POST /logout                 - Logout action
//! ```

pub mod auth;
pub mod cart;
pub mod home;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/increase", post(cart::increase))
        .route("/decrease", post(cart::decrease))
        .route("/remove", post(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .route("/place-order", get(orders::place_order))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}
