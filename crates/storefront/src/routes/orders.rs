//! Order placement page.
//!
//! Reached from the cart's "Pay Now" once the visitor is logged in.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireUser;
use crate::routes::cart::{CartView, load_cart};

/// Order placement template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/place.html")]
pub struct PlaceOrderTemplate {
    pub full_name: String,
    pub email: String,
    pub cart: CartView,
}

/// Display the order summary for the logged-in user.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn place_order(RequireUser(user): RequireUser, session: Session) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    Ok(PlaceOrderTemplate {
        full_name: user.full_name,
        email: user.email,
        cart: CartView::from(&cart),
    }
    .into_response())
}
