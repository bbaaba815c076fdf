//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{OptionalUser, is_seller};
use crate::routes::cart::load_cart;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Display name of the logged-in user, if any.
    pub full_name: Option<String>,
    pub is_seller: bool,
    pub cart_count: u32,
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(OptionalUser(user): OptionalUser, session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;

    Ok(HomeTemplate {
        full_name: user.map(|user| user.full_name),
        is_seller: is_seller(&session).await,
        cart_count: cart.item_count(),
    })
}
