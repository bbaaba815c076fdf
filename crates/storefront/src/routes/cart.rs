//! Cart route handlers.
//!
//! The cart is a list of line items stored in the visitor's session. Every
//! mutation loads the list, applies one cart operation, writes the whole list
//! back, and redirects to the cart page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    response::{IntoResponse, Redirect},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use marketplace_core::{Cart, CartItem, Price, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::current_user;
use crate::models::session_keys;

/// Line item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub quantity: u32,
    pub price: String,
    pub subtotal: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
    pub is_empty: bool,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            subtotal: item.subtotal().to_string(),
            image: item.thumbnail().map(String::from),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
            is_empty: cart.is_empty(),
        }
    }
}

/// Highest unit price accepted by `POST /cart/add`, in cents ($1,000,000).
const MAX_ITEM_PRICE_CENTS: i64 = 100_000_000;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session. A missing cart is an empty cart.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored cart is corrupt.
pub async fn load_cart(session: &Session) -> std::result::Result<Cart, tower_sessions::session::Error> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Replace the cart stored in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> std::result::Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

// =============================================================================
// Forms & Templates
// =============================================================================

/// Form data naming a single line item.
#[derive(Debug, Deserialize)]
pub struct CartLineForm {
    pub id: String,
}

/// Response body for `POST /cart/add`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: u32,
    pub total: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;

    Ok(CartShowTemplate {
        cart: CartView::from(&cart),
    })
}

/// Place an item in the cart (JSON API for the product pages).
#[instrument(skip_all, fields(product_id = %item.id))]
pub async fn add(session: Session, Json(item): Json<CartItem>) -> Result<Json<CartSummary>> {
    if item.id.as_str().trim().is_empty() {
        return Err(AppError::BadRequest("product id is required".to_string()));
    }
    if item.price.is_negative() || item.price > Price::from_cents(MAX_ITEM_PRICE_CENTS) {
        return Err(AppError::BadRequest(format!(
            "price must be between $0.00 and {}",
            Price::from_cents(MAX_ITEM_PRICE_CENTS)
        )));
    }

    let mut cart = load_cart(&session).await?;
    add_breadcrumb("cart", "Added item", Some(&[("product_id", item.id.as_str())]));
    cart.add_item(item);
    save_cart(&session, &cart).await?;

    Ok(Json(CartSummary {
        item_count: cart.item_count(),
        total: cart.total().to_string(),
    }))
}

/// Add one unit of a line item.
#[instrument(skip(session))]
pub async fn increase(session: Session, Form(form): Form<CartLineForm>) -> Result<Redirect> {
    update_cart(&session, "Increased quantity", &form.id, Cart::increase_quantity).await
}

/// Remove one unit of a line item, dropping it at zero.
#[instrument(skip(session))]
pub async fn decrease(session: Session, Form(form): Form<CartLineForm>) -> Result<Redirect> {
    update_cart(&session, "Decreased quantity", &form.id, Cart::decrease_quantity).await
}

/// Remove a line item.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<CartLineForm>) -> Result<Redirect> {
    update_cart(&session, "Removed item", &form.id, Cart::remove_item).await
}

/// Apply one cart operation and store the result if anything changed.
async fn update_cart(
    session: &Session,
    action: &str,
    id: &str,
    op: impl FnOnce(&mut Cart, &ProductId) -> bool,
) -> Result<Redirect> {
    let mut cart = load_cart(session).await?;
    let id = ProductId::new(id);

    if op(&mut cart, &id) {
        add_breadcrumb("cart", action, Some(&[("product_id", id.as_str())]));
        save_cart(session, &cart).await?;
    } else {
        tracing::debug!(product_id = %id, "Cart operation on unknown item ignored");
    }

    Ok(Redirect::to("/cart"))
}

/// Start checkout ("Pay Now").
///
/// Logged-in visitors continue to order placement; everyone else is sent to
/// the login page flagged as coming from the cart. An empty cart has nothing
/// to pay for and stays on the cart page.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> Result<Redirect> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart"));
    }

    if current_user(&session).await.is_some() {
        Ok(Redirect::to("/place-order"))
    } else {
        Ok(Redirect::to("/login?from_cart=true"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use marketplace_core::{Photo, Price};

    use super::*;

    fn item(id: &str, cents: i64, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: "A product".to_string(),
            price: Price::from_cents(cents),
            quantity,
            photos: vec![Photo {
                url: format!("https://cdn.test/{id}.jpg"),
            }],
        }
    }

    #[test]
    fn test_cart_view_formats_prices() {
        let cart = Cart::new(vec![item("a", 1999, 2), item("b", 500, 1)]);
        let view = CartView::from(&cart);

        assert_eq!(view.total, "$44.98");
        assert_eq!(view.item_count, 3);
        assert!(!view.is_empty);
        assert_eq!(view.items[0].price, "$19.99");
        assert_eq!(view.items[0].subtotal, "$39.98");
        assert_eq!(view.items[0].image.as_deref(), Some("https://cdn.test/a.jpg"));
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::default());
        assert!(view.is_empty);
        assert_eq!(view.total, "$0.00");
    }

    #[test]
    fn test_empty_cart_renders_no_pay_button() {
        let html = CartShowTemplate {
            cart: CartView::from(&Cart::default()),
        }
        .render()
        .unwrap();

        assert!(html.contains("Your cart is empty."));
        assert!(!html.contains("Pay Now"));
    }

    #[test]
    fn test_cart_renders_items_and_total() {
        let html = CartShowTemplate {
            cart: CartView::from(&Cart::new(vec![item("a", 1999, 2)])),
        }
        .render()
        .unwrap();

        assert!(html.contains("Product a"));
        assert!(html.contains("Subtotal: $39.98"));
        assert!(html.contains("Cart Total: $39.98"));
        assert!(html.contains("Pay Now"));
    }
}
