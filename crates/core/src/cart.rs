//! Shopping cart line items and cart arithmetic.
//!
//! The cart is an ordered list of [`CartItem`]s. Storefront handlers load the
//! whole list from the visitor's session, apply one of the operations below,
//! and store the whole list back.
//!
//! Every operation is total: an unknown product ID leaves the cart unchanged
//! and the return value reports whether anything happened.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
}

/// A single product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl CartItem {
    /// `price × quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// URL of the first photo, used as the thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.photos.first().map(|photo| photo.url.as_str())
    }
}

/// An ordered list of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create a cart from existing line items, keeping their order.
    #[must_use]
    pub const fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// The line items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consume the cart, returning its line items.
    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line item by product ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Sum of `price × quantity` over all line items.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Place an item in the cart.
    ///
    /// If the product is already present its quantity grows by the incoming
    /// quantity, otherwise the item is appended. Either way at least one unit
    /// is added.
    pub fn add_item(&mut self, mut item: CartItem) {
        let quantity = item.quantity.max(1);
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            item.quantity = quantity;
            self.items.push(item);
        }
    }

    /// Add one unit of the given product. Returns `false` if it is not in
    /// the cart.
    pub fn increase_quantity(&mut self, id: &ProductId) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return false;
        };
        item.quantity = item.quantity.saturating_add(1);
        true
    }

    /// Remove one unit of the given product. Returns `false` if it is not in
    /// the cart.
    ///
    /// Any line left with a zero quantity is dropped, so a product at
    /// quantity 1 leaves the cart entirely.
    pub fn decrease_quantity(&mut self, id: &ProductId) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return false;
        };
        item.quantity = item.quantity.saturating_sub(1);
        self.items.retain(|item| item.quantity > 0);
        true
    }

    /// Drop the given product from the cart. Returns `false` if it was not
    /// in the cart.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self::new(items)
    }
}
