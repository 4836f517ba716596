use serde::{Deserialize, Serialize};

/// One line of a fetched remote cart.
///
/// The price is the unit price captured when the item entered the cart;
/// checkout copies it verbatim and does not re-validate price or stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: i32,
    pub price: f64,
}

/// Snapshot of a user's cart as returned by the cart service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
