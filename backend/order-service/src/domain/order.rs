use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::cart::CartSnapshot;
use crate::error::ServiceError;

/// The closed set of order statuses.
///
/// `Pending` is the only non-terminal status; every other status is final
/// for an order. Unknown strings are rejected at the edge rather than
/// stored, so the database only ever holds these five values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "FAILED" => Ok(OrderStatus::Failed),
            other => Err(ServiceError::InvalidStatus(other.to_string())),
        }
    }
}

/// One order line. Quantity and unit price are copied verbatim from the
/// cart line that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: i32,
    pub price: f64,
}

/// A persisted order. The id is assigned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order before the persistence layer has assigned its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
}

impl OrderDraft {
    /// Build a pending order from explicit items; the total is the sum of
    /// quantity times unit price over all lines.
    pub fn new(user_id: &str, items: Vec<OrderItem>) -> Self {
        let total = items
            .iter()
            .map(|item| f64::from(item.quantity) * item.price)
            .sum();

        Self {
            user_id: user_id.to_string(),
            items,
            total,
            status: OrderStatus::Pending,
        }
    }

    /// Build a pending order from a cart snapshot, copying each line
    /// verbatim.
    pub fn from_cart(user_id: &str, cart: &CartSnapshot) -> Self {
        let items = cart
            .items
            .iter()
            .map(|line| OrderItem {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                price: line.price,
            })
            .collect();

        Self::new(user_id, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartLine;

    #[test]
    fn status_roundtrips_through_strings() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Cancelled,
            OrderStatus::Completed,
            OrderStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_string_is_rejected() {
        let err = "SHIPPED".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, ServiceError::InvalidStatus(s) if s == "SHIPPED"));
    }

    #[test]
    fn lowercase_status_is_rejected() {
        assert!("pending".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Confirmed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
    }

    #[test]
    fn status_serializes_to_wire_form() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
    }

    #[test]
    fn draft_copies_cart_lines_verbatim_and_totals() {
        let cart = CartSnapshot {
            items: vec![
                CartLine {
                    product_id: "p1".into(),
                    quantity: 2,
                    price: 10.0,
                },
                CartLine {
                    product_id: "p2".into(),
                    quantity: 1,
                    price: 5.0,
                },
            ],
        };

        let draft = OrderDraft::from_cart("user-1", &cart);

        assert_eq!(draft.user_id, "user-1");
        assert_eq!(draft.total, 25.0);
        assert_eq!(draft.status, OrderStatus::Pending);
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[0].product_id, "p1");
        assert_eq!(draft.items[0].quantity, 2);
        assert_eq!(draft.items[0].price, 10.0);
        assert_eq!(draft.items[1].product_id, "p2");
    }
}
