use std::fmt;

use serde::{Deserialize, Serialize};

use super::cart::CartItem;

/// Lifecycle status of an order. Forward-progressing; the only branch out of
/// the chain is `New -> Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    New,
    Accepted,
    Preparing,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::New => "New",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

/// Payment options the checkout form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Credit/Debit Card")]
    Card,
}

/// A placed order as the backend reports it. Created once from a cart
/// snapshot; from the client's perspective only `status` ever changes.
///
/// `restaurant_id` and `customer_id` are optional because some list endpoints
/// omit them until the order has fully resolved; chat access is gated on both
/// being present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(rename = "customerId", default)]
    pub customer_id: Option<u64>,
    #[serde(rename = "restaurantId", default)]
    pub restaurant_id: Option<u64>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub total: f64,
    pub status: OrderStatus,
    /// Creation time in epoch milliseconds.
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_labels() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"Out for Delivery\"");
        let back: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderStatus::OutForDelivery);
    }

    #[test]
    fn order_tolerates_missing_optional_fields() {
        let order: Order = serde_json::from_str(
            r#"{"id": 42, "total": 26.6, "status": "New"}"#,
        )
        .unwrap();
        assert_eq!(order.id, 42);
        assert_eq!(order.restaurant_id, None);
        assert_eq!(order.customer_id, None);
        assert!(order.items.is_empty());
    }

    #[test]
    fn payment_methods_serialize_to_form_labels() {
        let json = serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(json, "\"Cash on Delivery\"");
    }
}
