use serde::{Deserialize, Serialize};

/// A single staged line in the pre-order cart.
///
/// Field names follow the backend's wire contract, which mixes snake and camel
/// case (`menu_item_id` vs `restaurantId`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub menu_item_id: u64,
    pub name: String,
    pub price: f64,
    pub qty: u32,
    #[serde(rename = "restaurantId", default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<u64>,
}

/// The staging area a customer accumulates line items in before placing an
/// order. Item order is insertion order and doubles as display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub address: String,
}

impl Cart {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(|i| i.price * f64::from(i.qty)).sum()
    }

    /// Total unit count across all lines, for the cart badge.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.qty).sum()
    }

    /// First resolvable restaurant id across the staged lines.
    pub fn restaurant_id(&self) -> Option<u64> {
        self.items.iter().find_map(|i| i.restaurant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: u64, price: f64, qty: u32) -> CartItem {
        CartItem {
            menu_item_id: id,
            name: format!("item {id}"),
            price,
            qty,
            restaurant_id: Some(1),
        }
    }

    #[test]
    fn subtotal_and_count_sum_over_lines() {
        let cart = Cart {
            items: vec![line(7, 12.0, 2), line(8, 3.5, 1)],
            address: String::new(),
        };
        assert_eq!(cart.subtotal(), 27.5);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.restaurant_id(), Some(1));
    }

    #[test]
    fn wire_format_uses_backend_field_names() {
        let json = serde_json::to_value(line(7, 12.0, 2)).unwrap();
        assert_eq!(json["menu_item_id"], 7);
        assert_eq!(json["qty"], 2);
        assert_eq!(json["restaurantId"], 1);
    }

    #[test]
    fn empty_cart_has_no_restaurant() {
        assert_eq!(Cart::empty().restaurant_id(), None);
        assert_eq!(Cart::empty().subtotal(), 0.0);
    }
}
