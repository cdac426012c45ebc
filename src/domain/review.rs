use serde::{Deserialize, Serialize};

/// A review of a delivered order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "orderId")]
    pub order_id: u64,
    #[serde(rename = "restaurantId")]
    pub restaurant_id: u64,
    #[serde(rename = "menuItemId", default, skip_serializing_if = "Option::is_none")]
    pub menu_item_id: Option<u64>,
    pub rating: u8,
    #[serde(default)]
    pub text: String,
}
