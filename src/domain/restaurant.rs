use serde::{Deserialize, Serialize};

/// Public read model of a restaurant (no auth required to browse).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// One entry of a restaurant's menu.
///
/// `id` is optional on the wire; a line without it can never be staged into
/// the cart (the store rejects it before any network call).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    pub price: f64,
    #[serde(rename = "restaurantId", default)]
    pub restaurant_id: Option<u64>,
}
