use serde::{Deserialize, Serialize};

/// Which side of the support conversation a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Customer,
    Restaurant,
}

/// One message in a per-order support thread. Threads are scoped by the
/// (order, restaurant, customer) triple and append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "orderId")]
    pub order_id: u64,
    #[serde(rename = "restaurantId")]
    pub restaurant_id: u64,
    #[serde(rename = "customerId")]
    pub customer_id: u64,
    pub sender: Sender,
    pub message: String,
    /// Epoch milliseconds, assigned server-side.
    #[serde(rename = "sentAt", default)]
    pub sent_at: i64,
}
