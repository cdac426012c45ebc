use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use super::http::Api;
use crate::domain::{ChatMessage, Sender};
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct OutgoingMessage<'a> {
    #[serde(rename = "orderId")]
    pub order_id: u64,
    #[serde(rename = "restaurantId")]
    pub restaurant_id: u64,
    #[serde(rename = "customerId")]
    pub customer_id: u64,
    pub sender: Sender,
    pub message: &'a str,
}

/// Client for the per-order support thread endpoints.
#[derive(Clone, Debug)]
pub struct ChatClient {
    api: Arc<Api>,
}

impl ChatClient {
    pub fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn fetch_thread(
        &self,
        order_id: u64,
        customer_id: u64,
        restaurant_id: u64,
    ) -> Result<Vec<ChatMessage>, ApiError> {
        debug!("Sending request");
        self.api
            .get(&format!(
                "/api/support/messages?orderId={order_id}&customerId={customer_id}&restaurantId={restaurant_id}"
            ))
            .await
    }

    /// Posts a message and returns the server's canonical copy of it.
    #[instrument(skip(self, outgoing))]
    pub async fn send(&self, outgoing: &OutgoingMessage<'_>) -> Result<ChatMessage, ApiError> {
        debug!(order_id = outgoing.order_id, "Sending request");
        self.api.post("/api/support/messages", outgoing).await
    }
}
