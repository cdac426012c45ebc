use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use super::http::Api;
use crate::domain::{Cart, CartItem};
use crate::error::ApiError;

#[derive(Debug, Serialize)]
struct ReplaceCartRequest<'a> {
    items: &'a [CartItem],
    address: &'a str,
}

/// Client for the server-side cart. The PUT always returns the full
/// authoritative cart; callers replace their local copy with it.
#[derive(Clone)]
pub struct CartClient {
    api: Arc<Api>,
}

impl CartClient {
    pub fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<Cart, ApiError> {
        debug!("Sending request");
        self.api.get("/api/cart").await
    }

    #[instrument(skip(self, items, address))]
    pub async fn replace(&self, items: &[CartItem], address: &str) -> Result<Cart, ApiError> {
        debug!(lines = items.len(), "Sending request");
        self.api.put("/api/cart", &ReplaceCartRequest { items, address }).await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), ApiError> {
        debug!("Sending request");
        self.api.delete("/api/cart").await
    }
}
