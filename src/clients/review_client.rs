use std::sync::Arc;

use tracing::{debug, instrument};

use super::http::Api;
use crate::domain::Review;
use crate::error::ApiError;

/// Client for the review endpoints.
#[derive(Clone)]
pub struct ReviewClient {
    api: Arc<Api>,
}

impl ReviewClient {
    pub fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    #[instrument(skip(self, review))]
    pub async fn submit(&self, review: &Review) -> Result<(), ApiError> {
        debug!(order_id = review.order_id, "Sending request");
        self.api.post_unit("/api/reviews", review).await
    }

    /// The authenticated customer's own reviews; feeds the review-gate
    /// reconcile so the local prompt flags converge on server truth.
    #[instrument(skip(self))]
    pub async fn list_mine(&self) -> Result<Vec<Review>, ApiError> {
        debug!("Sending request");
        self.api.get("/api/reviews/my").await
    }

    #[instrument(skip(self))]
    pub async fn list_for_restaurant(&self, restaurant_id: u64) -> Result<Vec<Review>, ApiError> {
        debug!("Sending request");
        self.api.get(&format!("/api/reviews/restaurant/{restaurant_id}")).await
    }
}
