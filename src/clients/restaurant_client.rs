use std::sync::Arc;

use tracing::{debug, instrument};

use super::http::Api;
use crate::domain::{MenuItem, Restaurant};
use crate::error::ApiError;

/// Client for the public restaurant browse endpoints. No auth required.
#[derive(Clone)]
pub struct RestaurantClient {
    api: Arc<Api>,
}

impl RestaurantClient {
    pub fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Restaurant>, ApiError> {
        debug!("Sending request");
        self.api.get_public("/api/restaurants").await
    }

    #[instrument(skip(self))]
    pub async fn by_slug(&self, slug: &str) -> Result<Restaurant, ApiError> {
        debug!("Sending request");
        self.api.get_public(&format!("/api/restaurants/slug/{slug}")).await
    }

    #[instrument(skip(self))]
    pub async fn menu(&self, restaurant_id: u64) -> Result<Vec<MenuItem>, ApiError> {
        debug!("Sending request");
        self.api.get_public(&format!("/api/restaurants/{restaurant_id}/menu")).await
    }
}
