use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::http::Api;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct FavoriteRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub restaurant: String,
    #[serde(rename = "restaurantId")]
    pub restaurant_id: u64,
    #[serde(rename = "menuItemId", skip_serializing_if = "Option::is_none")]
    pub menu_item_id: Option<u64>,
}

/// Result of a favorite request. A duplicate is a soft, recoverable
/// condition ("already in favorites"), never a generic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Added,
    AlreadyFavorited,
}

/// Client for customer-profile endpoints (currently the wishlist).
#[derive(Clone)]
pub struct CustomerClient {
    api: Arc<Api>,
}

impl CustomerClient {
    pub fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    #[instrument(skip(self, request))]
    pub async fn add_favorite(
        &self,
        customer_id: u64,
        request: &FavoriteRequest,
    ) -> Result<FavoriteOutcome, ApiError> {
        debug!("Sending request");
        let path = format!("/api/customers/{customer_id}/wishlist");
        match self.api.post_unit(&path, request).await {
            Ok(()) => Ok(FavoriteOutcome::Added),
            Err(ApiError::Conflict(_)) => {
                info!(customer_id, "Already in favorites");
                Ok(FavoriteOutcome::AlreadyFavorited)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Identity, Role, Session};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> CustomerClient {
        let session = Session::new();
        session.login(Identity {
            token: "tok".into(),
            role: Role::Customer,
            user_id: 4,
            restaurant_id: None,
        });
        CustomerClient::new(Arc::new(Api::new(server.uri(), session)))
    }

    fn favorite() -> FavoriteRequest {
        FavoriteRequest {
            kind: "restaurant".into(),
            name: "Dhaba House".into(),
            restaurant: "Dhaba House".into(),
            restaurant_id: 3,
            menu_item_id: None,
        }
    }

    #[tokio::test]
    async fn duplicate_favorite_is_a_soft_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/customers/4/wishlist"))
            .respond_with(ResponseTemplate::new(409).set_body_string("already exists"))
            .mount(&server)
            .await;

        let outcome = client(&server).add_favorite(4, &favorite()).await.unwrap();
        assert_eq!(outcome, FavoriteOutcome::AlreadyFavorited);
    }

    #[tokio::test]
    async fn new_favorite_is_added() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/customers/4/wishlist"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let outcome = client(&server).add_favorite(4, &favorite()).await.unwrap();
        assert_eq!(outcome, FavoriteOutcome::Added);
    }
}
