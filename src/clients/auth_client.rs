use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::http::Api;
use crate::error::ApiError;
use crate::session::{Identity, Role};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    role: Role,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    id: u64,
    #[serde(rename = "restaurantId", default)]
    restaurant_id: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Client for the public authentication endpoints.
#[derive(Clone)]
pub struct AuthClient {
    api: Arc<Api>,
}

impl AuthClient {
    pub fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    /// Exchanges credentials for an [`Identity`]. The caller decides when to
    /// install it into the session.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str, role: Role) -> Result<Identity, ApiError> {
        debug!("Sending request");
        let response: LoginResponse = self
            .api
            .post_public("/auth/login", &LoginRequest { username, password, role })
            .await?;
        Ok(Identity {
            token: response.token,
            role,
            user_id: response.id,
            restaurant_id: response.restaurant_id,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError> {
        debug!("Sending request");
        let _: serde_json::Value = self.api.post_public("/auth/signup", request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn login_builds_identity_from_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(serde_json::json!({
                "username": "owner", "password": "pw", "role": "RESTAURANT"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "abc", "id": 9, "restaurantId": 3
            })))
            .mount(&server)
            .await;

        let api = Arc::new(Api::new(server.uri(), Session::new()));
        let identity = AuthClient::new(api)
            .login("owner", "pw", Role::Restaurant)
            .await
            .unwrap();
        assert_eq!(identity.token, "abc");
        assert_eq!(identity.user_id, 9);
        assert_eq!(identity.restaurant_id, Some(3));
        assert_eq!(identity.role, Role::Restaurant);
    }
}
