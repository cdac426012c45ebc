use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ApiError;
use crate::session::Session;

/// Shared HTTP transport under every typed client: base URL joining, bearer
/// token injection from the session, and mapping of non-2xx responses into
/// [`ApiError`].
///
/// A 401 from any endpoint invalidates the session before the error is
/// returned, so subscribers are routed back to authentication no matter which
/// call tripped it.
#[derive(Clone, Debug)]
pub struct Api {
    http: Client,
    base_url: String,
    session: Arc<Session>,
}

impl Api {
    pub fn new(base_url: impl Into<String>, session: Arc<Session>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Attaches the bearer token, or fails fast without a network call when
    /// the session holds none.
    fn bearer(&self, req: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.session.token().ok_or(ApiError::Unauthorized)?;
        Ok(req.bearer_auth(token))
    }

    async fn read<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(response.json().await?);
        }
        Err(self.fail(status, response).await)
    }

    async fn fail(&self, status: u16, response: Response) -> ApiError {
        let message = response.text().await.unwrap_or_default();
        if status == 401 {
            self.session.invalidate();
        }
        ApiError::from_status(status, message)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.bearer(self.http.get(self.url(path)))?;
        self.read(req.send().await?).await
    }

    /// GET without auth, for the public browse endpoints.
    pub async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.read(self.http.get(self.url(path)).send().await?).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.bearer(self.http.post(self.url(path)))?;
        self.read(req.json(body).send().await?).await
    }

    /// POST without auth, for login and signup.
    pub async fn post_public<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.http.post(self.url(path)).json(body);
        self.read(req.send().await?).await
    }

    /// POST where the response body carries nothing the caller needs.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let req = self.bearer(self.http.post(self.url(path)))?;
        let response = req.json(body).send().await?;
        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(());
        }
        Err(self.fail(status, response).await)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.bearer(self.http.put(self.url(path)))?;
        self.read(req.json(body).send().await?).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.bearer(self.http.patch(self.url(path)))?;
        self.read(req.json(body).send().await?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let req = self.bearer(self.http.delete(self.url(path)))?;
        let response = req.send().await?;
        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(());
        }
        Err(self.fail(status, response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Identity, Role};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn logged_in_session() -> Arc<Session> {
        let session = Session::new();
        session.login(Identity {
            token: "t0k3n".into(),
            role: Role::Customer,
            user_id: 1,
            restaurant_id: None,
        });
        session
    }

    #[tokio::test]
    async fn bearer_token_is_attached_to_authenticated_calls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/cart"))
            .and(header("authorization", "Bearer t0k3n"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [], "address": ""
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = Api::new(server.uri(), logged_in_session());
        let cart: crate::domain::Cart = api.get("/api/cart").await.unwrap();
        assert!(cart.items.is_empty());
    }

    #[tokio::test]
    async fn missing_token_fails_fast_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = Api::new(server.uri(), Session::new());
        let err = api.get::<crate::domain::Cart>("/api/cart").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn unauthorized_response_invalidates_the_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
            .mount(&server)
            .await;

        let session = logged_in_session();
        let api = Api::new(server.uri(), Arc::clone(&session));
        let err = api.get::<Vec<crate::domain::Order>>("/api/orders/my").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn conflict_and_forbidden_map_to_typed_variants() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/conflict"))
            .respond_with(ResponseTemplate::new(409).set_body_string("duplicate"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/forbidden"))
            .respond_with(ResponseTemplate::new(403).set_body_string("not yours"))
            .mount(&server)
            .await;

        let api = Api::new(server.uri(), logged_in_session());
        let conflict = api.post_unit("/conflict", &serde_json::json!({})).await.unwrap_err();
        assert!(matches!(conflict, ApiError::Conflict(m) if m == "duplicate"));
        let forbidden = api.post_unit("/forbidden", &serde_json::json!({})).await.unwrap_err();
        assert!(matches!(forbidden, ApiError::Forbidden(m) if m == "not yours"));
    }

    #[tokio::test]
    async fn other_statuses_carry_code_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let api = Api::new(server.uri(), logged_in_session());
        let err = api.get::<crate::domain::Cart>("/api/cart").await.unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }
}
