use emotion_shared::{
    ApiRequest, AuthMode, AuthRequest, AuthResponse, CONTENT_TYPE_JSON, ChatRequest,
    ChatResponse, ErrorBody, HEADER_AUTHORIZATION, HealthRequest, HealthResponse, LogoutRequest,
    PredictFaceRequest, PredictTextRequest, PredictionsResponse, SuccessResponse,
};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::web::{FetchClient, HttpClient, HttpRequest};

/// Gateway to the inference backend
///
/// Single attempt per call: no retries, no timeout. When a session token is
/// held it is sent verbatim in the `Authorization` header.
#[derive(Clone, Debug)]
pub struct EmotionApi<C: HttpClient = FetchClient> {
    base_url: String,
    token: Option<String>,
    client: C,
}

impl EmotionApi<FetchClient> {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self::with_client(base_url, token, FetchClient)
    }
}

impl<C: HttpClient> EmotionApi<C> {
    pub fn with_client(base_url: &str, token: Option<String>, client: C) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let token = token.filter(|t| !t.is_empty());
        Self {
            base_url,
            token,
            client,
        }
    }

    #[cfg(test)]
    pub fn client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Issue `req` against its endpoint and decode the typed response
    pub async fn send<R: ApiRequest>(&self, req: &R) -> AppResult<R::Response> {
        let mut http = HttpRequest::new(self.url(R::PATH), R::METHOD)
            .header("Content-Type", CONTENT_TYPE_JSON);

        if let Some(token) = &self.token {
            http = http.header(HEADER_AUTHORIZATION, token);
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_string(req)
                .map_err(|e| AppError::InvalidResponse(format!("encode {}: {}", R::PATH, e)))?;
            http = http.body(body);
        }

        log::debug!("[Api] {} {}", R::METHOD.as_str(), R::PATH);

        let res = self.client.send(http).await.map_err(|e| {
            log::warn!("[Api] {} unreachable: {}", R::PATH, e);
            AppError::NetworkUnreachable(e.to_string())
        })?;

        if !res.ok() {
            let message = serde_json::from_str::<ErrorBody>(&res.body)
                .ok()
                .and_then(|b| b.error);
            log::warn!("[Api] {} rejected with {}", R::PATH, res.status);
            return Err(AppError::rejected(res.status, message));
        }

        serde_json::from_str(&res.body)
            .map_err(|e| AppError::InvalidResponse(format!("{}: {}", R::PATH, e)))
    }

    // =========================================================
    // Endpoints
    // =========================================================

    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        mode: AuthMode,
    ) -> AppResult<AuthResponse> {
        self.send(&AuthRequest {
            email: email.to_string(),
            password: password.to_string(),
            mode,
        })
        .await
    }

    pub async fn logout(&self) -> AppResult<SuccessResponse> {
        self.send(&LogoutRequest {}).await
    }

    /// `image` is a `data:` URI
    pub async fn predict_face(&self, image: String) -> AppResult<Value> {
        self.send(&PredictFaceRequest { image }).await
    }

    pub async fn predict_text(&self, text: &str) -> AppResult<PredictionsResponse> {
        self.send(&PredictTextRequest {
            text: text.to_string(),
        })
        .await
    }

    pub async fn chat(&self, message: &str, emotion: &str) -> AppResult<ChatResponse> {
        self.send(&ChatRequest {
            message: message.to_string(),
            emotion: emotion.to_string(),
        })
        .await
    }

    pub async fn health(&self) -> AppResult<HealthResponse> {
        self.send(&HealthRequest {}).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::MockHttpClient;
    use emotion_shared::HttpMethod;
    use serde_json::json;

    fn api(client: MockHttpClient, token: Option<&str>) -> EmotionApi<MockHttpClient> {
        EmotionApi::with_client("http://backend.test/", token.map(str::to_string), client)
    }

    #[tokio::test]
    async fn test_post_sends_json_and_token() {
        let client = MockHttpClient::new().respond("/chat", 200, json!({"reply": "hi"}));
        let api = api(client, Some("tok-123"));

        let reply = api.chat("hello", "joy").await.unwrap();
        assert_eq!(reply.reply, "hi");

        let requests = api.client().requests.borrow();
        let req = &requests[0];
        assert_eq!(req.url, "http://backend.test/chat");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header_value("content-type"), Some("application/json"));
        assert_eq!(req.header_value("Authorization"), Some("tok-123"));
        drop(requests);
        assert_eq!(
            api.client().body_of(0),
            json!({"message": "hello", "emotion": "joy"})
        );
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let client = MockHttpClient::new().respond("/auth", 200, json!({"token": "t"}));
        let api = api(client, Some(""));

        api.authenticate("a@b.c", "pw", AuthMode::Login)
            .await
            .unwrap();

        let requests = api.client().requests.borrow();
        assert_eq!(requests[0].header_value("Authorization"), None);
    }

    #[tokio::test]
    async fn test_rejection_carries_server_message() {
        let client = MockHttpClient::new().respond(
            "/auth",
            401,
            json!({"error": "Invalid credentials"}),
        );
        let api = api(client, None);

        let err = api
            .authenticate("a@b.c", "wrong", AuthMode::Login)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AppError::BackendRejected {
                status: 401,
                message: "Invalid credentials".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_rejection_without_json_body_uses_fallback() {
        let client = MockHttpClient::new().respond_raw("/predict_text", 502, "<html>Bad Gateway</html>");
        let api = api(client, Some("t"));

        let err = api.predict_text("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed");
    }

    #[tokio::test]
    async fn test_network_failure_is_unreachable() {
        let api = api(MockHttpClient::new(), Some("t"));

        let err = api.predict_face("data:image/jpeg;base64,AAAA".to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::NetworkUnreachable(_)));
        assert_eq!(err.to_string(), "Backend not reachable");
        assert_eq!(api.client().request_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let client = MockHttpClient::new().respond_raw("/chat", 200, "not json");
        let api = api(client, Some("t"));

        let err = api.chat("m", "joy").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_health_is_get_without_body() {
        let client = MockHttpClient::new().respond("/health", 200, json!({"status": "ok"}));
        let api = api(client, None);

        assert!(api.health().await.unwrap().is_ok());
        let requests = api.client().requests.borrow();
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert!(requests[0].body.is_none());
    }
}
