use crate::{
    AuthRequest, AuthResponse, ChatRequest, ChatResponse, HealthRequest, HealthResponse,
    LogoutRequest, PredictFaceRequest, PredictTextRequest, PredictionsResponse, SuccessResponse,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path, relative to the configured base URL.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Request Definitions
// =========================================================

/// Login or signup, depending on `mode`
impl ApiRequest for AuthRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/auth";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Invalidate the current token server-side
impl ApiRequest for LogoutRequest {
    type Response = SuccessResponse;
    const PATH: &'static str = "/logout";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Classify a captured frame. The payload is kept opaque.
impl ApiRequest for PredictFaceRequest {
    type Response = Value;
    const PATH: &'static str = "/predict_face";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Classify free text
impl ApiRequest for PredictTextRequest {
    type Response = PredictionsResponse;
    const PATH: &'static str = "/predict_text";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Ask the bot to respond to a message in light of its detected emotion
impl ApiRequest for ChatRequest {
    type Response = ChatResponse;
    const PATH: &'static str = "/chat";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Backend liveness and loaded models
impl ApiRequest for HealthRequest {
    type Response = HealthResponse;
    const PATH: &'static str = "/health";
    const METHOD: HttpMethod = HttpMethod::Get;
}
