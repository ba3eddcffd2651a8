//! Wire types shared by the emotion.ai client.
//!
//! - `protocol`: endpoint metadata (`ApiRequest`)
//! - `history`: mood history entries

pub mod history;
pub mod protocol;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use history::HistoryEntry;
pub use protocol::{ApiRequest, HttpMethod};

// =========================================================
// Constants
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// =========================================================
// Authentication
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
    pub mode: AuthMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}

/// Body the backend attaches to non-success responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

// =========================================================
// Prediction
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictTextRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictFaceRequest {
    /// Encoded still frame as a `data:` URI.
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionsResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

impl PredictionsResponse {
    /// Label of the first (primary) prediction.
    pub fn primary_label(&self) -> Option<&str> {
        self.predictions.first().map(|p| p.label.as_str())
    }
}

/// Emotion label plus the untouched payload it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub label: Option<String>,
    pub raw: Value,
}

impl DetectionResult {
    pub fn from_payload(raw: Value) -> Self {
        let label = raw
            .get("predictions")
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("label"))
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { label, raw }
    }

    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

// =========================================================
// Chat
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub emotion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

// =========================================================
// Health
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthRequest {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub text_model: bool,
    #[serde(default)]
    pub face_model: bool,
    #[serde(default)]
    pub bot: bool,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_mode_serializes_lowercase() {
        let req = AuthRequest {
            email: "a@b.c".to_string(),
            password: "pw".to_string(),
            mode: AuthMode::Signup,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["mode"], "signup");
        assert_eq!(AuthMode::Login.toggled(), AuthMode::Signup);
    }

    #[test]
    fn test_primary_label_takes_first_prediction() {
        let resp: PredictionsResponse = serde_json::from_value(json!({
            "text": "I feel great today",
            "predictions": [
                {"label": "joy", "score": 0.9},
                {"label": "neutral", "score": 0.1}
            ]
        }))
        .unwrap();
        assert_eq!(resp.primary_label(), Some("joy"));
    }

    #[test]
    fn test_primary_label_empty_predictions() {
        let resp: PredictionsResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(resp.primary_label(), None);
    }

    #[test]
    fn test_detection_result_keeps_raw_payload() {
        let raw = json!({"predictions": [{"label": "anger", "score": 0.7}]});
        let result = DetectionResult::from_payload(raw.clone());
        assert_eq!(result.label.as_deref(), Some("anger"));
        assert_eq!(result.raw, raw);

        let opaque = DetectionResult::from_payload(json!({"faces": 0}));
        assert_eq!(opaque.label, None);
        assert!(opaque.pretty().contains("\"faces\": 0"));
    }

    #[test]
    fn test_health_status() {
        let health: HealthResponse =
            serde_json::from_value(json!({"status": "ok", "face_model": true})).unwrap();
        assert!(health.is_ok());
        assert!(health.face_model);
        assert!(!health.text_model);
    }
}
