//! Client error taxonomy
//!
//! Every failure ends as an inline message and a view that can be retried;
//! nothing here is fatal to the application.

use std::fmt;

/// Hardware a permission prompt was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Camera,
    Microphone,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Media access refused or no device available
    PermissionDenied(Device),
    /// fetch-level failure, no HTTP status was received
    NetworkUnreachable(String),
    /// Non-success status; `message` is the server's `error` field or a fallback
    BackendRejected { status: u16, message: String },
    /// Success status but the body did not match the expected shape
    InvalidResponse(String),
    /// Frame or clip could not be produced from a live stream
    CaptureFailed(String),
    /// Blank text submission. Guarded client-side and never shown.
    EmptyInput,
}

pub type AppResult<T> = Result<T, AppError>;

pub const BACKEND_UNREACHABLE: &str = "Backend not reachable";
pub const REJECTED_FALLBACK: &str = "Failed";

impl AppError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| REJECTED_FALLBACK.to_string());
        AppError::BackendRejected { status, message }
    }

    /// Whether the error should be rendered at all
    pub fn is_silent(&self) -> bool {
        matches!(self, AppError::EmptyInput)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::PermissionDenied(Device::Camera) => {
                write!(f, "Camera permission denied or unavailable.")
            }
            AppError::PermissionDenied(Device::Microphone) => {
                write!(f, "Microphone access denied.")
            }
            AppError::NetworkUnreachable(_) => write!(f, "{}", BACKEND_UNREACHABLE),
            AppError::BackendRejected { message, .. } => write!(f, "{}", message),
            AppError::InvalidResponse(msg) => write!(f, "Unexpected response from backend: {}", msg),
            AppError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            AppError::EmptyInput => write!(f, "Nothing to submit"),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_messages() {
        assert_eq!(
            AppError::PermissionDenied(Device::Camera).to_string(),
            "Camera permission denied or unavailable."
        );
        assert_eq!(
            AppError::PermissionDenied(Device::Microphone).to_string(),
            "Microphone access denied."
        );
    }

    #[test]
    fn test_rejected_message_verbatim_or_fallback() {
        let err = AppError::rejected(401, Some("Invalid credentials".to_string()));
        assert_eq!(err.to_string(), "Invalid credentials");

        let err = AppError::rejected(500, None);
        assert_eq!(err.to_string(), "Failed");

        let err = AppError::rejected(400, Some("  ".to_string()));
        assert_eq!(err.to_string(), "Failed");
    }

    #[test]
    fn test_network_error_hides_details() {
        let err = AppError::NetworkUnreachable("TypeError: Failed to fetch".to_string());
        assert_eq!(err.to_string(), "Backend not reachable");
        assert!(!err.is_silent());
        assert!(AppError::EmptyInput.is_silent());
    }
}
