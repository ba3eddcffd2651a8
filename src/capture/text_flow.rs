//! Text interaction pipeline
//!
//! predict_text -> chat -> speak. The chat call is only issued once a label
//! is known, and a chat failure leaves the detected label in place.

use crate::api::EmotionApi;
use crate::error::AppError;
use crate::speech::{SpeechParams, Speaker};
use crate::web::HttpClient;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// How a submission ended
#[derive(Debug, Clone, PartialEq)]
pub enum TextOutcome {
    Replied { emotion: String, reply: String },
    /// The prediction call failed or was never made; chat was not attempted
    DetectionFailed(AppError),
    /// Prediction succeeded, chat did not
    ChatFailed { emotion: String, error: AppError },
}

/// What the Text view renders
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TextPhase {
    #[default]
    Idle,
    Submitting {
        emotion: Option<String>,
    },
    Done {
        emotion: String,
        reply: String,
    },
    Failed {
        emotion: Option<String>,
    },
}

impl TextPhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, TextPhase::Submitting { .. })
    }

    /// Whether a submission of `text` may start from this phase
    pub fn accepts(&self, text: &str) -> bool {
        !self.is_busy() && !text.trim().is_empty()
    }

    pub fn emotion(&self) -> Option<&str> {
        match self {
            TextPhase::Idle => None,
            TextPhase::Submitting { emotion } | TextPhase::Failed { emotion } => emotion.as_deref(),
            TextPhase::Done { emotion, .. } => Some(emotion),
        }
    }

    pub fn reply(&self) -> Option<&str> {
        match self {
            TextPhase::Done { reply, .. } => Some(reply),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&'static str> {
        match self {
            TextPhase::Failed { .. } => Some(GENERIC_FAILURE),
            _ => None,
        }
    }

    /// Terminal phase for a finished submission
    ///
    /// A silent failure (blank input) leaves a settled phase as is.
    pub fn settle(self, outcome: TextOutcome) -> Self {
        match outcome {
            TextOutcome::DetectionFailed(e) if e.is_silent() => {
                if self.is_busy() {
                    TextPhase::Idle
                } else {
                    self
                }
            }
            TextOutcome::Replied { emotion, reply } => TextPhase::Done { emotion, reply },
            TextOutcome::DetectionFailed(_) => TextPhase::Failed { emotion: None },
            TextOutcome::ChatFailed { emotion, .. } => TextPhase::Failed {
                emotion: Some(emotion),
            },
        }
    }
}

/// Detect the emotion of `text`, fetch a reply and speak it
///
/// `on_detected` fires as soon as the label is known, before the chat call.
pub async fn analyze_and_chat<C, S, F>(
    api: &EmotionApi<C>,
    speaker: &S,
    text: &str,
    on_detected: F,
) -> TextOutcome
where
    C: HttpClient,
    S: Speaker + ?Sized,
    F: FnOnce(&str),
{
    if text.trim().is_empty() {
        return TextOutcome::DetectionFailed(AppError::EmptyInput);
    }

    let emotion = match api.predict_text(text).await {
        Ok(resp) => match resp.primary_label() {
            Some(label) => label.to_string(),
            None => {
                return TextOutcome::DetectionFailed(AppError::InvalidResponse(
                    "no predictions".to_string(),
                ));
            }
        },
        Err(e) => {
            log::warn!("[Text] detection failed: {}", e);
            return TextOutcome::DetectionFailed(e);
        }
    };
    on_detected(&emotion);

    let reply = match api.chat(text, &emotion).await {
        Ok(resp) => resp.reply,
        Err(e) => {
            log::warn!("[Text] chat failed: {}", e);
            return TextOutcome::ChatFailed { emotion, error: e };
        }
    };

    speaker.speak(&reply, SpeechParams::for_emotion(&emotion));
    TextOutcome::Replied { emotion, reply }
}
