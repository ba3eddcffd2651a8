//! Spoken replies
//!
//! Voice parameters follow the detected emotion.

/// Utterance rate and pitch, 1.0 being the platform default
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechParams {
    pub rate: f32,
    pub pitch: f32,
}

pub const SPEECH_LANG: &str = "en-US";

impl SpeechParams {
    pub const NEUTRAL: SpeechParams = SpeechParams {
        rate: 1.0,
        pitch: 1.0,
    };

    pub fn for_emotion(label: &str) -> Self {
        match label {
            "sadness" => SpeechParams {
                rate: 0.9,
                pitch: 0.8,
            },
            "joy" => SpeechParams {
                rate: 1.05,
                pitch: 1.2,
            },
            "anger" => SpeechParams {
                rate: 1.0,
                pitch: 0.9,
            },
            _ => Self::NEUTRAL,
        }
    }
}

/// Text-to-speech sink
pub trait Speaker {
    /// Cancel anything being spoken, then speak `text`.
    fn speak(&self, text: &str, params: SpeechParams);
}

// =========================================================
// Test utilities
// =========================================================

#[cfg(test)]
#[derive(Default)]
pub struct RecordingSpeaker {
    pub spoken: std::cell::RefCell<Vec<(String, SpeechParams)>>,
}

#[cfg(test)]
impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str, params: SpeechParams) {
        self.spoken.borrow_mut().push((text.to_string(), params));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_mapping() {
        assert_eq!(
            SpeechParams::for_emotion("sadness"),
            SpeechParams { rate: 0.9, pitch: 0.8 }
        );
        assert_eq!(
            SpeechParams::for_emotion("joy"),
            SpeechParams { rate: 1.05, pitch: 1.2 }
        );
        assert_eq!(
            SpeechParams::for_emotion("anger"),
            SpeechParams { rate: 1.0, pitch: 0.9 }
        );
    }

    #[test]
    fn test_unknown_labels_are_neutral() {
        for label in ["neutral", "fear", "surprise", "", "Joy"] {
            assert_eq!(SpeechParams::for_emotion(label), SpeechParams::NEUTRAL);
        }
    }
}
