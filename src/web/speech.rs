//! `window.speechSynthesis`

use web_sys::SpeechSynthesisUtterance;

use crate::speech::{SPEECH_LANG, SpeechParams, Speaker};

/// Browser speech synthesis. Silently does nothing where unsupported.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSpeaker;

impl Speaker for BrowserSpeaker {
    fn speak(&self, text: &str, params: SpeechParams) {
        let Some(synth) = web_sys::window().and_then(|w| w.speech_synthesis().ok()) else {
            log::debug!("[Speech] speechSynthesis unavailable");
            return;
        };

        synth.cancel();

        let utterance = match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(u) => u,
            Err(e) => {
                log::warn!("[Speech] utterance rejected: {:?}", e);
                return;
            }
        };
        utterance.set_rate(params.rate);
        utterance.set_pitch(params.pitch);
        utterance.set_lang(SPEECH_LANG);
        synth.speak(&utterance);
    }
}
