//! Microphone controller (Voice view)
//!
//! `Idle -> Recording -> Idle`, with an elapsed-seconds counter that only
//! advances while recording. The clip stays on the device.

use std::cell::{Cell, RefCell};

use super::media::{MediaDevices, MediaStream};
use crate::error::AppError;

enum MicState<S> {
    Idle,
    Requesting,
    Recording(S),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicStatus {
    Idle,
    Requesting,
    Recording,
}

pub struct MicrophoneController<D: MediaDevices> {
    devices: D,
    state: RefCell<MicState<D::Stream>>,
    elapsed: Cell<u32>,
    error: RefCell<Option<AppError>>,
}

impl<D: MediaDevices> MicrophoneController<D> {
    pub fn new(devices: D) -> Self {
        Self {
            devices,
            state: RefCell::new(MicState::Idle),
            elapsed: Cell::new(0),
            error: RefCell::new(None),
        }
    }

    pub fn status(&self) -> MicStatus {
        match &*self.state.borrow() {
            MicState::Idle => MicStatus::Idle,
            MicState::Requesting => MicStatus::Requesting,
            MicState::Recording(_) => MicStatus::Recording,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.status() == MicStatus::Recording
    }

    /// Whole seconds recorded in the current (or last) session
    pub fn elapsed(&self) -> u32 {
        self.elapsed.get()
    }

    pub fn error(&self) -> Option<AppError> {
        self.error.borrow().clone()
    }

    #[cfg(test)]
    pub fn devices(&self) -> &D {
        &self.devices
    }

    /// Reset the counter and begin recording. No-op unless idle.
    pub async fn start(&self) {
        {
            let mut state = self.state.borrow_mut();
            if !matches!(*state, MicState::Idle) {
                return;
            }
            *state = MicState::Requesting;
        }
        self.error.replace(None);
        self.elapsed.set(0);
        log::info!("[Microphone] requesting {:?} access", self.devices.device());

        let acquired = self.devices.acquire().await;

        let mut state = self.state.borrow_mut();
        let still_requesting = matches!(*state, MicState::Requesting);
        match acquired {
            Ok(stream) if still_requesting => {
                *state = MicState::Recording(stream);
                log::info!("[Microphone] recording");
            }
            Ok(stream) => {
                drop(state);
                stream.release();
            }
            Err(e) => {
                drop(state);
                log::warn!("[Microphone] {}", e);
                if still_requesting {
                    self.state.replace(MicState::Idle);
                    self.error.replace(Some(e));
                }
            }
        }
    }

    /// Advance the counter by one second; ignored unless recording
    pub fn tick(&self) {
        if self.is_recording() {
            self.elapsed.set(self.elapsed.get().saturating_add(1));
        }
    }

    /// End the session and release the tracks. The counter keeps its value.
    pub fn stop(&self) -> usize {
        match self.state.replace(MicState::Idle) {
            MicState::Recording(stream) => {
                let stopped = stream.release();
                log::info!(
                    "[Microphone] stopped after {}s, released {} tracks",
                    self.elapsed.get(),
                    stopped
                );
                stopped
            }
            MicState::Requesting | MicState::Idle => 0,
        }
    }
}

impl<D: MediaDevices> Drop for MicrophoneController<D> {
    fn drop(&mut self) {
        if let MicState::Recording(stream) = self.state.replace(MicState::Idle) {
            stream.release();
        }
    }
}

/// `m:ss`
pub fn format_elapsed(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::media::MockDevices;
    use crate::error::Device;

    #[tokio::test]
    async fn test_start_records() {
        let mic = MicrophoneController::new(MockDevices::microphone());
        mic.start().await;
        assert_eq!(mic.status(), MicStatus::Recording);
        assert_eq!(mic.elapsed(), 0);
    }

    #[tokio::test]
    async fn test_denied_stays_idle() {
        let mic = MicrophoneController::new(MockDevices::microphone().denying());
        mic.start().await;

        assert_eq!(mic.status(), MicStatus::Idle);
        assert_eq!(mic.error(), Some(AppError::PermissionDenied(Device::Microphone)));
        assert_eq!(mic.error().unwrap().to_string(), "Microphone access denied.");
    }

    #[tokio::test]
    async fn test_timer_advances_only_while_recording() {
        let mic = MicrophoneController::new(MockDevices::microphone());
        mic.tick();
        assert_eq!(mic.elapsed(), 0);

        mic.start().await;
        for _ in 0..3 {
            mic.tick();
        }
        assert_eq!(mic.elapsed(), 3);

        mic.stop();
        mic.tick();
        mic.tick();
        assert_eq!(mic.elapsed(), 3);
    }

    #[tokio::test]
    async fn test_restart_resets_timer() {
        let mic = MicrophoneController::new(MockDevices::microphone());
        mic.start().await;
        mic.tick();
        mic.tick();
        mic.stop();
        assert_eq!(mic.elapsed(), 2);

        mic.start().await;
        assert_eq!(mic.elapsed(), 0);
        mic.tick();
        assert_eq!(mic.elapsed(), 1);
    }

    #[tokio::test]
    async fn test_stop_releases_once() {
        let mic = MicrophoneController::new(MockDevices::microphone().with_tracks(1));
        mic.start().await;

        assert_eq!(mic.stop(), 1);
        assert_eq!(mic.stop(), 0);
        assert_eq!(mic.devices().released(), 1);
        assert_eq!(mic.status(), MicStatus::Idle);
    }

    #[tokio::test]
    async fn test_stop_during_request_releases_late_stream() {
        let mic = MicrophoneController::new(MockDevices::microphone());

        futures::join!(mic.start(), async {
            assert_eq!(mic.status(), MicStatus::Requesting);
            assert_eq!(mic.stop(), 0);
        });

        assert_eq!(mic.status(), MicStatus::Idle);
        assert_eq!(mic.devices().acquired.get(), 1);
        assert_eq!(mic.devices().released(), 1);
        assert_eq!(mic.error(), None);
    }

    #[tokio::test]
    async fn test_start_while_recording_is_noop() {
        let mic = MicrophoneController::new(MockDevices::microphone());
        mic.start().await;
        mic.tick();
        mic.start().await;

        assert_eq!(mic.elapsed(), 1);
        assert_eq!(mic.devices().acquired.get(), 1);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(9), "0:09");
        assert_eq!(format_elapsed(75), "1:15");
        assert_eq!(format_elapsed(600), "10:00");
    }
}
