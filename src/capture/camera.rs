//! Camera controller (Face view)
//!
//! `Off -> Starting -> On -> Off`. Denial during `Starting` falls back to
//! `Off`. Captures are only possible while `On`.

use std::cell::{Cell, RefCell};

use emotion_shared::DetectionResult;

use super::media::{FrameSource, MediaDevices, MediaStream};
use crate::api::EmotionApi;
use crate::error::AppError;
use crate::web::HttpClient;

enum CameraState<S> {
    Off,
    Starting,
    On(S),
}

/// Copyable view of the state for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraStatus {
    Off,
    Starting,
    On,
}

impl CameraStatus {
    pub fn is_on(&self) -> bool {
        matches!(self, CameraStatus::On)
    }
}

/// Everything the Face view renders
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSnapshot {
    pub status: CameraStatus,
    pub result: Option<DetectionResult>,
    pub error: Option<AppError>,
}

pub struct CameraController<D: MediaDevices, C: HttpClient> {
    devices: D,
    api: EmotionApi<C>,
    state: RefCell<CameraState<D::Stream>>,
    // bumped on every start and stop; a capture only lands in its own session
    session: Cell<u64>,
    result: RefCell<Option<DetectionResult>>,
    error: RefCell<Option<AppError>>,
}

impl<D, C> CameraController<D, C>
where
    D: MediaDevices,
    D::Stream: FrameSource,
    C: HttpClient,
{
    pub fn new(devices: D, api: EmotionApi<C>) -> Self {
        Self {
            devices,
            api,
            state: RefCell::new(CameraState::Off),
            session: Cell::new(0),
            result: RefCell::new(None),
            error: RefCell::new(None),
        }
    }

    pub fn status(&self) -> CameraStatus {
        match &*self.state.borrow() {
            CameraState::Off => CameraStatus::Off,
            CameraState::Starting => CameraStatus::Starting,
            CameraState::On(_) => CameraStatus::On,
        }
    }

    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            status: self.status(),
            result: self.result.borrow().clone(),
            error: self.error.borrow().clone(),
        }
    }

    #[cfg(test)]
    pub fn devices(&self) -> &D {
        &self.devices
    }

    #[cfg(test)]
    pub fn api(&self) -> &EmotionApi<C> {
        &self.api
    }

    /// Request the camera and attach it. No-op unless `Off`.
    pub async fn start(&self) {
        {
            let mut state = self.state.borrow_mut();
            if !matches!(*state, CameraState::Off) {
                return;
            }
            *state = CameraState::Starting;
        }
        self.next_session();
        self.error.replace(None);
        log::info!("[Camera] requesting {:?} access", self.devices.device());

        let acquired = self.devices.acquire().await;

        let mut state = self.state.borrow_mut();
        let still_starting = matches!(*state, CameraState::Starting);
        match acquired {
            Ok(stream) if still_starting => {
                *state = CameraState::On(stream);
                log::info!("[Camera] on");
            }
            Ok(stream) => {
                // stopped while the prompt was open
                drop(state);
                let stopped = stream.release();
                log::debug!("[Camera] stopped before start finished, released {} tracks", stopped);
            }
            Err(e) => {
                drop(state);
                log::warn!("[Camera] {}", e);
                if still_starting {
                    self.state.replace(CameraState::Off);
                    self.error.replace(Some(e));
                }
            }
        }
    }

    /// Grab the current frame and classify it
    ///
    /// Does nothing, and issues no request, unless the camera is `On`. A
    /// response arriving after `stop` is discarded.
    pub async fn capture(&self) {
        let frame = match &*self.state.borrow() {
            CameraState::On(stream) => stream.grab_frame(),
            _ => return,
        };

        let image = match frame {
            Ok(image) => image,
            Err(e) => {
                log::warn!("[Camera] {}", e);
                self.error.replace(Some(e));
                return;
            }
        };

        let session = self.session.get();
        let outcome = self.api.predict_face(image).await;

        if self.session.get() != session || !self.status().is_on() {
            log::debug!("[Camera] prediction arrived after stop, dropped");
            return;
        }
        match outcome {
            Ok(raw) => {
                self.result.replace(Some(DetectionResult::from_payload(raw)));
                self.error.replace(None);
            }
            Err(e) => {
                self.error.replace(Some(e));
            }
        }
    }

    /// Release the hardware and clear result and error
    ///
    /// Returns the number of tracks stopped (zero when nothing was held).
    pub fn stop(&self) -> usize {
        let previous = self.state.replace(CameraState::Off);
        self.next_session();
        self.result.replace(None);
        self.error.replace(None);
        match previous {
            CameraState::On(stream) => {
                let stopped = stream.release();
                log::info!("[Camera] off, released {} tracks", stopped);
                stopped
            }
            CameraState::Starting | CameraState::Off => 0,
        }
    }

    pub fn clear_result(&self) {
        self.result.replace(None);
    }

    fn next_session(&self) {
        self.session.set(self.session.get().wrapping_add(1));
    }
}

impl<D: MediaDevices, C: HttpClient> Drop for CameraController<D, C> {
    fn drop(&mut self) {
        if let CameraState::On(stream) = self.state.replace(CameraState::Off) {
            stream.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::media::MockDevices;
    use crate::error::Device;
    use crate::web::MockHttpClient;
    use serde_json::json;

    fn controller(
        devices: MockDevices,
        client: MockHttpClient,
    ) -> CameraController<MockDevices, MockHttpClient> {
        let api = EmotionApi::with_client("http://b", Some("tok".to_string()), client);
        CameraController::new(devices, api)
    }

    fn face_ok() -> MockHttpClient {
        MockHttpClient::new().respond(
            "/predict_face",
            200,
            json!({"predictions": [{"label": "joy", "score": 0.8}, {"label": "neutral", "score": 0.2}]}),
        )
    }

    #[tokio::test]
    async fn test_start_turns_camera_on() {
        let camera = controller(MockDevices::camera(), face_ok());
        assert_eq!(camera.status(), CameraStatus::Off);

        camera.start().await;
        assert_eq!(camera.status(), CameraStatus::On);
        assert_eq!(camera.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_denied_permission_stays_off_with_message() {
        let camera = controller(MockDevices::camera().denying(), face_ok());

        camera.start().await;

        let snap = camera.snapshot();
        assert_eq!(snap.status, CameraStatus::Off);
        assert_eq!(snap.error, Some(AppError::PermissionDenied(Device::Camera)));
        assert_eq!(
            snap.error.unwrap().to_string(),
            "Camera permission denied or unavailable."
        );
    }

    #[tokio::test]
    async fn test_retry_after_denial() {
        let camera = controller(MockDevices::camera().denying(), face_ok());
        camera.start().await;
        assert_eq!(camera.status(), CameraStatus::Off);

        camera.devices().set_denying(false);
        camera.start().await;
        assert_eq!(camera.status(), CameraStatus::On);
        assert_eq!(camera.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_capture_while_off_issues_no_request() {
        let camera = controller(MockDevices::camera(), face_ok());

        camera.capture().await;

        assert_eq!(camera.api().client().request_count(), 0);
        assert_eq!(camera.snapshot().result, None);
    }

    #[tokio::test]
    async fn test_capture_stores_detection() {
        let camera = controller(MockDevices::camera(), face_ok());
        camera.start().await;

        camera.capture().await;

        let result = camera.snapshot().result.unwrap();
        assert_eq!(result.label.as_deref(), Some("joy"));
        let body = camera.api().client().body_of(0);
        assert!(body["image"].as_str().unwrap().starts_with("data:image/jpeg"));
    }

    #[tokio::test]
    async fn test_capture_without_frame_reports_error() {
        let camera = controller(MockDevices::camera().without_frames(), face_ok());
        camera.start().await;

        camera.capture().await;

        assert!(matches!(
            camera.snapshot().error,
            Some(AppError::CaptureFailed(_))
        ));
        assert_eq!(camera.api().client().request_count(), 0);
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_camera_on() {
        let client = MockHttpClient::new().respond("/predict_face", 500, json!({"error": "boom"}));
        let camera = controller(MockDevices::camera(), client);
        camera.start().await;

        camera.capture().await;

        let snap = camera.snapshot();
        assert_eq!(snap.status, CameraStatus::On);
        assert_eq!(snap.error.unwrap().to_string(), "boom");
    }

    #[tokio::test]
    async fn test_stop_releases_every_track_once() {
        let camera = controller(MockDevices::camera().with_tracks(2), face_ok());
        camera.start().await;

        assert_eq!(camera.stop(), 2);
        assert_eq!(camera.stop(), 0);
        assert_eq!(camera.devices().released(), 2);
        assert_eq!(camera.status(), CameraStatus::Off);
    }

    #[tokio::test]
    async fn test_stop_clears_result_and_error() {
        let camera = controller(MockDevices::camera(), face_ok());
        camera.start().await;
        camera.capture().await;
        assert!(camera.snapshot().result.is_some());

        camera.stop();

        let snap = camera.snapshot();
        assert_eq!(snap.result, None);
        assert_eq!(snap.error, None);
    }

    #[tokio::test]
    async fn test_clear_result_keeps_camera_on() {
        let camera = controller(MockDevices::camera(), face_ok());
        camera.clear_result();
        camera.start().await;
        camera.capture().await;

        camera.clear_result();

        assert_eq!(camera.snapshot().result, None);
        assert_eq!(camera.status(), CameraStatus::On);
    }

    #[tokio::test]
    async fn test_stop_during_start_releases_late_stream() {
        let camera = controller(MockDevices::camera(), face_ok());

        futures::join!(camera.start(), async {
            assert_eq!(camera.status(), CameraStatus::Starting);
            camera.stop();
        });

        assert_eq!(camera.status(), CameraStatus::Off);
        assert_eq!(camera.devices().released(), 1);
    }

    #[tokio::test]
    async fn test_denial_after_stop_leaves_no_error() {
        let camera = controller(MockDevices::camera().denying(), face_ok());

        futures::join!(camera.start(), async {
            camera.stop();
        });

        let snap = camera.snapshot();
        assert_eq!(snap.status, CameraStatus::Off);
        assert_eq!(snap.error, None);
    }

    #[tokio::test]
    async fn test_prediction_from_previous_session_is_dropped() {
        let client = MockHttpClient::new()
            .respond(
                "/predict_face",
                200,
                json!({"predictions": [{"label": "old-frame"}]}),
            )
            .with_delay(5);
        let camera = controller(MockDevices::camera(), client);
        camera.start().await;

        futures::join!(camera.capture(), async {
            tokio::task::yield_now().await;
            camera.stop();
            camera.start().await;
        });

        let snap = camera.snapshot();
        assert_eq!(snap.status, CameraStatus::On);
        assert_eq!(snap.result, None);
        assert_eq!(camera.api().client().request_count(), 1);
    }

    #[tokio::test]
    async fn test_drop_releases_stream() {
        let devices = MockDevices::camera();
        let released = devices.released.clone();
        let camera = controller(devices, face_ok());
        camera.start().await;

        drop(camera);

        assert_eq!(released.get(), 1);
    }
}
