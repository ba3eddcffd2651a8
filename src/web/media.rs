//! `getUserMedia` backed devices
//!
//! Camera streams render into a `<video>` element and are captured through
//! an offscreen canvas. Microphone streams feed a `MediaRecorder`; the clip
//! is assembled into a Blob URL once recording stops.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Video;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobEvent, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement,
    HtmlVideoElement, MediaRecorder, MediaStreamConstraints, MediaStreamTrack, Url,
};

use crate::capture::{FrameSource, MediaDevices, MediaStream};
use crate::error::{AppError, AppResult, Device};

const FRAME_MIME: &str = "image/jpeg";

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

async fn get_user_media(video: bool, audio: bool) -> Result<web_sys::MediaStream, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let devices = window.navigator().media_devices()?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::from_bool(video));
    constraints.set_audio(&JsValue::from_bool(audio));

    let promise = devices.get_user_media_with_constraints(&constraints)?;
    let stream = JsFuture::from(promise).await?;
    stream.dyn_into::<web_sys::MediaStream>()
}

fn stop_tracks(stream: &web_sys::MediaStream) -> usize {
    let mut stopped = 0;
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
            stopped += 1;
        }
    }
    stopped
}

// =========================================================
// Camera
// =========================================================

/// Camera rendering into the `<video>` behind `video`
#[derive(Clone, Copy)]
pub struct BrowserCamera {
    video: NodeRef<Video>,
}

impl BrowserCamera {
    pub fn new(video: NodeRef<Video>) -> Self {
        Self { video }
    }
}

pub struct CameraStream {
    stream: web_sys::MediaStream,
    video: HtmlVideoElement,
}

#[async_trait::async_trait(?Send)]
impl MediaDevices for BrowserCamera {
    type Stream = CameraStream;

    fn device(&self) -> Device {
        Device::Camera
    }

    async fn acquire(&self) -> AppResult<CameraStream> {
        let video = self
            .video
            .get_untracked()
            .ok_or_else(|| AppError::CaptureFailed("video element not mounted".to_string()))?;

        let stream = get_user_media(true, false).await.map_err(|e| {
            log::warn!("[Media] camera: {}", js_err(e));
            AppError::PermissionDenied(Device::Camera)
        })?;

        video.set_src_object(Some(&stream));
        video.set_muted(true);
        let _ = video.set_attribute("playsinline", "");

        let played = match video.play() {
            Ok(promise) => JsFuture::from(promise).await.map(|_| ()),
            Err(e) => Err(e),
        };
        let stream = CameraStream { stream, video };
        if let Err(e) = played {
            log::warn!("[Media] video playback refused: {}", js_err(e));
            stream.release();
            return Err(AppError::PermissionDenied(Device::Camera));
        }
        Ok(stream)
    }
}

impl MediaStream for CameraStream {
    fn release(self) -> usize {
        let stopped = stop_tracks(&self.stream);
        self.video.set_src_object(None);
        stopped
    }
}

impl FrameSource for CameraStream {
    fn grab_frame(&self) -> AppResult<String> {
        let fail = |what: &str| AppError::CaptureFailed(what.to_string());

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| fail("no document"))?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| AppError::CaptureFailed(js_err(e)))?
            .dyn_into()
            .map_err(|_| fail("canvas element expected"))?;
        canvas.set_width(self.video.video_width());
        canvas.set_height(self.video.video_height());

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| AppError::CaptureFailed(js_err(e)))?
            .ok_or_else(|| fail("2d context unavailable"))?
            .dyn_into()
            .map_err(|_| fail("2d context expected"))?;

        ctx.draw_image_with_html_video_element(&self.video, 0.0, 0.0)
            .map_err(|e| AppError::CaptureFailed(js_err(e)))?;

        canvas
            .to_data_url_with_type(FRAME_MIME)
            .map_err(|e| AppError::CaptureFailed(js_err(e)))
    }
}

// =========================================================
// Microphone
// =========================================================

/// A finished recording, playable through its object URL
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub url: String,
    pub bytes: f64,
}

impl AudioClip {
    /// Free the Blob behind the URL
    pub fn revoke(&self) {
        let _ = Url::revoke_object_url(&self.url);
    }
}

/// Microphone recording through `MediaRecorder`
///
/// `on_clip` receives the assembled clip after each recording stops.
#[derive(Clone)]
pub struct BrowserMicrophone {
    on_clip: Rc<dyn Fn(AudioClip)>,
}

impl BrowserMicrophone {
    pub fn new(on_clip: impl Fn(AudioClip) + 'static) -> Self {
        Self {
            on_clip: Rc::new(on_clip),
        }
    }
}

struct RecorderHandlers {
    _on_data: Closure<dyn FnMut(BlobEvent)>,
    _on_stop: Closure<dyn FnMut()>,
}

/// Keeps the recorder callbacks alive until the final `stop` event
type HandlerSlot = Rc<RefCell<Option<RecorderHandlers>>>;

/// Drop the handlers once the current JS callback has returned
fn release_handlers_later(slot: &HandlerSlot) {
    if let Some(handlers) = slot.borrow_mut().take() {
        wasm_bindgen_futures::spawn_local(async move { drop(handlers) });
    }
}

pub struct MicStream {
    stream: web_sys::MediaStream,
    recorder: MediaRecorder,
    handlers: HandlerSlot,
}

#[async_trait::async_trait(?Send)]
impl MediaDevices for BrowserMicrophone {
    type Stream = MicStream;

    fn device(&self) -> Device {
        Device::Microphone
    }

    async fn acquire(&self) -> AppResult<MicStream> {
        let stream = get_user_media(false, true).await.map_err(|e| {
            log::warn!("[Media] microphone: {}", js_err(e));
            AppError::PermissionDenied(Device::Microphone)
        })?;

        let recorder = match MediaRecorder::new_with_media_stream(&stream) {
            Ok(r) => r,
            Err(e) => {
                stop_tracks(&stream);
                return Err(AppError::CaptureFailed(js_err(e)));
            }
        };

        let chunks: Rc<RefCell<Vec<Blob>>> = Rc::default();
        let handlers: HandlerSlot = Rc::default();

        let on_data = {
            let chunks = chunks.clone();
            Closure::<dyn FnMut(BlobEvent)>::new(move |ev: BlobEvent| {
                if let Some(blob) = ev.data() {
                    chunks.borrow_mut().push(blob);
                }
            })
        };

        let on_stop = {
            let on_clip = self.on_clip.clone();
            let mime = recorder.mime_type();
            let recorder = recorder.clone();
            let handlers = handlers.clone();
            Closure::<dyn FnMut()>::new(move || {
                recorder.set_ondataavailable(None);
                recorder.set_onstop(None);
                release_handlers_later(&handlers);

                let parts = js_sys::Array::new();
                for blob in chunks.borrow_mut().drain(..) {
                    parts.push(&blob);
                }
                let options = BlobPropertyBag::new();
                options.set_type(&mime);
                let clip = Blob::new_with_blob_sequence_and_options(&parts, &options)
                    .and_then(|blob| {
                        Url::create_object_url_with_blob(&blob).map(|url| AudioClip {
                            url,
                            bytes: blob.size(),
                        })
                    });
                match clip {
                    Ok(clip) => on_clip(clip),
                    Err(e) => log::warn!("[Media] clip assembly failed: {}", js_err(e)),
                }
            })
        };

        recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));
        recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));

        handlers.replace(Some(RecorderHandlers {
            _on_data: on_data,
            _on_stop: on_stop,
        }));

        if let Err(e) = recorder.start() {
            recorder.set_ondataavailable(None);
            recorder.set_onstop(None);
            handlers.replace(None);
            stop_tracks(&stream);
            return Err(AppError::CaptureFailed(js_err(e)));
        }

        Ok(MicStream {
            stream,
            recorder,
            handlers,
        })
    }
}

impl MediaStream for MicStream {
    fn release(self) -> usize {
        // the final dataavailable and stop events fire after this returns;
        // the stop handler frees both callbacks
        if self.recorder.stop().is_err() {
            self.recorder.set_ondataavailable(None);
            self.recorder.set_onstop(None);
            release_handlers_later(&self.handlers);
        }
        stop_tracks(&self.stream)
    }
}
