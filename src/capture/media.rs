//! Media acquisition seam
//!
//! Controllers talk to hardware through these traits; `web::media` provides
//! the `getUserMedia` implementations.

use crate::error::{AppResult, Device};

/// Source of a live hardware stream
#[async_trait::async_trait(?Send)]
pub trait MediaDevices {
    type Stream: MediaStream;

    fn device(&self) -> Device;

    /// Prompt for permission and open the stream.
    async fn acquire(&self) -> AppResult<Self::Stream>;
}

/// An acquired stream
pub trait MediaStream {
    /// Stop every track and detach from any rendering surface.
    ///
    /// Consumes the handle, so a stream is released at most once. Returns
    /// the number of tracks stopped.
    fn release(self) -> usize;
}

/// A stream that can produce a still image
pub trait FrameSource {
    /// Current frame encoded as a JPEG `data:` URI
    fn grab_frame(&self) -> AppResult<String>;
}

// =========================================================
// Test utilities: MockDevices
// =========================================================

#[cfg(test)]
pub use mock::MockDevices;
