mod webcam;

pub use webcam::WebcamCapture;

use anyhow::Result;
use image::RgbImage;

/// Trait for camera/video sources feeding the pipeline.
pub trait FrameSource {
    /// Read the next frame. `Ok(None)` signals end of stream.
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;

    /// Whether the underlying device is currently open.
    fn is_open(&self) -> bool;

    /// Release the underlying device. Subsequent reads yield end of
    /// stream; releasing twice is a no-op.
    fn release(&mut self);
}
