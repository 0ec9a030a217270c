mod frames_dir;
mod loopback;

pub use frames_dir::FrameDirSink;
pub use loopback::V4L2Output;

use anyhow::Result;
use image::RgbImage;

/// Trait for output destinations
pub trait OutputSink {
    /// Write a composited frame to the output
    fn emit(&mut self, frame: &RgbImage) -> Result<()>;

    /// Called once per (re)capture with the new background image.
    /// Sinks that persist state may override this; the default is a
    /// no-op.
    fn on_background(&mut self, _background: &RgbImage) -> Result<()> {
        Ok(())
    }
}

impl OutputSink for Box<dyn OutputSink> {
    fn emit(&mut self, frame: &RgbImage) -> Result<()> {
        (**self).emit(frame)
    }

    fn on_background(&mut self, background: &RgbImage) -> Result<()> {
        (**self).on_background(background)
    }
}
