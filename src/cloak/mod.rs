mod background;
mod color;
mod compose;
mod hsv;
mod mask;
mod pipeline;

pub use background::{capture_background, FrameBuffer};
pub use color::{get_profile, supported_colors, ColorProfile, HsvBounds};
pub use compose::compose;
pub use hsv::{rgb_to_hsv, to_hsv, HsvImage};
pub use mask::{build_mask, coverage_percent};
pub use pipeline::{run_pipeline, ControlSignals, PipelineConfig, PipelineState};

#[cfg(test)]
pub(crate) mod testutil {
    use std::collections::VecDeque;

    use anyhow::Result;
    use image::{Rgb, RgbImage};

    use crate::capture::FrameSource;

    pub fn solid(width: u32, height: u32, value: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(value))
    }

    /// Frame source fed from a fixed list of frames; yields end of
    /// stream once they run out.
    pub struct ScriptedSource {
        frames: VecDeque<RgbImage>,
        open: bool,
        pub released: bool,
    }

    impl ScriptedSource {
        pub fn new(frames: Vec<RgbImage>) -> Self {
            Self {
                frames: frames.into(),
                open: true,
                released: false,
            }
        }

        pub fn closed() -> Self {
            Self {
                frames: VecDeque::new(),
                open: false,
                released: false,
            }
        }
    }

    impl FrameSource for ScriptedSource {
        fn next_frame(&mut self) -> Result<Option<RgbImage>> {
            if !self.open {
                return Ok(None);
            }
            Ok(self.frames.pop_front())
        }

        fn is_open(&self) -> bool {
            self.open
        }

        fn release(&mut self) {
            self.open = false;
            self.released = true;
        }
    }
}
