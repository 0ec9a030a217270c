use std::collections::VecDeque;

use anyhow::Result;
use image::{imageops, Rgb, RgbImage};

use crate::capture::FrameSource;
use crate::error::CloakError;

/// Bounded frame buffer for background estimation. The oldest frame is
/// evicted once capacity is reached.
pub struct FrameBuffer {
    frames: VecDeque<RgbImage>,
    capacity: usize,
}

impl FrameBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, frame: RgbImage) {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Per-pixel, per-channel median of the buffered frames. For an even
    /// count the two middle values are averaged and truncated.
    ///
    /// The median rejects transient noise and brief motion through the
    /// scene during capture; a mean would smear those outliers into the
    /// background.
    pub fn median(&self) -> Option<RgbImage> {
        let (width, height) = self.frames.front()?.dimensions();
        let mut values: Vec<u8> = Vec::with_capacity(self.frames.len());

        Some(RgbImage::from_fn(width, height, |x, y| {
            let mut px = [0u8; 3];
            for (c, out) in px.iter_mut().enumerate() {
                values.clear();
                values.extend(self.frames.iter().map(|f| f.get_pixel(x, y)[c]));
                values.sort_unstable();
                let n = values.len();
                *out = if n % 2 == 1 {
                    values[n / 2]
                } else {
                    ((values[n / 2 - 1] as u16 + values[n / 2] as u16) / 2) as u8
                };
            }
            Rgb(px)
        }))
    }
}

/// Capture a stable background while the scene is empty.
///
/// Reads `frame_count` frames from the source, mirroring each one the
/// same way the streaming loop does so the background aligns spatially
/// with live frames, then reduces them to a per-pixel temporal median.
/// Blocks until all frames are read; calling it again replaces the
/// previous background wholesale.
pub fn capture_background<S: FrameSource>(source: &mut S, frame_count: usize) -> Result<RgbImage> {
    anyhow::ensure!(frame_count > 0, "background frame count must be positive");

    tracing::info!(
        "Capturing background over {} frames, stay out of view",
        frame_count
    );

    let mut buffer = FrameBuffer::new(frame_count);
    for captured in 0..frame_count {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                return Err(CloakError::Capture {
                    captured,
                    requested: frame_count,
                }
                .into())
            }
            Err(err) => {
                return Err(err.context(CloakError::Capture {
                    captured,
                    requested: frame_count,
                }))
            }
        };
        buffer.push(imageops::flip_horizontal(&frame));

        if (captured + 1) % 10 == 0 {
            tracing::debug!("Captured {}/{} background frames", captured + 1, frame_count);
        }
    }

    let background = buffer
        .median()
        .ok_or_else(|| anyhow::anyhow!("background buffer is empty"))?;
    tracing::info!("Background captured");
    Ok(background)
}
