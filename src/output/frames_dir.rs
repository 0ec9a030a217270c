use super::OutputSink;
use anyhow::{Context, Result};
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Saves numbered frames into a directory, for running without a
/// loopback device. The captured background is saved alongside them.
pub struct FrameDirSink {
    dir: PathBuf,
    next_index: u64,
}

impl FrameDirSink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

        tracing::info!("Saving frames to {}", dir.display());

        Ok(Self { dir, next_index: 0 })
    }
}

impl OutputSink for FrameDirSink {
    fn emit(&mut self, frame: &RgbImage) -> Result<()> {
        let path = self.dir.join(format!("result_{:05}.png", self.next_index));
        frame
            .save(&path)
            .with_context(|| format!("Failed to save frame to {}", path.display()))?;
        self.next_index += 1;
        Ok(())
    }

    fn on_background(&mut self, background: &RgbImage) -> Result<()> {
        let path = self.dir.join("background.png");
        background
            .save(&path)
            .with_context(|| format!("Failed to save background to {}", path.display()))?;
        tracing::info!("Background saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn frames_and_background_are_written() {
        let dir = std::env::temp_dir().join(format!("cloakcam-test-{}", std::process::id()));
        let mut sink = FrameDirSink::new(&dir).unwrap();

        let frame = RgbImage::from_pixel(4, 4, Rgb([9, 9, 9]));
        sink.on_background(&frame).unwrap();
        sink.emit(&frame).unwrap();
        sink.emit(&frame).unwrap();

        assert!(dir.join("background.png").exists());
        assert!(dir.join("result_00000.png").exists());
        assert!(dir.join("result_00001.png").exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
