use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use image::imageops;

use crate::capture::FrameSource;
use crate::error::CloakError;
use crate::output::OutputSink;

use super::background::capture_background;
use super::color::ColorProfile;
use super::compose::compose;
use super::hsv::to_hsv;
use super::mask::{build_mask, coverage_percent};

/// Control inputs polled once per streaming iteration. There is no
/// mid-frame cancellation; a signal raised during a frame takes effect
/// at the top of the next iteration.
pub trait ControlSignals {
    /// True when the session should end.
    fn poll_cancel(&mut self) -> bool;

    /// True when the background should be captured again. A recapture
    /// never tears down the camera.
    fn poll_recapture(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    BackgroundCapture,
    Streaming,
    Terminated,
}

pub struct PipelineConfig {
    pub profile: ColorProfile,
    pub background_frames: usize,
    pub target_fps: u32,
    /// When set, the first captured background must have exactly these
    /// dimensions. Leave `None` for sources that negotiate their own
    /// format.
    pub expected_dimensions: Option<(u32, u32)>,
}

/// Run the cloak pipeline to completion: background capture, then the
/// per-frame mask-and-compose loop. The frame source is released on
/// every exit path, including errors.
pub fn run_pipeline<S, C, O>(
    source: &mut S,
    signals: &mut C,
    sink: &mut O,
    config: &PipelineConfig,
) -> Result<()>
where
    S: FrameSource,
    C: ControlSignals,
    O: OutputSink,
{
    let result = run_inner(source, signals, sink, config);
    source.release();
    tracing::debug!("Pipeline state: {:?}", PipelineState::Terminated);
    result
}

fn run_inner<S, C, O>(
    source: &mut S,
    signals: &mut C,
    sink: &mut O,
    config: &PipelineConfig,
) -> Result<()>
where
    S: FrameSource,
    C: ControlSignals,
    O: OutputSink,
{
    anyhow::ensure!(config.target_fps > 0, "target fps must be positive");

    let mut state = PipelineState::Init;
    tracing::debug!("Pipeline state: {:?}", state);

    if !source.is_open() {
        return Err(CloakError::SourceUnavailable.into());
    }

    state = PipelineState::BackgroundCapture;
    tracing::debug!("Pipeline state: {:?}", state);
    let mut background = capture_background(source, config.background_frames)?;

    if let Some((width, height)) = config.expected_dimensions {
        let got = background.dimensions();
        anyhow::ensure!(
            got == (width, height),
            "source yields {}x{} frames, expected {}x{}",
            got.0,
            got.1,
            width,
            height
        );
    }
    sink.on_background(&background)?;

    state = PipelineState::Streaming;
    tracing::debug!("Pipeline state: {:?}", state);
    tracing::info!(
        "Ready: wear the {} cloak and step into frame",
        config.profile.name
    );

    let frame_duration = Duration::from_secs_f32(1.0 / config.target_fps as f32);
    let mut frame_count = 0u64;
    let mut total_capture_time = Duration::ZERO;
    let mut total_mask_time = Duration::ZERO;
    let mut total_compose_time = Duration::ZERO;
    let mut total_output_time = Duration::ZERO;
    let mut coverage_sum = 0.0f64;

    loop {
        if signals.poll_cancel() {
            tracing::info!("Cancel requested, stopping");
            break;
        }
        if signals.poll_recapture() {
            tracing::info!("Recapturing background");
            state = PipelineState::BackgroundCapture;
            tracing::debug!("Pipeline state: {:?}", state);
            background = capture_background(source, config.background_frames)?;
            sink.on_background(&background)?;
            state = PipelineState::Streaming;
            tracing::debug!("Pipeline state: {:?}", state);
            continue;
        }

        let loop_start = Instant::now();

        let capture_start = Instant::now();
        let Some(frame) = source.next_frame().context("Failed to capture frame")? else {
            tracing::info!("Frame source ended");
            break;
        };
        let frame = imageops::flip_horizontal(&frame);
        total_capture_time += capture_start.elapsed();

        let mask_start = Instant::now();
        let hsv = to_hsv(&frame);
        let mask = build_mask(&hsv, &config.profile);
        total_mask_time += mask_start.elapsed();

        let compose_start = Instant::now();
        let output_frame = compose(&frame, &background, &mask)?;
        total_compose_time += compose_start.elapsed();

        let output_start = Instant::now();
        sink.emit(&output_frame).context("Failed to write frame")?;
        total_output_time += output_start.elapsed();

        coverage_sum += coverage_percent(&mask) as f64;
        frame_count += 1;

        // Log stats every 30 frames
        if frame_count % 30 == 0 {
            let avg_capture_ms = total_capture_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_mask_ms = total_mask_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_compose_ms = total_compose_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_output_ms = total_output_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let total_ms = avg_capture_ms + avg_mask_ms + avg_compose_ms + avg_output_ms;
            let actual_fps = 1000.0 / total_ms;
            let avg_coverage = coverage_sum / frame_count as f64;

            tracing::info!(
                "Frame {}: capture={:.1}ms, mask={:.1}ms, compose={:.1}ms, output={:.1}ms, total={:.1}ms, fps={:.1}, coverage={:.1}%",
                frame_count,
                avg_capture_ms,
                avg_mask_ms,
                avg_compose_ms,
                avg_output_ms,
                total_ms,
                actual_fps,
                avg_coverage
            );
        }

        // Frame rate limiting
        let elapsed = loop_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }

    Ok(())
}
