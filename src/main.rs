mod capture;
mod cloak;
mod error;
mod output;
mod signals;

use anyhow::{Context, Result};
use capture::WebcamCapture;
use clap::Parser;
use cloak::{get_profile, run_pipeline, supported_colors, PipelineConfig};
use output::{FrameDirSink, OutputSink, V4L2Output};
use signals::SharedSignals;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input webcam device index
    #[arg(long, default_value_t = 0)]
    camera: u32,

    /// Cloak color to make invisible
    #[arg(short, long, default_value = "red")]
    color: String,

    /// Frames to capture for the background estimate
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(usize))]
    bg_frames: usize,

    /// Camera capture width
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Camera capture height
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Output v4l2loopback device path (e.g. /dev/video10)
    #[arg(short, long)]
    output_device: Option<String>,

    /// Directory to save composited frames into, as an alternative to a
    /// loopback device
    #[arg(long)]
    output_dir: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("Cloakcam starting");
    tracing::info!("Cloak color: {}", args.color);
    tracing::info!("Background frames: {}", args.bg_frames);
    tracing::info!("Target FPS: {}", args.fps);

    anyhow::ensure!(
        args.bg_frames > 0,
        "background frame count must be positive"
    );

    let profile = get_profile(&args.color).with_context(|| {
        format!(
            "Supported colors: {}",
            supported_colors().collect::<Vec<_>>().join(", ")
        )
    })?;

    // Initialize capture
    let mut source = WebcamCapture::new(args.camera, args.width, args.height)
        .context("Failed to initialize webcam capture")?;

    // Initialize output
    let mut sink: Box<dyn OutputSink> = if let Some(device) = &args.output_device {
        Box::new(
            V4L2Output::new(device, args.width, args.height)
                .context("Failed to initialize v4l2loopback output")?,
        )
    } else if let Some(dir) = &args.output_dir {
        Box::new(FrameDirSink::new(dir).context("Failed to initialize frame directory output")?)
    } else {
        anyhow::bail!("no output configured, pass --output-device or --output-dir");
    };

    let mut control = SharedSignals::new();
    control.install_ctrlc()?;

    let config = PipelineConfig {
        profile,
        background_frames: args.bg_frames,
        target_fps: args.fps,
        // The webcam negotiates its own format, so frame dimensions are
        // validated per frame by the compositor instead.
        expected_dimensions: None,
    };

    tracing::info!("Press Ctrl+C to stop");
    run_pipeline(&mut source, &mut control, &mut sink, &config)
}
