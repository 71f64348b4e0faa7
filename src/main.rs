//! circuit-cv - Gesture-driven DC circuit builder
//!
//! Reads hand landmarks per camera frame from stdin and writes the circuit
//! state per frame to stdout.
//!
//! # Usage
//!
//! ```bash
//! hand-tracker --json /dev/video0 | circuit-cv --paced | circuit-renderer
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use circuit_cv::{
    error::Result,
    gesture::{FrameSize, DEFAULT_PINCH_THRESHOLD},
    session::{Session, SessionConfig, DEFAULT_TARGET_FPS},
    stream::process_stdio,
    DEFAULT_CONNECTION_THRESHOLD,
};

/// Gesture-driven circuit builder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera frame width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Camera frame height in pixels
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Thumb-to-index distance in pixels that counts as a pinch (10-100)
    #[arg(long, default_value_t = DEFAULT_PINCH_THRESHOLD)]
    pinch_threshold: f64,

    /// Distance in pixels at which a wire end attaches to a component
    #[arg(long, default_value_t = DEFAULT_CONNECTION_THRESHOLD)]
    connection_threshold: f64,

    /// Target frame rate
    #[arg(long, default_value_t = DEFAULT_TARGET_FPS)]
    fps: u32,

    /// Sleep between frames to hold the target frame rate
    #[arg(long)]
    paced: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries snapshots, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SessionConfig::new()
        .with_frame_size(FrameSize::new(args.width, args.height)?)
        .with_pinch_threshold(args.pinch_threshold)
        .with_connection_threshold(args.connection_threshold)
        .with_target_fps(args.fps);

    let mut session = Session::new(config);
    process_stdio(&mut session, args.paced)?;

    Ok(())
}
