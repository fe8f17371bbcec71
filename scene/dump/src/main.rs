//! Scene Dump - Headless Frame Inspector
//!
//! Renders frames of the global trading scene without a display and prints
//! the draw commands they produce. Useful for checking the timeline and the
//! responsive layout from a shell or a CI job.
//!
//! # Usage
//!
//! ```bash
//! # One desktop frame, 12 seconds in
//! scene-dump --elapsed 12
//!
//! # The whole loop at one frame per second, mobile width
//! scene-dump --width 500 --height 900 --frames 33 --step 1 --format summary
//!
//! # Verbose logging (written to stderr)
//! RUST_LOG=scene_core=trace scene-dump --elapsed 31.9 --frames 2 --step 0.1
//! ```

mod dump;

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use scene_core::Viewport;
use tracing::info;

use dump::{capture, summarize, DumpRequest};

/// Output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Pretty-printed JSON array of frames
    Json,
    /// One line per frame
    Summary,
}

/// Scene Dump - Print the draw commands of the JetFyX scene
#[derive(Parser, Debug)]
#[command(name = "scene-dump")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seconds after mount of the first frame
    #[arg(short = 'e', long, default_value_t = 0.0, value_name = "SECS")]
    elapsed: f64,

    /// Viewport width in width-units
    #[arg(short = 'W', long, default_value_t = 1200)]
    width: u32,

    /// Viewport height in width-units
    #[arg(short = 'H', long, default_value_t = 800)]
    height: u32,

    /// Number of frames to capture
    #[arg(short = 'n', long, default_value_t = 1)]
    frames: u32,

    /// Seconds between captured frames
    #[arg(short = 's', long, default_value_t = 1.0, value_name = "SECS")]
    step: f64,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "JETFYX_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

/// Initialize logging with the specified level
///
/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("scene_dump={level},scene_core={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let request = DumpRequest {
        viewport: Viewport::new(args.width, args.height),
        start: args.elapsed,
        frames: args.frames,
        step: args.step,
    };
    info!(?request, "Capturing frames");

    let dumps = capture(&request)?;

    let output = match args.format {
        Format::Json => {
            serde_json::to_string_pretty(&dumps).context("Failed to serialize frames")? + "\n"
        }
        Format::Summary => summarize(&dumps),
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write to stdout")?;
    stdout.flush()?;

    Ok(())
}
