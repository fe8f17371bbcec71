//! JetFyX Terminal Hero Entry Point
//!
//! Runs the global trading scene full-screen with the hero copy on top.
//!
//! Usage:
//!   jetfyx-tui [OPTIONS]
//!
//! Options:
//!   --fps <N>            Frames per second (default: 60)
//!   --cell-width <PX>    Width-units per column (default: 8)
//!   --cell-height <PX>   Width-units per row (default: 16)
//!   --no-copy            Show the scene only
//!   --config <FILE>      Config file (default: ~/.config/jetfyx/scene.toml)
//!
//! Quit with `q`, `Esc` or `Ctrl-C`. Logs go to stderr and only when
//! `RUST_LOG` is set.

use std::io;
use std::panic;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jetfyx_tui::App;
use scene_core::{default_config_path, load_config_from_path, ConfigOverrides};

/// JetFyX terminal hero - the global trading scene behind the pitch
#[derive(Parser, Debug)]
#[command(name = "jetfyx-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Frames per second
    #[arg(long, value_name = "N")]
    fps: Option<u32>,

    /// Width-units covered by one terminal column
    #[arg(long, value_name = "PX")]
    cell_width: Option<u32>,

    /// Width-units covered by one terminal row
    #[arg(long, value_name = "PX")]
    cell_height: Option<u32>,

    /// Hide the hero copy and show the scene only
    #[arg(long)]
    no_copy: bool,

    /// Configuration file path
    #[arg(short = 'c', long, env = "JETFYX_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            target_fps: self.fps,
            cell_width_px: self.cell_width,
            cell_height_px: self.cell_height,
            show_copy: self.no_copy.then_some(false),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout belongs to the alternate screen
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    let mut config = load_config_from_path(args.config.clone().or_else(default_config_path))
        .context("Failed to load configuration")?;
    args.overrides()
        .apply(&mut config)
        .context("Invalid command-line option")?;
    tracing::info!(
        source = %config.source(),
        fps = config.target_fps,
        cell_width = config.cell_width_px,
        cell_height = config.cell_height_px,
        "Configuration loaded"
    );

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: jetfyx-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("Run it interactively, or use `scene-dump` for headless output.");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let size = crossterm::terminal::size()?;
    let mut app = App::new(size, config);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}
