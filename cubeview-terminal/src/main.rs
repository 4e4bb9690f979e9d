/// Cubeview Terminal - colored cube with keyboard camera controls
///
/// Controls:
///   - T/L/F (and I in the ortho scheme): top, left, front, isometric views
///   - A/D: rotate the camera
///   - W/S: zoom in and out (ortho scheme)
///   - Q/ESC: quit
use anyhow::Context;
use clap::Parser;
use cubeview_core::{Scheme, ViewerConfig};
use cubeview_terminal::logging::{init_logging, LoggingConfig};
use cubeview_terminal::TerminalApp;

#[derive(Parser, Debug)]
#[command(name = "cubeview", version, about = "Keyboard-driven colored cube viewer")]
struct Args {
    /// Control scheme: "orbit" (yaw about Y) or "ortho" (roll and zoom)
    #[arg(long, default_value = "ortho")]
    scheme: Scheme,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Log filter in env_logger syntax; overrides RUST_LOG
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig {
        env_filter: args.log_filter,
        ..LoggingConfig::default()
    });

    let config = ViewerConfig::new(args.scheme, args.fps)?;
    let mut app = TerminalApp::new(config).context("failed to set up the terminal renderer")?;
    app.run()?;

    Ok(())
}
