//! panectl entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use panectl_cli::cli::Cli;
use panectl_cli::commands;

fn main() {
    // Load .env.local if it exists (PANECTL_SESSION, PANECTL_TMUX_* etc.)
    let _ = dotenvy::from_filename(".env.local");
    if let Some(env_file) = dirs::config_dir().map(|d| d.join("panectl").join(".env")) {
        let _ = dotenvy::from_path(env_file);
    }

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = commands::execute(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
