//! panectl-bridge entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, EnvFilter};

use panectl_bridge::cli::Cli;
use panectl_bridge::EditorBridge;

fn main() {
    // Load .env.local if it exists (PANECTL_BRIDGE_FILE etc.)
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

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return;
    };

    let bridge = EditorBridge::new(&cli.file);
    if let Err(e) = bridge.send(&command.to_bridge_command()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    println!("{}", command.summary());
}
