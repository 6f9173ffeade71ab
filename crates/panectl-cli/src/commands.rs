//! Action runner for the `panectl` binary.

use std::io::{self, Write};

use panectl_bridge::EditorBridge;
use panectl_tmux::{
    ControllerConfig, TmuxCommandRunner, TmuxController, TmuxExecutor, TmuxGateway, WaitStrategy,
};
use tracing::{info, warn};

use crate::cli::Cli;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Run the invocation described by `cli` against the real tmux server.
pub fn execute(cli: &Cli) -> Result<()> {
    let config = cli.controller_config(ControllerConfig::from_env());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        let gateway = TmuxGateway::new(TmuxExecutor::from_config(&config));
        if !gateway.is_available() {
            warn!(tmux = %config.tmux_bin, "tmux binary not found on PATH");
        }
        return list_sessions(&gateway, &mut out);
    }

    let session = cli.session.as_deref().ok_or("no session given")?;
    let mut controller = TmuxController::with_config(session, config);
    run_actions(cli, &mut controller, &EditorBridge::from_env(), &mut out)
}

/// Print the names of all sessions on the server.
pub fn list_sessions<R: TmuxCommandRunner>(
    gateway: &TmuxGateway<R>,
    out: &mut impl Write,
) -> Result<()> {
    let sessions = gateway.list_sessions();
    if sessions.is_empty() {
        writeln!(out, "No TMux sessions found")?;
        return Ok(());
    }

    writeln!(out, "Available TMux sessions:")?;
    for name in sessions {
        writeln!(out, "  - {}", name)?;
    }
    Ok(())
}

/// Apply each requested action to the controller's session in a fixed order.
///
/// A missing session is reported on `out` and nothing else runs.
pub fn run_actions<R, W>(
    cli: &Cli,
    controller: &mut TmuxController<R, W>,
    bridge: &EditorBridge,
    out: &mut impl Write,
) -> Result<()>
where
    R: TmuxCommandRunner,
    W: WaitStrategy,
{
    if !controller.session_exists() {
        writeln!(
            out,
            "Error: Session '{}' does not exist",
            controller.session_name()
        )?;
        return Ok(());
    }

    controller.select_pane(cli.window, cli.pane);
    info!(pane = %controller.target(), "controlling pane");

    if cli.info {
        match controller.pane_info() {
            Some(pane) => {
                writeln!(out, "Pane info:")?;
                for (key, value) in pane.fields() {
                    writeln!(out, "  {}: {}", key, value)?;
                }
            }
            None => writeln!(out, "Pane info unavailable")?,
        }
    }

    if cli.capture {
        writeln!(out, "{}", controller.capture_visible())?;
    }

    if let Some(lines) = cli.history {
        writeln!(out, "{}", controller.capture_history(lines))?;
    }

    // Gateway failures are silent, so these confirm the attempt only.
    if cli.interrupt {
        controller.send_ctrl_c();
        writeln!(out, "Sent Ctrl+C")?;
    }

    if cli.eof {
        controller.send_ctrl_d();
        writeln!(out, "Sent Ctrl+D")?;
    }

    if cli.clear && controller.clear_pane() {
        writeln!(out, "Cleared pane")?;
    }

    if let Some(script) = &cli.script {
        if controller.run_script(script) {
            writeln!(out, "Running script: {}", script)?;
        }
    }

    if let Some(command) = &cli.command {
        let result = controller.execute_and_capture(command, cli.wait_time(), None);
        writeln!(out, "Output:\n{}", result.output)?;
    }

    if cli.open_in_editor {
        bridge.open_tmux_terminal(controller.session_name(), true)?;
        writeln!(
            out,
            "Sent: Open TMux session '{}'",
            controller.session_name()
        )?;
    }

    Ok(())
}
