mod cli;
mod config;
mod core;
mod error;
mod tui;

use crate::cli::{Cli, Commands, ModeArg};
use crate::config::Config;
use crate::core::{AnalyzeOutcome, Mode, SessionController, SessionSnapshot, compose_command};
use crate::error::{Error, Result};
use crate::tui::{
    App, EventHandler, init as tui_init, install_panic_hook, restore as tui_restore, ui,
};
use clap::Parser;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.wants_tui() && !cli.cli);

    let config = cli.config();

    match cli.command {
        Some(Commands::Command { url }) => {
            write_command(&mut io::stdout().lock(), url.as_deref())?;
        }
        Some(Commands::Analyze { url, mode, json }) => {
            run_cli_analyze(config, url, mode, json).await?;
        }
        Some(Commands::Tui) | None => {
            if cli.cli {
                println!("Use 'bilidown --help' for available commands");
            } else {
                run_tui(config).await?;
            }
        }
    }

    Ok(())
}

/// Logs go to stderr; the TUI owns the screen so it stays silent unless `RUST_LOG` says otherwise.
fn init_logging(tui: bool) {
    let default_filter = if tui { "off" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run_cli_analyze(
    config: Config,
    url: String,
    mode: Option<ModeArg>,
    json: bool,
) -> Result<()> {
    if !json && !url.is_empty() {
        println!("Analyzing {url}...");
    }

    let snapshot = analyze_headless(config, &url, mode.map(Mode::from)).await?;
    write_report(&mut io::stdout().lock(), &snapshot, json)
}

/// Run one analysis to completion and optionally switch modes afterwards.
async fn analyze_headless(
    config: Config,
    url: &str,
    mode: Option<Mode>,
) -> Result<SessionSnapshot> {
    let mut controller = SessionController::new(config);

    let outcome = controller.request_analysis(url);
    if !outcome.is_started() {
        return Err(match outcome {
            AnalyzeOutcome::IgnoredEmpty => Error::custom("Link cannot be empty"),
            other => Error::custom(format!("Analysis not started: {other:?}")),
        });
    }

    let state = controller
        .wait_for_analysis()
        .await
        .ok_or_else(|| Error::custom("Analysis finished without a result"))?;
    info!(%state, "analysis finished");

    if let Some(mode) = mode {
        controller.select_mode(mode);
    }

    Ok(controller.snapshot())
}

fn write_report(out: &mut impl Write, snapshot: &SessionSnapshot, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(snapshot)?)?;
        return Ok(());
    }

    writeln!(out, "State:   {}", snapshot.state)?;
    writeln!(out, "Command: {}", snapshot.command)?;
    Ok(())
}

fn write_command(out: &mut impl Write, url: Option<&str>) -> Result<()> {
    writeln!(out, "{}", compose_command(url.unwrap_or_default()))?;
    Ok(())
}

async fn run_tui(config: Config) -> Result<()> {
    install_panic_hook();
    let mut terminal = tui_init()?;

    let mut app = App::new(config);
    let event_handler = EventHandler::default();

    let result = loop {
        if let Err(e) = terminal.draw(|f| ui::draw(f, &mut app)) {
            break Err(Error::from(e));
        }

        let event = match event_handler.next_event() {
            Ok(event) => event,
            Err(e) => break Err(e),
        };
        if let Err(e) = app.handle_event(event) {
            break Err(e);
        }

        if app.should_quit {
            break Ok(());
        }
    };

    tui_restore()?;
    result
}

#[cfg(test)]
mod tests {
    use super::{analyze_headless, write_command, write_report};
    use crate::config::Config;
    use crate::core::Mode;
    use std::time::Duration;

    fn config() -> Config {
        Config::default().with_analyze_delay(Duration::from_millis(1500))
    }

    fn render(snapshot: &crate::core::SessionSnapshot, json: bool) -> String {
        let mut out = Vec::new();
        write_report(&mut out, snapshot, json).expect("report written");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[tokio::test(start_paused = true)]
    async fn analyze_rejects_empty_link() {
        let err = analyze_headless(config(), "", Some(Mode::Tutorial))
            .await
            .expect_err("empty link is an error");
        assert_eq!(err.to_string(), "Link cannot be empty");
    }

    #[tokio::test(start_paused = true)]
    async fn analyze_json_carries_requested_mode() {
        let snapshot = analyze_headless(config(), "BV1xx411c7mD", Some(Mode::Tutorial))
            .await
            .expect("analysis completes");

        let json: serde_json::Value =
            serde_json::from_str(&render(&snapshot, true)).expect("valid json");
        assert_eq!(json["mode"], "tutorial");
        assert_eq!(json["analyzing"], false);
        assert_eq!(json["url"], "BV1xx411c7mD");
    }

    #[tokio::test(start_paused = true)]
    async fn analyze_text_report_lists_state_and_command() {
        let snapshot = analyze_headless(config(), "av123", None)
            .await
            .expect("analysis completes");

        assert_eq!(
            render(&snapshot, false),
            "State:   download\nCommand: BBDown av123 --video-only --audio-only\n"
        );
    }

    #[test]
    fn command_without_link_prints_placeholder() {
        let mut out = Vec::new();
        write_command(&mut out, None).expect("written");
        assert_eq!(out, b"BBDown VIDEO_URL --video-only --audio-only\n");

        let mut out = Vec::new();
        write_command(&mut out, Some("https://b23.tv/xyz")).expect("written");
        assert_eq!(out, b"BBDown https://b23.tv/xyz --video-only --audio-only\n");
    }
}
