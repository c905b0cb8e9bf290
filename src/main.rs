mod config;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use logdeck_client::{ANALYSIS_PROMPT, AnalyseClient, IngestForm, LogEntry};
use logdeck_tui::{
    Action, AppState, ContextMenuPopup, Event, EventHandler, HelpOverlay, KeyBindings,
    KeyContext, LogViewerScreen, Request, RequestKind, SystemClipboard, Tui, handle_action,
    mouse_action,
};

use crate::config::Config;

/// logdeck - ingest, filter and inspect analysed logs in the terminal
#[derive(Parser, Debug)]
#[command(name = "logdeck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log file to ingest on startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Analysis backend base URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    backend_url: Option<String>,

    /// Config file (default: <config dir>/logdeck/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write diagnostics here instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.log_file.as_deref())?;

    // Run the application
    let result = run_app(args).await;

    // Handle any errors
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("could not create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

/// Outcome of a spawned backend request
struct RequestDone {
    kind: RequestKind,
    result: Result<Vec<LogEntry>, String>,
}

async fn run_app(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let backend_url = args.backend_url.unwrap_or_else(|| config.backend_url.clone());
    let client = AnalyseClient::new(&backend_url, config.request_timeout())
        .context("could not create HTTP client")?;
    debug!(endpoint = client.endpoint(), "backend configured");

    // Create channels
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<RequestDone>();

    // Initialize state
    let mut state = AppState::new(backend_url);
    let mut clipboard = SystemClipboard::new();
    let keybindings = KeyBindings::new();

    // A file on the command line is submitted straight away
    if let Some(file) = &args.file {
        state.ingest = IngestForm::with_file(file.to_string_lossy());
        let _ = action_tx.send(Action::Submit);
    }

    // Initialize TUI
    let mut tui = Tui::new().context("could not initialise terminal")?;

    // Initialize event handler
    let mut events = EventHandler::new(config.tick_rate());

    // Initial render
    render(&mut tui, &mut state)?;

    // Main event loop
    loop {
        tokio::select! {
            // Handle terminal events
            Some(event) = events.next() => {
                match event {
                    Event::Key(key) => {
                        if let Some(action) = keybindings.dispatch(&state, &key) {
                            let _ = action_tx.send(action);
                        }
                    }
                    Event::Mouse(mouse) => {
                        if let Some(action) = mouse_action(&state, mouse) {
                            let _ = action_tx.send(action);
                        }
                    }
                    Event::Paste(text) => {
                        for action in paste_actions(&state, text) {
                            let _ = action_tx.send(action);
                        }
                    }
                    Event::Tick => {
                        // Just trigger a render
                    }
                    Event::Resize(_, _) => {
                        let _ = action_tx.send(Action::Render);
                    }
                    Event::Error(e) => {
                        warn!(error = %e, "terminal input error");
                        state.show_notice(e);
                    }
                }
            }

            // Handle user actions
            Some(action) = action_rx.recv() => {
                if let Some(request) = handle_action(&mut state, &mut clipboard, action) {
                    spawn_request(&client, request, done_tx.clone());
                }
            }

            // Handle finished requests
            Some(done) = done_rx.recv() => {
                state.finish_request(done.kind, done.result);
            }
        }

        if state.should_quit {
            break;
        }

        render(&mut tui, &mut state)?;
    }

    // Cleanup
    events.shutdown();
    tui.restore()?;

    Ok(())
}

/// Route pasted text to whichever input has focus
fn paste_actions(state: &AppState, text: String) -> Vec<Action> {
    match KeyContext::for_state(state) {
        KeyContext::IngestInput => vec![Action::IngestPaste(text)],
        KeyContext::SearchInput => text
            .chars()
            .filter(|c| !c.is_control())
            .map(Action::SearchInput)
            .collect(),
        _ => Vec::new(),
    }
}

/// Run a backend request off the event loop and report back when done
fn spawn_request(
    client: &AnalyseClient,
    request: Request,
    done_tx: mpsc::UnboundedSender<RequestDone>,
) {
    let client = client.clone();

    tokio::spawn(async move {
        let (kind, result) = match request {
            Request::Ingest(payload) => (RequestKind::Ingest, client.ingest(payload).await),
            Request::AnalyseSelected(logs) => (
                RequestKind::AnalyseSelected,
                client.analyse_selected(&logs, ANALYSIS_PROMPT).await,
            ),
        };

        let result = result.map_err(|e| {
            warn!(error = %e, ?kind, "request failed");
            e.to_string()
        });
        let _ = done_tx.send(RequestDone { kind, result });
    });
}

fn render(tui: &mut Tui, state: &mut AppState) -> Result<()> {
    tui.terminal().draw(|frame| {
        LogViewerScreen::render(frame, state);

        // Render context menu overlay if open
        ContextMenuPopup::render(frame, state);

        // Render help overlay if visible
        if state.ui_state.help_visible {
            HelpOverlay::render(frame);
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_file_and_overrides() {
        let args = Args::parse_from([
            "logdeck",
            "app.log",
            "--backend-url",
            "http://analysis:8080",
            "--log-file",
            "/tmp/logdeck.log",
        ]);

        assert_eq!(args.file, Some(PathBuf::from("app.log")));
        assert_eq!(args.backend_url.as_deref(), Some("http://analysis:8080"));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/logdeck.log")));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_paste_goes_to_focused_input() {
        let mut state = AppState::new("http://backend");
        assert_eq!(
            paste_actions(&state, "a\nb".to_string()),
            vec![Action::IngestPaste("a\nb".to_string())]
        );

        state.ui_state.ingest_open = false;
        state.ui_state.search_active = true;
        assert_eq!(
            paste_actions(&state, "ab\n".to_string()),
            vec![Action::SearchInput('a'), Action::SearchInput('b')]
        );

        state.ui_state.search_active = false;
        assert!(paste_actions(&state, "ab".to_string()).is_empty());
    }
}
