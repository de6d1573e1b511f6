use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vibespec_service::{Assistant, ModelGateway};

use vibespec_tui::app::App;
use vibespec_tui::config::TuiConfig;

fn main() -> Result<()> {
    let config = TuiConfig::parse();

    // Logging to stderr would draw over the UI.
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let gateway_config = config.gateway_config();
    info!(mode = ?gateway_config.mode, endpoint = %gateway_config.endpoint, "starting vibespec");
    let app = App::new(
        Assistant::new(ModelGateway::new(gateway_config)),
        runtime.handle().clone(),
        config.output_dir.clone(),
    )?;

    run_tui(app)
}

fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e}");
    }

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        app.poll_results();
        terminal.draw(|frame| app.render(frame))?;

        // Poll with a timeout while model calls are outstanding so their
        // results are drawn without waiting for a key.
        if app.needs_polling() && !event::poll(Duration::from_millis(100))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            // Ctrl+C always quits
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            // q quits unless we're in an input mode
            if key.code == KeyCode::Char('q') && !app.is_input_mode() {
                break;
            }
            app.handle_key(key);
        }
    }

    Ok(())
}
