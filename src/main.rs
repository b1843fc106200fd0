use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;
use std::path::PathBuf;

use campus_search::app::App;
use campus_search::config::{self, Config, ConfigResult};
use campus_search::error::AppError;
use campus_search::form::SearchField;
use campus_search::suggest::{SuggestClient, spawn_worker};

/// Detailed college search with live autocomplete
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Detailed college search with live autocomplete from the campus backend"
)]
struct Args {
    /// Backend root URL (overrides [backend] base_url)
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token sent with suggestion requests (overrides [backend] token)
    #[arg(long)]
    token: Option<String>,

    /// Config file to use instead of ~/.config/campus-search/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Writes to /tmp/campus-search-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    init_debug_logger()?;

    color_eyre::install()?;

    let args = Args::parse();

    let config_result = match args.config {
        Some(ref path) => {
            if !path.exists() {
                return Err(AppError::ConfigNotFound(path.clone()).into());
            }
            config::load_config_from(path)
        }
        None => config::load_config(),
    };
    let config_result = ConfigResult {
        config: config_result
            .config
            .with_overrides(args.base_url, args.token),
        warning: config_result.warning,
    };

    let terminal = init_terminal()?;

    let app = App::new(&config_result.config);
    let result = run(terminal, app, config_result);

    restore_terminal()?;
    let app = result?;

    // Output after terminal restore to prevent corruption
    if let Some(criteria) = app.output() {
        println!("{}", criteria.to_json().map_err(AppError::from)?);
    }

    #[cfg(debug_assertions)]
    log::debug!("=== CAMPUS-SEARCH DEBUG SESSION ENDED ===");

    Ok(())
}

#[cfg(debug_assertions)]
fn init_debug_logger() -> Result<()> {
    use std::io::Write;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/campus-search-debug.log")?;

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format(|buf, record| {
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    log::debug!("=== CAMPUS-SEARCH DEBUG SESSION STARTED ===");
    Ok(())
}

/// Initialize terminal with raw mode, alternate screen, and bracketed paste
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    if let Err(e) = execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App, config_result: ConfigResult) -> Result<App> {
    if let Some(warning) = config_result.warning {
        app.status = Some(warning);
    }

    setup_suggest_workers(&mut app, &config_result.config);

    loop {
        if app.should_render() {
            terminal.draw(|frame| app.render(frame))?;
            app.clear_dirty();
        }

        app.handle_events()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(app)
}

/// Set up one suggestion worker thread and channel pair per field
fn setup_suggest_workers(app: &mut App, config: &Config) {
    for field in SearchField::ALL {
        let client = SuggestClient::from_config(&config.backend, field.endpoint(&config.endpoints));
        if let Err(ref e) = client {
            log::error!("{} suggestions unavailable: {}", field.label(), e);
            app.status.get_or_insert_with(|| e.to_string());
        }

        let (request_tx, request_rx) = std::sync::mpsc::channel();
        let (response_tx, response_rx) = std::sync::mpsc::channel();
        app.field_mut(field)
            .suggest
            .set_channels(request_tx, response_rx);

        // Worker still runs without a client so failures surface per request
        spawn_worker(client, request_rx, response_tx);
    }
}
