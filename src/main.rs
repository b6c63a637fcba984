// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

mod app;
mod config;
mod data;
mod events;
mod grid;
mod input;
mod logging;
mod source;
mod theme;
mod ui;

use app::App;
use config::Settings;
use data::{sample_users, User};
use source::{ChannelSource, FileSource, RowSource};
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "gridfield-demo")]
#[command(about = "Interactive user browser built on the gridfield widgets")]
struct Args {
    /// Path to a JSON file with user rows (watched for changes)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Simulated network delay before the sample rows arrive (e.g. "800ms", "2s")
    #[arg(long)]
    delay: Option<String>,

    /// Color theme: dark, light or auto
    #[arg(short, long)]
    theme: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Event poll interval (e.g. "100ms")
    #[arg(long)]
    tick_rate: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Config file and environment first, CLI flags win
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(data) = args.data {
        settings.data = Some(data);
    }
    if let Some(delay) = args.delay {
        settings.delay = delay;
    }
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }
    if let Some(tick_rate) = args.tick_rate {
        settings.tick_rate = tick_rate;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }

    if let Some(log_path) = &settings.log_file {
        logging::init(log_path)?;
    }

    let theme = settings.theme();
    let tick_rate = settings.tick_rate()?;

    // Row source: a watched file when --data is given, otherwise the bundled
    // sample rows delivered after a simulated network delay.
    let source: Box<dyn RowSource<User>> = match &settings.data {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(ChannelSource::delayed(
            sample_users(),
            settings.delay()?,
            "sample data",
        )),
    };

    tracing::info!(tick_rate = ?tick_rate, "starting gridfield demo");
    run_tui(source, theme, tick_rate)
}

/// Run the TUI with the given row source
fn run_tui(source: Box<dyn RowSource<User>>, theme: Theme, tick_rate: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and poll once so a pre-seeded source shows rows immediately
    let mut app = App::new(source, theme);
    let _ = app.reload_rows();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(event) = events::poll_event(tick_rate)? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Sources detect changes themselves, so polling every pass is cheap
        let _ = app.reload_rows();
    }

    Ok(())
}
