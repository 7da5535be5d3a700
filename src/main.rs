use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flashcard_viewer::{logger, narrator, ui, App, AppConfig};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "flashcard-viewer")]
#[command(version)]
#[command(about = "Cycle through question/answer flashcards from a CSV file or spreadsheet")]
struct Args {
    /// Question bank to open on startup (.csv, .xlsx, .xlsm, .xls, .ods)
    file: Option<PathBuf>,

    /// Do not read cards aloud
    #[arg(short, long)]
    mute: bool,

    /// Use this config file instead of the default one
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    let log_path = config.log_file.clone().unwrap_or_else(logger::default_log_path);
    logger::init(&log_path);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting flashcard viewer");

    let narrator = narrator::from_config(&config.speech, args.mute);
    let mut app = App::new(config, narrator);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if let Some(path) = &args.file {
        app.open(path);
    }

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("exiting with error: {}", e);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = app.config.tick_rate();

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        // The poll timeout doubles as the UI-refresh timer.
        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    app.handle_mouse(mouse, Rect::new(0, 0, size.width, size.height));
                }
                _ => {}
            }
        }
        app.tick();
    }

    tracing::info!("quitting");
    Ok(())
}
