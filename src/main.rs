//! pawbook - Pet Adoption Terminal
//!
//! Browse the featured pets, fill in a four-step adoption application and
//! manage the resulting appointments, all from the terminal.

use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use pawbook::application::{App, AppMode};
use pawbook::domain::{AppointmentStore, StoragePort};
use pawbook::infrastructure::{setup_file_logger, AppConfig, FileStorage};
use pawbook::presentation::{render_ui, InputHandler};

/// Entry point for the pawbook terminal application.
///
/// Reads configuration from the environment, opens the data directory and
/// runs the main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if configuration, logging or stored data cannot be set
/// up, or if terminal setup fails.
fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    setup_file_logger(&config.log_file, config.log_level)?;
    info!("starting pawbook with data in {}", config.data_dir.display());

    let storage: Box<dyn StoragePort> = Box::new(FileStorage::new(config.data_dir.clone()));
    let mut store = AppointmentStore::new(storage, config.pet_seeding);
    store.initialize()?;
    let mut app = App::new(store, config.export_file.clone());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    info!("pawbook exited");
    Ok(())
}

/// Main application event loop.
///
/// Continues running until the user presses 'q' while browsing.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
