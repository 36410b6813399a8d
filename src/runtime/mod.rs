use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info, warn};

use crate::app::App;
use crate::catalog::Catalog;
use crate::engine::{PlaybackEngine, RodioOutput};
use crate::transport::{PlaybackFailure, TransportController};

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_problem) = settings::load_settings();

    match logging::configure_logging(&settings.logging) {
        Ok(path) => info!(log = %path.display(), "hush starting"),
        Err(e) => eprintln!("hush: logging disabled: {e}"),
    }
    if let Some(problem) = settings_problem {
        warn!("{problem}");
    }

    // A catalog path on the command line wins over the config.
    let catalog_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.catalog.path.clone());
    let catalog = match catalog_path {
        Some(path) => Catalog::load(&path).inspect_err(|e| error!("catalog: {e}"))?,
        None => Catalog::builtin(),
    };
    info!(tracks = catalog.len(), "catalog ready");
    for t in catalog.tracks() {
        debug!(track = t.id, source = %t.source, "{}", t.title);
    }

    let (output, events) =
        RodioOutput::spawn(&settings.audio).inspect_err(|e| error!("audio: {e}"))?;
    let engine = PlaybackEngine::new(output, events);

    let (failure_tx, failure_rx) = mpsc::channel::<PlaybackFailure>();
    let mut controller = TransportController::mount(
        catalog,
        engine,
        failure_tx,
        settings.player.initial_volume,
    );
    let mut app = App::new(
        controller.catalog(),
        settings.catalog.initial_category,
        settings.ui.show_tips,
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result =
        event_loop::run(&mut terminal, &settings, &mut app, &mut controller, &failure_rx);

    // Silence the audio before the terminal is handed back.
    controller.release();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("hush stopped");
    run_result
}
