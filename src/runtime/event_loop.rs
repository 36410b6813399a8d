use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::App;
use crate::config;
use crate::engine::AudioOutput;
use crate::transport::{FailureNotifier, PlaybackFailure, TransportController};
use crate::ui;

/// Main terminal event loop: applies engine notifications, surfaces
/// failures, draws and handles input. Returns `Ok(())` when quit is requested.
pub fn run<O: AudioOutput, N: FailureNotifier>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut TransportController<O, N>,
    failures: &Receiver<PlaybackFailure>,
) -> Result<(), Box<dyn std::error::Error>> {
    let toast_ttl = Duration::from_secs(settings.ui.toast_secs);
    let mut last_track = controller.state().current_track.id;

    loop {
        controller.pump();

        let now = Instant::now();
        while let Ok(failure) = failures.try_recv() {
            app.show_failure(&failure, controller.catalog(), now, toast_ttl);
        }
        app.expire_toast(now);

        // Auto-advance moves the cursor along with playback.
        let current = controller.state().current_track.id;
        if current != last_track {
            app.follow(current, controller.catalog());
            last_track = current;
        }

        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                controller.catalog(),
                controller.state(),
                &settings.ui,
                &settings.player,
                now,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, controller) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the player should quit.
fn handle_key_event<O: AudioOutput, N: FailureNotifier>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut TransportController<O, N>,
) -> bool {
    let player = &settings.player;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') => {
            app.follow_playback = false;
            app.next(controller.catalog());
        }
        KeyCode::Char('k') => {
            app.follow_playback = false;
            app.prev(controller.catalog());
        }
        KeyCode::Enter => {
            if let Some(track) = app.selected_track(controller.catalog()).cloned() {
                app.follow_playback = true;
                controller.select_track(&track);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => controller.toggle_play_pause(),
        KeyCode::Char('l') => {
            app.follow_playback = true;
            controller.next_track();
        }
        KeyCode::Char('h') => {
            app.follow_playback = true;
            controller.previous_track();
        }
        KeyCode::Char('L') => {
            let target = controller.state().progress_percent + f64::from(player.seek_step_percent);
            controller.seek(target);
        }
        KeyCode::Char('H') => {
            let target = controller.state().progress_percent - f64::from(player.seek_step_percent);
            controller.seek(target);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let volume = i32::from(controller.state().volume_percent) + i32::from(player.volume_step);
            controller.set_volume(volume);
        }
        KeyCode::Char('-') => {
            let volume = i32::from(controller.state().volume_percent) - i32::from(player.volume_step);
            controller.set_volume(volume);
        }
        KeyCode::Char('c') => app.cycle_filter(controller.catalog()),
        other => debug!(?other, "unbound key"),
    }

    false
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Sender};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::handle_key_event;
    use crate::app::App;
    use crate::catalog::{Catalog, CategoryFilter};
    use crate::config::Settings;
    use crate::engine::fake::{Call, CallLog, FakeOutput, fake_engine};
    use crate::transport::{PlaybackFailure, TransportController};

    type Controller = TransportController<FakeOutput, Sender<PlaybackFailure>>;

    fn setup() -> (Settings, App, Controller, CallLog) {
        let settings = Settings::default();
        let (engine, log, _emit) = fake_engine();
        let (tx, _rx) = mpsc::channel();
        let controller = TransportController::mount(Catalog::builtin(), engine, tx, 70);
        let app = App::new(controller.catalog(), CategoryFilter::All, true);
        (settings, app, controller, log)
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn q_requests_quit() {
        let (settings, mut app, mut ctl, _log) = setup();
        assert!(handle_key_event(press('q'), &settings, &mut app, &mut ctl));
        assert!(!handle_key_event(press('j'), &settings, &mut app, &mut ctl));
    }

    #[test]
    fn enter_plays_the_track_under_the_cursor() {
        let (settings, mut app, mut ctl, log) = setup();
        handle_key_event(press('j'), &settings, &mut app, &mut ctl);
        handle_key_event(press('j'), &settings, &mut app, &mut ctl);
        assert!(!app.follow_playback);

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        handle_key_event(enter, &settings, &mut app, &mut ctl);
        assert_eq!(ctl.state().current_track.id, 3);
        assert!(app.follow_playback);
        assert_eq!(log.calls().last(), Some(&Call::Play(ctl.state().generation)));
    }

    #[test]
    fn volume_keys_step_and_clamp() {
        let (settings, mut app, mut ctl, _log) = setup();
        handle_key_event(press('+'), &settings, &mut app, &mut ctl);
        assert_eq!(ctl.state().volume_percent, 75);
        for _ in 0..10 {
            handle_key_event(press('+'), &settings, &mut app, &mut ctl);
        }
        assert_eq!(ctl.state().volume_percent, 100);
        handle_key_event(press('-'), &settings, &mut app, &mut ctl);
        assert_eq!(ctl.state().volume_percent, 95);
    }

    #[test]
    fn h_and_l_wrap_through_the_catalog() {
        let (settings, mut app, mut ctl, _log) = setup();
        handle_key_event(press('h'), &settings, &mut app, &mut ctl);
        assert_eq!(ctl.state().current_track.id, 8);
        handle_key_event(press('l'), &settings, &mut app, &mut ctl);
        assert_eq!(ctl.state().current_track.id, 1);
    }

    #[test]
    fn c_cycles_the_category() {
        let (settings, mut app, mut ctl, _log) = setup();
        handle_key_event(press('c'), &settings, &mut app, &mut ctl);
        assert_eq!(app.filter, CategoryFilter::Meditation);
    }
}
