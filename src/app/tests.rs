use std::time::{Duration, Instant};

use super::*;
use crate::catalog::{Catalog, CategoryFilter};
use crate::transport::PlaybackFailure;

#[test]
fn new_selects_first_visible_track() {
    let catalog = Catalog::builtin();
    let app = App::new(&catalog, CategoryFilter::All, true);
    assert_eq!(app.selected, Some(1));

    let app = App::new(&catalog, CategoryFilter::Nature, true);
    assert_eq!(app.selected, Some(3));
    assert_eq!(app.selected_row(&catalog), Some(0));
}

#[test]
fn cursor_wraps_within_the_filtered_view() {
    let catalog = Catalog::builtin();
    let mut app = App::new(&catalog, CategoryFilter::Nature, true);

    app.prev(&catalog);
    assert_eq!(app.selected, Some(7));
    app.next(&catalog);
    assert_eq!(app.selected, Some(3));
    app.next(&catalog);
    assert_eq!(app.selected, Some(4));
}

#[test]
fn cycling_the_filter_moves_the_cursor_into_view() {
    let catalog = Catalog::builtin();
    let mut app = App::new(&catalog, CategoryFilter::All, true);
    app.set_selected(2, &catalog);

    app.cycle_filter(&catalog);
    assert_eq!(app.filter, CategoryFilter::Meditation);
    assert_eq!(app.selected, Some(2));

    app.cycle_filter(&catalog);
    assert_eq!(app.filter, CategoryFilter::Nature);
    assert_eq!(app.selected, Some(3));
}

#[test]
fn set_selected_ignores_tracks_outside_the_view() {
    let catalog = Catalog::builtin();
    let mut app = App::new(&catalog, CategoryFilter::Music, true);
    let before = app.selected;
    app.set_selected(1, &catalog);
    assert_eq!(app.selected, before);
}

#[test]
fn follow_only_moves_the_cursor_while_enabled() {
    let catalog = Catalog::builtin();
    let mut app = App::new(&catalog, CategoryFilter::All, true);
    app.follow(4, &catalog);
    assert_eq!(app.selected, Some(4));

    app.follow_playback = false;
    app.follow(5, &catalog);
    assert_eq!(app.selected, Some(4));
}

#[test]
fn failure_toast_expires() {
    let catalog = Catalog::builtin();
    let mut app = App::new(&catalog, CategoryFilter::All, true);
    let now = Instant::now();
    let failure = PlaybackFailure {
        track_id: 2,
        reason: "connection refused".to_string(),
    };

    app.show_failure(&failure, &catalog, now, Duration::from_secs(4));
    let toast = app.toast(now).expect("toast visible");
    assert_eq!(toast.title, "Playback Error");
    assert!(toast.message.contains(&catalog.get(2).expect("track 2").title));
    assert!(toast.message.contains("connection refused"));

    let later = now + Duration::from_secs(5);
    assert!(app.toast(later).is_none());
    app.expire_toast(later);
    assert!(app.toast(now).is_none());
}
