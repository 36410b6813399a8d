use std::time::{Duration, Instant};

use crate::catalog::{Catalog, CategoryFilter, Track};
use crate::transport::PlaybackFailure;

/// Shown under the player card when enabled.
pub const MEDITATION_TIPS: [&str; 4] = [
    "Find a quiet place free from distractions",
    "Sit or lie down in a comfortable position",
    "Focus on your breathing as you listen",
    "If your mind wanders, gently bring it back to the present",
];

/// A transient message with an expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    expires_at: Instant,
}

/// The terminal view model.
#[derive(Debug)]
pub struct App {
    pub filter: CategoryFilter,
    /// Track id under the cursor, `None` when the filtered view is empty.
    pub selected: Option<u32>,
    /// Whether the cursor jumps to the current track when playback moves on.
    pub follow_playback: bool,
    pub show_tips: bool,
    toast: Option<Toast>,
}

impl App {
    pub fn new(catalog: &Catalog, filter: CategoryFilter, show_tips: bool) -> Self {
        let mut app = Self {
            filter,
            selected: None,
            follow_playback: true,
            show_tips,
            toast: None,
        };
        app.ensure_selected_visible(catalog);
        app
    }

    /// Tracks in the active category, in catalog order.
    pub fn visible<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Track> {
        catalog.filtered(self.filter)
    }

    pub fn selected_track<'a>(&self, catalog: &'a Catalog) -> Option<&'a Track> {
        self.selected.and_then(|id| catalog.get(id))
    }

    /// Row of the cursor in the filtered view.
    pub fn selected_row(&self, catalog: &Catalog) -> Option<usize> {
        let id = self.selected?;
        self.visible(catalog).iter().position(|t| t.id == id)
    }

    /// Move the cursor to `id` if it is part of the current view.
    pub fn set_selected(&mut self, id: u32, catalog: &Catalog) {
        if self.visible(catalog).iter().any(|t| t.id == id) {
            self.selected = Some(id);
        }
    }

    /// Move selection to the next visible track, wrapping to the first.
    pub fn next(&mut self, catalog: &Catalog) {
        let view = self.visible(catalog);
        if view.is_empty() {
            return;
        }
        let pos = self.selected.and_then(|id| view.iter().position(|t| t.id == id));
        let next = match pos {
            Some(p) => view[(p + 1) % view.len()],
            None => view[0],
        };
        self.selected = Some(next.id);
    }

    /// Move selection to the previous visible track, wrapping to the last.
    pub fn prev(&mut self, catalog: &Catalog) {
        let view = self.visible(catalog);
        let Some(last) = view.last() else {
            return;
        };
        let pos = self.selected.and_then(|id| view.iter().position(|t| t.id == id));
        let prev = match pos {
            Some(0) | None => *last,
            Some(p) => view[p - 1],
        };
        self.selected = Some(prev.id);
    }

    /// Switch to the next category and keep the cursor inside it.
    pub fn cycle_filter(&mut self, catalog: &Catalog) {
        self.filter = self.filter.next();
        self.ensure_selected_visible(catalog);
    }

    /// Keep the cursor on the playing track while following is on.
    pub fn follow(&mut self, current_id: u32, catalog: &Catalog) {
        if self.follow_playback {
            self.set_selected(current_id, catalog);
        }
    }

    pub fn show_failure(
        &mut self,
        failure: &PlaybackFailure,
        catalog: &Catalog,
        now: Instant,
        ttl: Duration,
    ) {
        let title = catalog
            .get(failure.track_id)
            .map(|t| t.title.as_str())
            .unwrap_or("this track");
        self.toast = Some(Toast {
            title: "Playback Error".to_string(),
            message: format!(
                "There was an error playing {title} ({}). Please try again.",
                failure.reason
            ),
            expires_at: now + ttl,
        });
    }

    /// The toast if it has not expired by `now`.
    pub fn toast(&self, now: Instant) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| now < t.expires_at)
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast(now).is_none() {
            self.toast = None;
        }
    }

    fn ensure_selected_visible(&mut self, catalog: &Catalog) {
        let view = self.visible(catalog);
        let visible = self
            .selected
            .is_some_and(|id| view.iter().any(|t| t.id == id));
        if !visible {
            self.selected = view.first().map(|t| t.id);
        }
    }
}
