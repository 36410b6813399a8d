//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, MEDITATION_TIPS};
use crate::catalog::{Catalog, CategoryFilter, Track, label_seconds};
use crate::config::{PlayerSettings, UiSettings};
use crate::playback::{PlaybackState, PlayerStatus};
use crate::transport::format_time;

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Render the controls help text, incorporating the configured steps.
fn controls_text(player: &PlayerSettings) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] seek -/+{}%", player.seek_step_percent),
        format!("[-/+] volume -/+{}", player.volume_step),
        "[c] category".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn status_label(state: &PlaybackState) -> &'static str {
    match state.status {
        PlayerStatus::Idle => "Idle",
        PlayerStatus::Loading if state.is_playing => "Buffering",
        PlayerStatus::Loading => "Loading",
        PlayerStatus::Playing => "Playing",
        PlayerStatus::Paused => "Paused",
        PlayerStatus::Errored => "Error",
    }
}

/// `elapsed / total`, falling back to the catalog label until the real
/// duration is known.
fn time_text(state: &PlaybackState) -> String {
    let total = if state.duration_secs > 0.0 {
        format_time(state.duration_secs)
    } else {
        state.current_track.duration_label.clone()
    };
    format!("{} / {}", format_time(state.current_time_secs), total)
}

fn categories_line(active: CategoryFilter) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, f) in CategoryFilter::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let label = format!(" {} ", f.label());
        if *f == active {
            spans.push(Span::styled(label, Style::default().add_modifier(Modifier::REVERSED)));
        } else {
            spans.push(Span::raw(label));
        }
    }
    Line::from(spans)
}

/// Total listening time of `view` from the catalog labels.
fn view_length(view: &[&Track]) -> String {
    let secs: u64 = view
        .iter()
        .filter_map(|t| label_seconds(&t.duration_label))
        .sum();
    format_time(secs as f64)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    catalog: &Catalog,
    state: &PlaybackState,
    ui_settings: &UiSettings,
    player_settings: &PlayerSettings,
    now: Instant,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" hush ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let view = app.visible(catalog);
    let categories = Paragraph::new(categories_line(app.filter)).block(
        Block::bordered().padding(LEFT_PAD).title(format!(
            " categories · {} tracks, {} ",
            view.len(),
            view_length(&view)
        )),
    );
    frame.render_widget(categories, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    // Track list
    {
        let items: Vec<ListItem> = view
            .iter()
            .map(|t| {
                let active = t.id == state.current_track.id;
                let marker = if active { "♪ " } else { "  " };
                let mut title = Span::raw(format!("{marker}{}", t.title));
                if active {
                    title = title.bold();
                }
                ListItem::new(vec![
                    Line::from(vec![title, Span::raw(format!("  {}", t.duration_label)).dim()]),
                    Line::from(format!("  {}", t.description)).dim(),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ratatui::widgets::ListState::default();
        list_state.select(app.selected_row(catalog));
        frame.render_stateful_widget(list, body[0], &mut list_state);
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if app.show_tips {
            [Constraint::Length(9), Constraint::Min(0)]
        } else {
            [Constraint::Min(9), Constraint::Length(0)]
        })
        .split(body[1]);

    // Player card
    {
        let card = Block::bordered()
            .padding(LEFT_PAD)
            .title(format!(" {} ", status_label(state)));
        let inner = card.inner(right[0]);
        frame.render_widget(card, right[0]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(state.current_track.title.as_str()).bold(), rows[0]);
        frame.render_widget(
            Paragraph::new(state.current_track.description.as_str())
                .dim()
                .wrap(Wrap { trim: true }),
            rows[1],
        );
        let gauge = Gauge::default()
            .ratio(state.progress_percent.clamp(0.0, 100.0) / 100.0)
            .label(time_text(state));
        frame.render_widget(gauge, rows[2]);
        frame.render_widget(
            Paragraph::new(format!("Volume: {}%", state.volume_percent)),
            rows[3],
        );
    }

    if app.show_tips {
        let tips: Vec<Line> = MEDITATION_TIPS
            .iter()
            .map(|tip| Line::from(format!("• {tip}")))
            .collect();
        let tips = Paragraph::new(tips)
            .block(Block::bordered().padding(LEFT_PAD).title(" meditation tips "))
            .wrap(Wrap { trim: true });
        frame.render_widget(tips, right[1]);
    }

    // Failure toast overlays the list so the card stays readable.
    if let Some(toast) = app.toast(now) {
        let area = centered_rect_sized(56, 6, body[0]);
        frame.render_widget(Clear, area);
        let popup = Paragraph::new(toast.message.as_str())
            .block(
                Block::bordered()
                    .padding(LEFT_PAD)
                    .title(format!(" {} ", toast.title))
                    .red(),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(popup, area);
    }

    let footer = Paragraph::new(controls_text(player_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::playback::Store;

    #[test]
    fn time_text_falls_back_to_the_catalog_label() {
        let track = Catalog::builtin().first().clone();
        let store = Store::new(track, 70);
        assert_eq!(time_text(store.state()), "0:00 / 10:00");
    }

    #[test]
    fn view_length_sums_catalog_labels() {
        let catalog = Catalog::builtin();
        let all: Vec<&Track> = catalog.tracks().iter().collect();
        let nature = catalog.filtered(CategoryFilter::Nature);
        let expected: u64 = nature
            .iter()
            .filter_map(|t| label_seconds(&t.duration_label))
            .sum();
        assert_eq!(view_length(&nature), format_time(expected as f64));
        assert_eq!(view_length(&[]), "0:00");
        assert_ne!(view_length(&all), "0:00");
    }

    #[test]
    fn controls_text_mentions_configured_steps() {
        let player = PlayerSettings {
            initial_volume: 70,
            volume_step: 10,
            seek_step_percent: 15,
        };
        let text = controls_text(&player);
        assert!(text.contains("seek -/+15%"));
        assert!(text.contains("volume -/+10"));
    }

    #[test]
    fn buffering_is_shown_while_a_switch_keeps_playing() {
        let mut store = Store::new(Catalog::builtin().first().clone(), 70);
        store.mark_playing();
        store.begin_track(Catalog::builtin().next_after(1).clone());
        assert_eq!(status_label(store.state()), "Buffering");
    }
}
