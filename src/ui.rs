//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Pane};
use crate::cart::format_price;
use crate::config::{ControlsSettings, UiSettings};
use crate::player::{PlaybackSnapshot, PlayerState, format_time};

const PLAYED: char = '█';
const PREVIEW: char = '─';
const LOCKED: char = '░';

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[tab] switch pane".to_string(),
        "[enter] preview / add to cart".to_string(),
        "[space/p] play/pause".to_string(),
        format!("[H/L] scrub -/+{scrub_seconds}s"),
        "[+/-] volume".to_string(),
        "[m] mute".to_string(),
        "[x] stop preview".to_string(),
        "[s/c/v] size/color/variant".to_string(),
        "[</>] quantity".to_string(),
        "[d] remove line".to_string(),
        "[C] clear cart".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Draw the preview bar `width` cells wide: played part, rest of the
/// preview, then the locked remainder of the track.
fn preview_bar(snap: &PlaybackSnapshot, width: usize) -> String {
    if snap.full_duration.is_none() {
        return LOCKED.to_string().repeat(width);
    }
    let cells = |ratio: f64| (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;

    let preview_cells = cells(snap.preview_fraction);
    let played_cells = cells(snap.progress).min(preview_cells);

    let mut bar = String::with_capacity(width * 3);
    for i in 0..width {
        bar.push(if i < played_cells {
            PLAYED
        } else if i < preview_cells {
            PREVIEW
        } else {
            LOCKED
        });
    }
    bar
}

/// `0:12 / 1:00 preview (4:00 full)`, or `loading` before the duration is known.
fn preview_time_text(snap: &PlaybackSnapshot, show_locked: bool) -> String {
    match (snap.full_duration, snap.preview_cutoff) {
        (Some(full), Some(cutoff)) => {
            let mut text = format!(
                "{} / {} preview",
                format_time(snap.position),
                format_time(cutoff)
            );
            if show_locked {
                text.push_str(&format!(" ({} full)", format_time(full)));
            }
            text
        }
        _ => format!("{} / loading", format_time(snap.position)),
    }
}

fn volume_text(snap: &PlaybackSnapshot) -> String {
    if snap.muted {
        "VOL: muted".to_string()
    } else {
        format!("VOL: {:.0}%", snap.volume * 100.0)
    }
}

/// Lines of the now-playing box.
fn now_playing_lines(app: &App, ui: &UiSettings, bar_width: usize) -> Vec<String> {
    let Some(snap) = app.playback() else {
        return vec!["Player not attached".to_string()];
    };
    if let Some(fatal) = &snap.fatal {
        return vec![format!("Preview unavailable: {fatal}")];
    }

    let mut lines = Vec::new();
    match &snap.track {
        Some(track) => {
            let mut parts = vec![
                format!("Song: {}", track.display()),
                snap.state.label().to_string(),
                preview_time_text(&snap, ui.show_locked_duration),
                volume_text(&snap),
            ];
            if snap.autoplay_blocked {
                parts.push("press play to start".to_string());
            }
            if let PlayerState::Errored(err) = &snap.state {
                parts.push(err.to_string());
            }
            lines.push(parts.join(" • "));
            lines.push(preview_bar(&snap, bar_width));
        }
        None => lines.push(format!("Nothing previewing • {}", volume_text(&snap))),
    }
    lines
}

fn merch_detail_text(app: &App) -> Option<String> {
    let item = app.selected_merch()?;
    let opts = app.pending_options();
    let mut parts: Vec<String> = Vec::new();
    if let Some(v) = opts.variant {
        parts.push(format!("Variant: {v}"));
    }
    if let Some(s) = opts.size {
        parts.push(format!("Size: {s}"));
    }
    if let Some(c) = opts.color {
        parts.push(format!("Color: {c}"));
    }
    parts.push(format!("Qty: {}", app.selection.quantity));
    Some(format!("{} {} • {}", item.title, item.price, parts.join(" · ")))
}

/// `Total (3 items): $74.97`
pub fn cart_total_text(item_count: u64, total: f64, symbol: &str) -> String {
    let noun = if item_count == 1 { "item" } else { "items" };
    format!("Total ({item_count} {noun}): {}", format_price(total, symbol))
}

/// Pane title; the track list also names the directory it was scanned from.
fn pane_title(app: &App, pane: Pane) -> String {
    match (pane, &app.current_dir) {
        (Pane::Tracks, Some(dir)) => format!(" tracks: {dir} "),
        _ => pane.title().to_string(),
    }
}

fn pane_block(app: &App, pane: Pane, focused: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(pane_title(app, pane));
    if focused {
        block.border_style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        block
    }
}

/// Keep the selected row in the middle of a window of `height` rows.
fn visible_window(total: usize, selected: usize, height: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn render_list(frame: &mut Frame, area: Rect, rows: Vec<String>, selected: usize, block: Block) {
    let height = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_window(rows.len(), selected, height);
    let total = rows.len();

    let items: Vec<ListItem> = rows
        .into_iter()
        .skip(start)
        .take(end - start)
        .map(ListItem::new)
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected.saturating_sub(start)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings, controls_settings: &ControlsSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let summary = app.cart_summary();

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" musichub ")
                .title_alignment(Alignment::Center)
                .title_bottom(format!(" cart: {} ", summary.item_count)),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let bar_width = chunks[1].width.saturating_sub(4) as usize;
    let mut status_lines = now_playing_lines(app, ui_settings, bar_width);
    if app.pane == Pane::Merch {
        status_lines.extend(merch_detail_text(app));
    }
    if let Some(msg) = &app.status {
        status_lines.push(msg.clone());
    }
    let status_par = Paragraph::new(status_lines.join("\n"))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" preview "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Browsing list on the left, cart on the right.
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    let left_pane = if app.pane == Pane::Merch { Pane::Merch } else { Pane::Tracks };
    let (rows, selected) = match left_pane {
        Pane::Merch => (
            app.merch
                .iter()
                .map(|m| format!("{}  {}", m.title, m.price))
                .collect::<Vec<_>>(),
            app.merch_selected,
        ),
        _ => (
            app.tracks.iter().map(|t| t.display()).collect::<Vec<_>>(),
            app.track_selected,
        ),
    };
    render_list(frame, body[0], rows, selected, pane_block(app, left_pane, app.pane != Pane::Cart));

    let cart_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(body[1]);

    let cart_rows: Vec<String> = app
        .cart_lines()
        .iter()
        .map(|l| {
            let opts = l.options_label();
            let subtotal = format_price(l.subtotal(), &app.currency_symbol);
            if opts.is_empty() {
                format!("{} x{}  {}", l.title, l.quantity, subtotal)
            } else {
                format!("{} ({}) x{}  {}", l.title, opts, l.quantity, subtotal)
            }
        })
        .collect();
    if cart_rows.is_empty() {
        let empty = Paragraph::new("Your cart is empty").block(pane_block(app, Pane::Cart, app.pane == Pane::Cart));
        frame.render_widget(empty, cart_area[0]);
    } else {
        render_list(
            frame,
            cart_area[0],
            cart_rows,
            app.cart_selected,
            pane_block(app, Pane::Cart, app.pane == Pane::Cart),
        );
    }

    let total = Paragraph::new(cart_total_text(summary.item_count, summary.total, &app.currency_symbol))
        .bold()
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(total, cart_area[1]);

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartStore;

    fn snap(position: f64, full: Option<f64>, fraction: f64) -> PlaybackSnapshot {
        PlaybackSnapshot {
            position,
            full_duration: full,
            preview_cutoff: full.map(|f| f * fraction),
            preview_fraction: fraction,
            progress: full.map(|f| (position / f).min(fraction)).unwrap_or(0.0),
            volume: 1.0,
            ..PlaybackSnapshot::default()
        }
    }

    #[test]
    fn bar_shows_played_preview_and_locked_regions() {
        let bar = preview_bar(&snap(30.0, Some(240.0), 0.25), 16);
        assert_eq!(bar, "██──░░░░░░░░░░░░");
    }

    #[test]
    fn bar_is_all_locked_before_duration_is_known() {
        assert_eq!(preview_bar(&snap(3.0, None, 0.25), 4), "░░░░");
    }

    #[test]
    fn time_text_includes_full_length_when_asked() {
        let s = snap(12.0, Some(240.0), 0.25);
        assert_eq!(preview_time_text(&s, true), "0:12 / 1:00 preview (4:00 full)");
        assert_eq!(preview_time_text(&s, false), "0:12 / 1:00 preview");
        assert_eq!(preview_time_text(&snap(0.0, None, 0.25), true), "0:00 / loading");
    }

    #[test]
    fn volume_text_shows_mute() {
        let mut s = snap(0.0, None, 0.25);
        s.volume = 0.4;
        assert_eq!(volume_text(&s), "VOL: 40%");
        s.muted = true;
        assert_eq!(volume_text(&s), "VOL: muted");
    }

    #[test]
    fn cart_total_line() {
        assert_eq!(cart_total_text(3, 74.97, "$"), "Total (3 items): $74.97");
        assert_eq!(cart_total_text(1, 1234.5, "$"), "Total (1 item): $1,234.50");
        assert_eq!(cart_total_text(0, 0.0, "$"), "Total (0 items): $0.00");
    }

    #[test]
    fn track_pane_names_scanned_directory() {
        let mut app = App::new(Vec::new(), Vec::new(), CartStore::new().into_shared());
        assert_eq!(pane_title(&app, Pane::Tracks), " tracks ");

        app.set_current_dir("/home/me/Music".to_string());
        assert_eq!(pane_title(&app, Pane::Tracks), " tracks: /home/me/Music ");
        assert_eq!(pane_title(&app, Pane::Cart), " cart ");
    }

    #[test]
    fn controls_mention_scrub_seconds() {
        assert!(controls_text(7).contains("[H/L] scrub -/+7s"));
    }

    #[test]
    fn window_keeps_selection_centered() {
        assert_eq!(visible_window(5, 4, 10), (0, 5));
        assert_eq!(visible_window(100, 50, 10), (45, 55));
        assert_eq!(visible_window(100, 99, 10), (90, 100));
    }
}
