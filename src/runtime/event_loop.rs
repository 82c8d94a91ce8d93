use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Pane};
use crate::config;
use crate::player::{AudioPlayer, PlayerCmd};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: draws, then handles at most one key press per
/// 50ms poll. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::default();
    let mut send = |cmd: PlayerCmd| {
        // A dead player thread already reported itself through the snapshot.
        let _ = audio_player.send(cmd);
    };

    loop {
        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, &mut send, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Player commands go out through `send`.
/// Returns `true` when the app should quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    send: &mut impl FnMut(PlayerCmd),
    state: &mut EventLoopState,
) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    let scrub = settings.controls.scrub_seconds as f64;
    let volume_step = settings.controls.volume_step;

    match key.code {
        KeyCode::Char('q') => {
            send(PlayerCmd::Close);
            return true;
        }
        KeyCode::Esc => app.clear_status(),
        KeyCode::Tab => app.cycle_pane(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Enter => match app.pane {
            Pane::Tracks => {
                if let Some(track) = app.selected_track().cloned() {
                    app.clear_status();
                    send(PlayerCmd::Load(track));
                }
            }
            Pane::Merch => {
                app.add_selected_to_cart();
            }
            Pane::Cart => {}
        },
        KeyCode::Char(' ') | KeyCode::Char('p') => send(PlayerCmd::TogglePlay),
        KeyCode::Char('L') => send(PlayerCmd::SeekBy(scrub)),
        KeyCode::Char('H') => send(PlayerCmd::SeekBy(-scrub)),
        KeyCode::Char('+') | KeyCode::Char('=') => send(PlayerCmd::AdjustVolume(volume_step)),
        KeyCode::Char('-') => send(PlayerCmd::AdjustVolume(-volume_step)),
        KeyCode::Char('m') => send(PlayerCmd::ToggleMute),
        KeyCode::Char('x') => send(PlayerCmd::Close),
        KeyCode::Char('s') if app.pane == Pane::Merch => app.cycle_size(),
        KeyCode::Char('c') if app.pane == Pane::Merch => app.cycle_color(),
        KeyCode::Char('v') if app.pane == Pane::Merch => app.cycle_variant(),
        KeyCode::Char('>') => match app.pane {
            Pane::Merch => app.increase_quantity(),
            Pane::Cart => app.adjust_selected_line(1),
            Pane::Tracks => {}
        },
        KeyCode::Char('<') => match app.pane {
            Pane::Merch => app.decrease_quantity(),
            Pane::Cart => app.adjust_selected_line(-1),
            Pane::Tracks => {}
        },
        KeyCode::Char('d') | KeyCode::Delete if app.pane == Pane::Cart => app.remove_selected_line(),
        KeyCode::Char('C') => app.clear_cart(),
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartStore;
    use crate::catalog::demo_catalog;
    use crate::library::Track;
    use crossterm::event::KeyModifiers;

    fn key(c: KeyCode) -> KeyEvent {
        KeyEvent::new(c, KeyModifiers::NONE)
    }

    struct Harness {
        app: App,
        settings: config::Settings,
        state: EventLoopState,
        sent: Vec<PlayerCmd>,
    }

    impl Harness {
        fn new() -> Self {
            let tracks = vec![Track::new("/a.mp3", "Alpha"), Track::new("/b.mp3", "Beta")];
            let app = App::new(tracks, demo_catalog().merch, CartStore::new().into_shared());
            Self {
                app,
                settings: config::Settings::default(),
                state: EventLoopState::default(),
                sent: Vec::new(),
            }
        }

        fn press(&mut self, code: KeyCode) -> bool {
            let sent = &mut self.sent;
            let mut send = |cmd| sent.push(cmd);
            handle_key_event(key(code), &self.settings, &mut self.app, &mut send, &mut self.state)
        }
    }

    #[test]
    fn enter_on_track_loads_it() {
        let mut h = Harness::new();
        h.press(KeyCode::Char('j'));
        assert!(!h.press(KeyCode::Enter));
        match h.sent.as_slice() {
            [PlayerCmd::Load(t)] => assert_eq!(t.title, "Beta"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn transport_keys_map_to_commands() {
        let mut h = Harness::new();
        for c in [' ', 'L', 'H', '+', '-', 'm', 'x'] {
            h.press(KeyCode::Char(c));
        }
        let expected = [
            "TogglePlay",
            "SeekBy(5.0)",
            "SeekBy(-5.0)",
            "AdjustVolume(0.05)",
            "AdjustVolume(-0.05)",
            "ToggleMute",
            "Close",
        ];
        let got: Vec<String> = h.sent.iter().map(|c| format!("{c:?}")).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn merch_keys_build_a_cart_line() {
        let mut h = Harness::new();
        h.press(KeyCode::Tab);
        h.press(KeyCode::Char('s'));
        h.press(KeyCode::Char('c'));
        h.press(KeyCode::Char('>'));
        h.press(KeyCode::Enter);

        let lines = h.app.cart_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id.as_str(), "me1:M:White:none");
        assert_eq!(lines[0].quantity, 2);
        assert!(h.sent.is_empty());
    }

    #[test]
    fn option_keys_do_nothing_outside_merch() {
        let mut h = Harness::new();
        h.press(KeyCode::Char('s'));
        h.press(KeyCode::Char('c'));
        assert_eq!(h.app.selection.size, 0);
        assert_eq!(h.app.selection.color, 0);
    }

    #[test]
    fn cart_keys_edit_lines() {
        let mut h = Harness::new();
        h.press(KeyCode::Tab);
        h.press(KeyCode::Enter);
        h.press(KeyCode::Tab);
        assert_eq!(h.app.pane, Pane::Cart);

        h.press(KeyCode::Char('>'));
        assert_eq!(h.app.cart_summary().item_count, 2);
        h.press(KeyCode::Char('<'));
        h.press(KeyCode::Char('<'));
        assert_eq!(h.app.cart_summary().item_count, 1);

        h.press(KeyCode::Char('d'));
        assert!(h.app.cart_lines().is_empty());
    }

    #[test]
    fn gg_and_g_jump_to_ends() {
        let mut h = Harness::new();
        h.press(KeyCode::Char('G'));
        assert_eq!(h.app.track_selected, 1);
        h.press(KeyCode::Char('g'));
        assert_eq!(h.app.track_selected, 1);
        h.press(KeyCode::Char('g'));
        assert_eq!(h.app.track_selected, 0);
    }

    #[test]
    fn q_quits_after_closing_player() {
        let mut h = Harness::new();
        assert!(h.press(KeyCode::Char('q')));
        assert!(matches!(h.sent.as_slice(), [PlayerCmd::Close]));
    }
}
