use std::env;
use std::path::Path;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::cart::CartStore;
use crate::player::AudioPlayer;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    settings::init_logging(&settings.log);

    let dir = env::args().nth(1).unwrap_or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| "Music".to_string())
    });

    let catalog = startup::build_catalog(&settings, Path::new(&dir));
    info!(
        "{} tracks, {} merch items",
        catalog.tracks.len(),
        catalog.merch.len()
    );

    let cart = CartStore::with_settings(&settings.cart).into_shared();
    let audio_player = AudioPlayer::new(&settings.preview);
    let mut app = App::new(catalog.tracks, catalog.merch, cart);

    app.currency_symbol = settings.cart.currency_symbol.clone();
    app.set_current_dir(dir);
    app.set_playback_handle(audio_player.snapshot_handle());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &audio_player);

    audio_player.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
