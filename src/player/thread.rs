use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use log::{debug, error};

use super::clock::Clock;
use super::media::MediaElement;
use super::preview::{PreviewConfig, PreviewPlayer};
use super::rodio_media::RodioMedia;
use super::types::{PlayerCmd, SnapshotHandle};

pub(super) fn spawn_player_thread(
    rx: Receiver<PlayerCmd>,
    snapshot: SnapshotHandle,
    config: PreviewConfig,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let media = match RodioMedia::open_default() {
            Ok(media) => media,
            Err(e) => {
                error!("preview player unavailable: {e}");
                if let Ok(mut s) = snapshot.lock() {
                    s.fatal = Some(e.to_string());
                }
                return;
            }
        };

        let mut player = PreviewPlayer::new(media, config);
        run_loop(&mut player, &rx, &snapshot);
    })
}

/// Serve commands until `Quit` or until every sender is gone, ticking the
/// player every poll interval or sooner when a deadline is due.
pub(super) fn run_loop<M: MediaElement, C: Clock>(
    player: &mut PreviewPlayer<M, C>,
    rx: &Receiver<PlayerCmd>,
    snapshot: &SnapshotHandle,
) {
    let poll = player.config().poll_interval;
    publish(player, snapshot);

    loop {
        let wait = player
            .next_wakeup()
            .map(|at| at.saturating_duration_since(Instant::now()).min(poll))
            .unwrap_or(poll);

        match rx.recv_timeout(wait) {
            Ok(PlayerCmd::Quit) | Err(RecvTimeoutError::Disconnected) => {
                player.close();
                publish(player, snapshot);
                break;
            }
            Ok(cmd) => apply(player, cmd),
            Err(RecvTimeoutError::Timeout) => {}
        }

        player.tick();
        publish(player, snapshot);
    }
}

pub(super) fn apply<M: MediaElement, C: Clock>(player: &mut PreviewPlayer<M, C>, cmd: PlayerCmd) {
    let result = match cmd {
        PlayerCmd::Load(track) => player.load(track),
        PlayerCmd::TogglePlay => player.toggle_play(),
        PlayerCmd::Seek(secs) => {
            player.seek(secs);
            Ok(())
        }
        PlayerCmd::SeekBy(delta) => {
            player.seek_by(delta);
            Ok(())
        }
        PlayerCmd::SetVolume(v) => {
            player.set_volume(v);
            Ok(())
        }
        PlayerCmd::AdjustVolume(step) => {
            player.adjust_volume(step);
            Ok(())
        }
        PlayerCmd::ToggleMute => {
            player.toggle_mute();
            Ok(())
        }
        PlayerCmd::Close | PlayerCmd::Quit => {
            player.close();
            Ok(())
        }
    };

    // The error is already part of the player state; the snapshot carries it to the UI.
    if let Err(e) = result {
        debug!("command failed: {e}");
    }
}

fn publish<M: MediaElement, C: Clock>(player: &PreviewPlayer<M, C>, snapshot: &SnapshotHandle) {
    if let Ok(mut s) = snapshot.lock() {
        *s = player.snapshot();
    }
}
