use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::config::PreviewSettings;

use super::preview::PreviewConfig;
use super::thread::spawn_player_thread;
use super::types::{PlaybackSnapshot, PlayerCmd, SnapshotHandle};

/// A preview player running on its own thread, driven by [`PlayerCmd`]s.
pub struct AudioPlayer {
    tx: Sender<PlayerCmd>,
    snapshot: SnapshotHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(settings: &PreviewSettings) -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCmd>();
        let snapshot: SnapshotHandle = Arc::new(Mutex::new(PlaybackSnapshot::default()));

        let handle = spawn_player_thread(rx, snapshot.clone(), PreviewConfig::from(settings));

        Self {
            tx,
            snapshot,
            join: Mutex::new(Some(handle)),
        }
    }

    pub fn snapshot_handle(&self) -> SnapshotHandle {
        self.snapshot.clone()
    }

    pub fn send(&self, cmd: PlayerCmd) -> Result<(), mpsc::SendError<PlayerCmd>> {
        self.tx.send(cmd)
    }

    /// Close the current track and wait for the player thread to finish.
    pub fn shutdown(&self) {
        let _ = self.send(PlayerCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
