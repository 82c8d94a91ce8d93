//! Player states, commands and the snapshot shared with the UI.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::library::Track;

/// Failures that leave the player in [`PlayerState::Errored`]. Loading a track again recovers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayerError {
    #[error("could not load {source_url}: {reason}")]
    LoadFailed { source_url: String, reason: String },

    #[error("playback failed: {0}")]
    PlaybackFailed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlayerState {
    /// Nothing loaded.
    #[default]
    Idle,
    /// A track is bound but its duration is not known yet. Audio may already be running.
    Loading,
    /// Duration known, nothing played yet.
    Ready,
    Playing,
    Paused,
    /// The preview ran out (or the track ended); position is back at 0.
    Capped,
    /// Controls are disabled until the next `load`.
    Errored(PlayerError),
}

impl PlayerState {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerState::Idle => "Idle",
            PlayerState::Loading => "Loading",
            PlayerState::Ready => "Ready",
            PlayerState::Playing => "Playing",
            PlayerState::Paused => "Paused",
            PlayerState::Capped => "Preview ended",
            PlayerState::Errored(_) => "Error",
        }
    }
}

#[derive(Debug)]
pub enum PlayerCmd {
    /// Bind a track and start it (autoplay permitting).
    Load(Track),
    TogglePlay,
    /// Seek to an absolute position in seconds.
    Seek(f64),
    /// Seek relative to the current position (seconds, positive or negative).
    SeekBy(f64),
    SetVolume(f32),
    /// Change the volume by a signed step.
    AdjustVolume(f32),
    ToggleMute,
    /// Stop and release the current track.
    Close,
    /// Close and stop the player thread.
    Quit,
}

/// Copy of the player's observable state, refreshed after every command and tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackSnapshot {
    pub state: PlayerState,
    pub track: Option<Track>,
    pub position: f64,
    pub full_duration: Option<f64>,
    pub preview_cutoff: Option<f64>,
    pub preview_fraction: f64,
    /// Share of the full track played, never beyond `preview_fraction`.
    pub progress: f64,
    pub playing: bool,
    pub volume: f32,
    pub muted: bool,
    /// Autoplay was refused; the user has to press play.
    pub autoplay_blocked: bool,
    /// Set when the player thread itself could not start.
    pub fatal: Option<String>,
}

pub type SnapshotHandle = Arc<Mutex<PlaybackSnapshot>>;
