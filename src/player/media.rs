//! The boundary between the player and whatever actually produces sound.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    /// No audio output could be opened.
    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {reason}")]
    Decode { path: String, reason: String },

    /// The host refused to start playback (e.g. autoplay policy, nothing loaded).
    #[error("playback refused: {0}")]
    Refused(String),
}

/// A single media resource, modelled on an HTML media element.
///
/// Positions and durations are in seconds. Implementations report what the
/// underlying resource knows; the player owns every preview rule.
pub trait MediaElement {
    /// Bind a new source, replacing the previous one. Starts paused at 0.
    fn load(&mut self, source_url: &str) -> Result<(), MediaError>;

    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self);

    fn current_time(&self) -> f64;

    /// Move the playhead. Also rewinds a resource that ran off its end, so
    /// the next `play` is audible again.
    fn set_current_time(&mut self, secs: f64);

    /// Full length once metadata is available.
    fn duration(&self) -> Option<f64>;

    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);

    /// True once playback ran off the end of the resource.
    fn has_ended(&self) -> bool;

    /// Drop the bound resource.
    fn release(&mut self);
}
