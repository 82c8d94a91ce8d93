//! Preview player: plays a track but never past a fixed leading share of it.
//!
//! `PreviewPlayer` is the state machine and owns the cutoff rules. It talks
//! to audio through the [`MediaElement`] trait and reads time through
//! [`Clock`], so timers are plain deadlines checked by `tick()`.
//! `AudioPlayer` runs one player on its own thread with a rodio backend and
//! publishes a [`PlaybackSnapshot`] for the UI.

mod clock;
mod media;
mod preview;
mod rodio_media;
mod service;
mod session;
mod thread;
mod types;

pub use clock::{Clock, SystemClock};
pub use media::{MediaElement, MediaError};
pub use preview::{PreviewConfig, PreviewPlayer};
pub use service::AudioPlayer;
pub use session::{PlaybackSession, format_time};
pub use types::{PlaybackSnapshot, PlayerCmd, PlayerError, PlayerState, SnapshotHandle};
