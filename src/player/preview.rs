use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::PreviewSettings;
use crate::library::Track;

use super::clock::{Clock, SystemClock};
use super::media::MediaElement;
use super::session::PlaybackSession;
use super::types::{PlaybackSnapshot, PlayerError, PlayerState};

/// Fixed parameters of a preview player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewConfig {
    /// Leading share of each track that may be played, in (0, 1].
    pub fraction: f64,
    /// How often the host should call [`PreviewPlayer::tick`].
    pub poll_interval: Duration,
    /// How long the position check stays suspended after a seek.
    pub seek_settle: Duration,
    pub autoplay: bool,
    pub initial_volume: f32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self::from(&PreviewSettings::default())
    }
}

impl From<&PreviewSettings> for PreviewConfig {
    fn from(s: &PreviewSettings) -> Self {
        let fraction = if s.fraction.is_finite() && s.fraction > 0.0 {
            s.fraction.min(1.0)
        } else {
            0.25
        };
        Self {
            fraction,
            poll_interval: Duration::from_millis(s.poll_interval_ms.max(1)),
            seek_settle: Duration::from_millis(s.seek_settle_ms),
            autoplay: s.autoplay,
            initial_volume: if s.initial_volume.is_nan() {
                1.0
            } else {
                s.initial_volume.clamp(0.0, 1.0)
            },
        }
    }
}

/// Plays one track at a time and never lets it run past the preview cutoff.
///
/// Two independent guards enforce the cutoff: a one-shot deadline armed
/// whenever playback starts or seeks, and a position check run on every
/// reported position and every [`tick`](Self::tick). Both end in the same
/// place: paused, rewound to 0, [`PlayerState::Capped`].
pub struct PreviewPlayer<M, C = SystemClock> {
    media: M,
    clock: C,
    config: PreviewConfig,
    track: Option<Track>,
    state: PlayerState,
    session: PlaybackSession,
    cutoff_at: Option<Instant>,
    seek_settles_at: Option<Instant>,
    autoplay_blocked: bool,
}

impl<M: MediaElement> PreviewPlayer<M, SystemClock> {
    pub fn new(media: M, config: PreviewConfig) -> Self {
        Self::with_clock(media, SystemClock, config)
    }
}

impl<M: MediaElement, C: Clock> PreviewPlayer<M, C> {
    pub fn with_clock(mut media: M, clock: C, config: PreviewConfig) -> Self {
        let session = PlaybackSession::new(config.fraction, config.initial_volume);
        media.set_volume(session.volume);
        Self {
            media,
            clock,
            config,
            track: None,
            state: PlayerState::Idle,
            session,
            cutoff_at: None,
            seek_settles_at: None,
            autoplay_blocked: false,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Autoplay was refused on the last load and nothing has been played since.
    pub fn autoplay_blocked(&self) -> bool {
        self.autoplay_blocked
    }

    /// Earliest pending deadline (cutoff or seek settle), if any.
    pub fn next_wakeup(&self) -> Option<Instant> {
        [self.cutoff_at, self.seek_settles_at]
            .into_iter()
            .flatten()
            .min()
    }

    fn controllable(&self) -> bool {
        self.track.is_some() && !matches!(self.state, PlayerState::Errored(_))
    }

    /// `state`, unless the duration is still unknown.
    fn resting(&self, state: PlayerState) -> PlayerState {
        if self.session.full_duration.is_none() {
            PlayerState::Loading
        } else {
            state
        }
    }

    fn cancel_timers(&mut self) {
        self.cutoff_at = None;
        self.seek_settles_at = None;
    }

    fn pause_playback(&mut self) {
        self.media.pause();
        self.session.is_playing = false;
        self.cutoff_at = None;
    }

    /// Stop at the cutoff: pause, rewind, clear the playing flag.
    fn cap(&mut self, reason: &str) {
        self.pause_playback();
        self.media.set_current_time(0.0);
        self.session.position = 0.0;
        self.state = self.resting(PlayerState::Capped);
        info!("preview cutoff reached ({reason}), rewound to start");
    }

    /// Re-arm the cutoff deadline for the time left from the current position.
    fn schedule_cutoff(&mut self) {
        self.cutoff_at = None;
        if !self.session.is_playing {
            return;
        }
        let Some(cutoff) = self.session.preview_cutoff else {
            return;
        };

        let remaining = cutoff - self.session.position;
        if remaining > 0.0 {
            // Too far out to represent: only the position check guards this track.
            self.cutoff_at = Duration::try_from_secs_f64(remaining)
                .ok()
                .and_then(|d| self.clock.now().checked_add(d));
        } else {
            self.cap("started past cutoff");
        }
    }

    fn arm_seek_settle(&mut self) {
        self.seek_settles_at = self.clock.now().checked_add(self.config.seek_settle);
        if self.seek_settles_at.is_none() {
            self.session.is_seeking = false;
        }
    }

    /// Position check shared by position reports, seek completion and ticks.
    fn enforce_cutoff(&mut self) {
        if !self.session.is_seeking && self.session.past_cutoff() {
            self.cap("position check");
        }
    }

    /// Bind `track`, rewind to 0 and try to start playing.
    ///
    /// A refused autoplay is not an error: the player simply stays paused
    /// and [`autoplay_blocked`](Self::autoplay_blocked) is set.
    pub fn load(&mut self, track: Track) -> Result<(), PlayerError> {
        self.cancel_timers();
        if self.track.is_some() {
            self.media.pause();
        }
        self.session.reset_track();
        self.autoplay_blocked = false;

        if let Err(e) = self.media.load(&track.source_url) {
            let err = PlayerError::LoadFailed {
                source_url: track.source_url.clone(),
                reason: e.to_string(),
            };
            warn!("{err}");
            self.track = Some(track);
            self.state = PlayerState::Errored(err.clone());
            return Err(err);
        }

        info!("previewing {}", track.display());
        self.track = Some(track);
        self.state = PlayerState::Loading;
        self.media.set_volume(self.session.volume);
        self.media.set_muted(self.session.is_muted);

        if self.config.autoplay {
            match self.media.play() {
                Ok(()) => self.session.is_playing = true,
                Err(e) => {
                    debug!("autoplay refused: {e}");
                    self.autoplay_blocked = true;
                }
            }
        }

        if let Some(full) = self.media.duration() {
            self.on_metadata_ready(full);
        }
        Ok(())
    }

    /// The media now knows its full length.
    pub fn on_metadata_ready(&mut self, full_duration: f64) {
        if !self.controllable() {
            return;
        }
        if !full_duration.is_finite() || full_duration <= 0.0 {
            warn!("ignoring unusable duration {full_duration}");
            return;
        }

        self.session.set_duration(full_duration);
        debug!(
            "duration {:.1}s, preview cutoff {:.1}s",
            full_duration,
            full_duration * self.session.preview_fraction
        );

        if self.state == PlayerState::Loading {
            self.state = if self.session.is_playing {
                PlayerState::Playing
            } else {
                PlayerState::Ready
            };
        }
        if self.session.is_playing {
            self.schedule_cutoff();
        }
    }

    pub fn on_position_changed(&mut self, secs: f64) {
        if !self.controllable() {
            return;
        }
        self.session.position = self.session.clamp_position(secs);
        self.enforce_cutoff();
    }

    /// A seek began outside of [`seek`](Self::seek). The position check stands
    /// down until `on_seek_completed` or the settle deadline, whichever is first.
    pub fn on_seek_started(&mut self) {
        if self.controllable() {
            self.session.is_seeking = true;
            self.arm_seek_settle();
        }
    }

    pub fn on_seek_completed(&mut self) {
        if !self.controllable() {
            return;
        }
        self.session.is_seeking = false;
        self.seek_settles_at = None;
        self.enforce_cutoff();
    }

    pub fn on_ended(&mut self) {
        if !self.controllable() {
            return;
        }
        self.pause_playback();
        self.media.set_current_time(0.0);
        self.session.position = 0.0;
        self.state = self.resting(PlayerState::Capped);
    }

    /// Pause, or play. A preview that reached its cutoff always restarts from 0.
    pub fn toggle_play(&mut self) -> Result<(), PlayerError> {
        if let PlayerState::Errored(err) = &self.state {
            return Err(err.clone());
        }
        if self.track.is_none() {
            return Ok(());
        }

        if self.session.is_playing {
            self.pause_playback();
            self.state = self.resting(PlayerState::Paused);
            return Ok(());
        }

        if self.session.past_cutoff() {
            self.session.position = 0.0;
            self.media.set_current_time(0.0);
        }

        if let Err(e) = self.media.play() {
            let err = PlayerError::PlaybackFailed(e.to_string());
            warn!("{err}");
            self.cancel_timers();
            self.state = PlayerState::Errored(err.clone());
            return Err(err);
        }

        self.session.is_playing = true;
        self.autoplay_blocked = false;
        self.state = self.resting(PlayerState::Playing);
        self.schedule_cutoff();
        Ok(())
    }

    /// Jump to `target` seconds.
    ///
    /// Targets inside the locked region (past the cutoff, or anything but 0
    /// before the duration is known) rewind to 0 and pause instead.
    pub fn seek(&mut self, target: f64) {
        if !self.controllable() {
            return;
        }
        let target = if target.is_finite() { target.max(0.0) } else { 0.0 };
        self.session.is_seeking = true;

        let locked = match self.session.preview_cutoff {
            Some(cutoff) => target > cutoff,
            None => target > 0.0,
        };
        if locked {
            self.pause_playback();
            self.media.set_current_time(0.0);
            self.session.position = 0.0;
            self.session.is_seeking = false;
            self.seek_settles_at = None;
            self.state = self.resting(PlayerState::Paused);
            info!("seek to {target:.1}s is past the preview, rewound and paused");
            return;
        }

        let target = self.session.clamp_position(target);
        self.session.position = target;
        self.media.set_current_time(target);
        if self.session.is_playing {
            self.schedule_cutoff();
        }
        self.arm_seek_settle();
    }

    pub fn seek_by(&mut self, delta: f64) {
        self.seek(self.session.position + delta);
    }

    /// Set the volume, clamped to [0, 1]. Zero mutes; anything louder unmutes.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self.session.volume = volume;
        self.media.set_volume(volume);

        if volume == 0.0 && !self.session.is_muted {
            self.session.is_muted = true;
            self.media.set_muted(true);
        } else if volume > 0.0 && self.session.is_muted {
            self.session.is_muted = false;
            self.media.set_muted(false);
        }
    }

    pub fn adjust_volume(&mut self, step: f32) {
        self.set_volume(self.session.volume + step);
    }

    /// Mute remembers the current volume; unmute puts it back.
    pub fn toggle_mute(&mut self) {
        if self.session.is_muted {
            self.session.volume = self.session.volume_before_mute;
            self.session.is_muted = false;
        } else {
            self.session.volume_before_mute = self.session.volume;
            self.session.volume = 0.0;
            self.session.is_muted = true;
        }
        self.media.set_volume(self.session.volume);
        self.media.set_muted(self.session.is_muted);
    }

    /// Pause, drop every pending deadline and release the media.
    pub fn close(&mut self) {
        self.cancel_timers();
        if self.track.is_some() {
            self.media.pause();
            self.media.release();
        }
        self.track = None;
        self.session.reset_track();
        self.autoplay_blocked = false;
        self.state = PlayerState::Idle;
    }

    /// Fast poll: pick up metadata, fire due deadlines, notice the end of
    /// the media and check the current position against the cutoff.
    pub fn tick(&mut self) {
        if !self.controllable() {
            return;
        }
        let now = self.clock.now();

        if self.session.full_duration.is_none() {
            if let Some(full) = self.media.duration() {
                self.on_metadata_ready(full);
            }
        }

        if self.seek_settles_at.is_some_and(|at| now >= at) {
            self.seek_settles_at = None;
            self.session.is_seeking = false;
        }

        if self.cutoff_at.is_some_and(|at| now >= at) {
            self.cutoff_at = None;
            if self.session.is_playing {
                self.cap("timer");
            }
        }

        if self.session.is_playing && self.media.has_ended() {
            self.on_ended();
            return;
        }

        let position = self.media.current_time();
        self.on_position_changed(position);
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state.clone(),
            track: self.track.clone(),
            position: self.session.position,
            full_duration: self.session.full_duration,
            preview_cutoff: self.session.preview_cutoff,
            preview_fraction: self.session.preview_fraction,
            progress: self.session.progress_ratio(),
            playing: self.session.is_playing,
            volume: self.session.volume,
            muted: self.session.is_muted,
            autoplay_blocked: self.autoplay_blocked,
            fatal: None,
        }
    }
}
