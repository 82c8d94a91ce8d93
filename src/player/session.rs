/// Playback facts for the currently loaded track. Owned by one player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    /// Unknown until the media reports metadata.
    pub full_duration: Option<f64>,
    pub preview_fraction: f64,
    /// `full_duration * preview_fraction` once the duration is known.
    pub preview_cutoff: Option<f64>,
    pub position: f64,
    pub is_playing: bool,
    /// Set while a user seek is in flight; the poll check stands down meanwhile.
    pub is_seeking: bool,
    pub volume: f32,
    pub is_muted: bool,
    pub volume_before_mute: f32,
}

impl PlaybackSession {
    pub fn new(preview_fraction: f64, volume: f32) -> Self {
        Self {
            full_duration: None,
            preview_fraction,
            preview_cutoff: None,
            position: 0.0,
            is_playing: false,
            is_seeking: false,
            volume,
            is_muted: false,
            volume_before_mute: volume,
        }
    }

    /// Forget everything about the previous track. Volume settings survive.
    pub(super) fn reset_track(&mut self) {
        self.full_duration = None;
        self.preview_cutoff = None;
        self.position = 0.0;
        self.is_playing = false;
        self.is_seeking = false;
    }

    pub(super) fn set_duration(&mut self, full: f64) {
        self.full_duration = Some(full);
        self.preview_cutoff = Some(full * self.preview_fraction);
        self.position = self.position.min(full);
    }

    /// Keep a reported position inside `[0, full_duration]`.
    pub(super) fn clamp_position(&self, secs: f64) -> f64 {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        match self.full_duration {
            Some(full) => secs.min(full),
            None => secs,
        }
    }

    pub fn past_cutoff(&self) -> bool {
        self.preview_cutoff
            .is_some_and(|cutoff| self.position >= cutoff)
    }

    /// Share of the full track played so far, never beyond the preview share.
    pub fn progress_ratio(&self) -> f64 {
        match self.full_duration {
            Some(full) if full > 0.0 => (self.position / full).min(self.preview_fraction),
            _ => 0.0,
        }
    }
}

/// Format seconds as `m:ss`.
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
