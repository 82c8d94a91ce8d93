//! `MediaElement` on top of a rodio `Sink`, for local audio files.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::AudioFile;
use log::{debug, warn};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::media::{MediaElement, MediaError};

pub struct RodioMedia {
    stream: OutputStream,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    duration: Option<f64>,
    /// Added to the sink's position when the sink was rebuilt mid-track.
    offset: Duration,
    volume: f32,
    muted: bool,
}

impl RodioMedia {
    /// Open the default output device.
    pub fn open_default() -> Result<Self, MediaError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| MediaError::Output(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which would scribble over the UI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            path: None,
            duration: None,
            offset: Duration::ZERO,
            volume: 1.0,
            muted: false,
        })
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Replace the current sink with one starting at `target`, keeping its play/pause state.
    fn rebuild_at(&mut self, target: Duration) {
        let was_paused = self.sink.as_ref().is_none_or(Sink::is_paused);
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        let Some(path) = self.path.clone() else {
            return;
        };

        match self.build_sink(&path, target) {
            Ok((sink, _)) => {
                if !was_paused {
                    sink.play();
                }
                self.sink = Some(sink);
                self.offset = target;
            }
            Err(e) => warn!("{e}"),
        }
    }

    /// Create a paused `Sink` for `path` that starts playback at `start_at`.
    fn build_sink(&self, path: &Path, start_at: Duration) -> Result<(Sink, Option<f64>), MediaError> {
        let file = File::open(path).map_err(|source| MediaError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| MediaError::Decode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let total = decoder.total_duration().map(|d| d.as_secs_f64());

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(decoder.skip_duration(start_at));
        sink.pause();
        sink.set_volume(self.effective_volume());
        Ok((sink, total))
    }
}

fn local_path(source_url: &str) -> PathBuf {
    PathBuf::from(source_url.strip_prefix("file://").unwrap_or(source_url))
}

/// Track length from the file's tags, when the decoder cannot tell.
fn probe_duration(path: &Path) -> Option<f64> {
    let tagged = lofty::read_from_path(path).ok()?;
    let secs = tagged.properties().duration().as_secs_f64();
    (secs > 0.0).then_some(secs)
}

impl MediaElement for RodioMedia {
    fn load(&mut self, source_url: &str) -> Result<(), MediaError> {
        self.release();

        let path = local_path(source_url);
        let (sink, total) = self.build_sink(&path, Duration::ZERO)?;
        self.duration = total.filter(|d| *d > 0.0).or_else(|| probe_duration(&path));
        debug!("loaded {} ({:?}s)", path.display(), self.duration);

        self.sink = Some(sink);
        self.path = Some(path);
        self.offset = Duration::ZERO;
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaError> {
        match &self.sink {
            Some(sink) => {
                sink.play();
                Ok(())
            }
            None => Err(MediaError::Refused("nothing loaded".to_string())),
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn current_time(&self) -> f64 {
        self.sink
            .as_ref()
            .map(|s| (self.offset + s.get_pos()).as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_current_time(&mut self, secs: f64) {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        let target = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        let Some(sink) = &self.sink else {
            return;
        };

        // A sink that played to the end holds no source any more; seeking it
        // is a silent no-op, so the track has to be queued again.
        if sink.empty() {
            debug!("sink drained, rebuilding at {target:?}");
            self.rebuild_at(target);
            return;
        }

        match sink.try_seek(target) {
            Ok(()) => self.offset = Duration::ZERO,
            Err(e) => {
                // Formats without seek support: rebuild the sink and skip into the file.
                debug!("seek unsupported ({e}), rebuilding sink at {target:?}");
                self.rebuild_at(target);
            }
        }
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(self.effective_volume());
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(sink) = &self.sink {
            sink.set_volume(self.effective_volume());
        }
    }

    fn has_ended(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| s.empty())
    }

    fn release(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.path = None;
        self.duration = None;
        self.offset = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_path_strips_file_scheme() {
        assert_eq!(local_path("file:///music/a.mp3"), PathBuf::from("/music/a.mp3"));
        assert_eq!(local_path("/music/a.mp3"), PathBuf::from("/music/a.mp3"));
    }

    #[test]
    fn probe_duration_is_none_for_non_audio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.mp3");
        std::fs::write(&path, b"not audio").unwrap();
        assert_eq!(probe_duration(&path), None);
    }
}
