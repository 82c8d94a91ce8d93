use std::time::Duration;

use serde::Deserialize;

/// A playable track. Only `source_url` matters to playback; the rest is display metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub source_url: String,
    pub title: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub cover_image_url: String,
    /// Length read from tags when scanning; the player still waits for the media's own report.
    #[serde(skip)]
    pub duration: Option<Duration>,
}

impl Track {
    pub fn new(source_url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            title: title.into(),
            artist_name: String::new(),
            cover_image_url: String::new(),
            duration: None,
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist_name = artist.into();
        self
    }

    /// "Artist - Title", or just the title when the artist is unknown.
    pub fn display(&self) -> String {
        match self.artist_name.trim() {
            "" => self.title.trim().to_string(),
            artist => format!("{} - {}", artist, self.title.trim()),
        }
    }
}
