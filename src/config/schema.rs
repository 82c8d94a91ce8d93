use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/musichub/config.toml` or `~/.config/musichub/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MUSICHUB__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preview: PreviewSettings,
    pub cart: CartSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub catalog: CatalogSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Leading share of a track that may be played, in (0, 1].
    pub fraction: f64,
    /// How often the player re-checks the position against the cutoff (milliseconds).
    pub poll_interval_ms: u64,
    /// Grace period after a seek during which the cutoff check is suspended (milliseconds).
    pub seek_settle_ms: u64,
    /// Start playing as soon as a track is loaded.
    pub autoplay: bool,
    /// Volume for a freshly opened player, in [0, 1].
    pub initial_volume: f32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            fraction: 0.25,
            poll_interval_ms: 50,
            seek_settle_ms: 50,
            autoplay: true,
            initial_volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CartSettings {
    /// Upper bound for a single line's quantity. Unset means unbounded.
    pub max_line_quantity: Option<u32>,
    /// Symbol used when rendering amounts.
    pub currency_symbol: String,
}

impl Default for CartSettings {
    fn default() -> Self {
        Self {
            max_line_quantity: None,
            currency_symbol: "$".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change per `+` / `-` key press.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the full track length is shown next to the preview length.
    pub show_locked_duration: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Listen first, then grab the merch ~ ".to_string(),
            show_locked_duration: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// TOML catalog of merchandise and tracks. The built-in demo catalog is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Write logs to this file instead of stderr (the terminal belongs to the UI).
    pub file: Option<PathBuf>,
    /// Default level filter when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "warn".to_string(),
        }
    }
}
