use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `MUSICHUB__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MUSICHUB")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let fraction = self.preview.fraction;
        if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
            return Err(format!("preview.fraction must be in (0, 1], got {fraction}"));
        }
        if self.preview.poll_interval_ms == 0 {
            return Err("preview.poll_interval_ms must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.preview.initial_volume) {
            return Err("preview.initial_volume must be in [0, 1]".to_string());
        }
        let step = self.controls.volume_step;
        if !step.is_finite() || step <= 0.0 || step > 1.0 {
            return Err("controls.volume_step must be in (0, 1]".to_string());
        }
        if self.cart.max_line_quantity == Some(0) {
            return Err("cart.max_line_quantity must be >= 1 when set".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `MUSICHUB_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MUSICHUB_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/musichub/config.toml`
/// or `~/.config/musichub/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("musichub").join("config.toml"))
}
