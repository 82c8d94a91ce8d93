use std::fs::OpenOptions;

use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("musichub: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("musichub: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// Route `log` output to the configured file. Without one, logging stays off
/// unless `RUST_LOG` asks for it, since stderr shares the terminal with the UI.
pub fn init_logging(log: &config::LogSettings) {
    let default_filter = if log.file.is_some() {
        log.level.as_str()
    } else {
        "off"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = &log.file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("musichub: cannot open log file {}: {e}", path.display()),
        }
    }

    let _ = builder.try_init();
}
