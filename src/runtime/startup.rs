use std::path::Path;

use log::warn;

use crate::catalog::{Catalog, demo_catalog, load_catalog};
use crate::config;
use crate::library::scan;

/// The storefront for this run: the configured (or built-in) catalog, with
/// the tracks found under `dir` listed ahead of the catalog's own tracks.
pub fn build_catalog(settings: &config::Settings, dir: &Path) -> Catalog {
    let mut catalog = match &settings.catalog.path {
        Some(path) => load_catalog(path).unwrap_or_else(|e| {
            warn!("{e}; falling back to the built-in catalog");
            eprintln!("musichub: {e}; using the built-in catalog");
            demo_catalog()
        }),
        None => demo_catalog(),
    };

    let mut tracks = scan(dir, &settings.library);
    tracks.append(&mut catalog.tracks);
    catalog.tracks = tracks;
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn scanned_tracks_come_first_with_demo_merch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.mp3"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let catalog = build_catalog(&config::Settings::default(), dir.path());
        assert_eq!(catalog.merch.len(), demo_catalog().merch.len());
        assert_eq!(catalog.tracks.len(), 1 + demo_catalog().tracks.len());
        assert!(catalog.tracks[0].source_url.ends_with("b.mp3"));
    }

    #[test]
    fn configured_catalog_replaces_demo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            "[[merch]]\nid = \"cap\"\ntitle = \"Cap\"\nprice = \"$10\"\n",
        )
        .unwrap();

        let mut settings = config::Settings::default();
        settings.catalog.path = Some(path);
        let catalog = build_catalog(&settings, dir.path());
        assert_eq!(catalog.merch.len(), 1);
        assert_eq!(catalog.merch[0].id, "cap");
    }

    #[test]
    fn broken_catalog_falls_back_to_demo() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = config::Settings::default();
        settings.catalog.path = Some(dir.path().join("missing.toml"));
        let catalog = build_catalog(&settings, dir.path());
        assert_eq!(catalog.merch, demo_catalog().merch);
    }
}
