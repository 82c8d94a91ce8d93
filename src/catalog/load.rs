use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use super::model::Catalog;

const DEMO_CATALOG: &str = include_str!("../../assets/catalog.toml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate merchandise id: {0}")]
    DuplicateId(String),
}

/// Parse catalog TOML. Merchandise ids must be unique since cart lines are keyed by them.
pub fn parse_catalog(text: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = toml::from_str(text)?;

    let mut seen = HashSet::new();
    for item in &catalog.merch {
        if !seen.insert(item.id.as_str()) {
            return Err(CatalogError::DuplicateId(item.id.clone()));
        }
    }
    Ok(catalog)
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&text)?;
    info!(
        "loaded catalog {}: {} merch, {} tracks",
        path.display(),
        catalog.merch.len(),
        catalog.tracks.len()
    );
    Ok(catalog)
}

/// The storefront's built-in merchandise.
pub fn demo_catalog() -> Catalog {
    parse_catalog(DEMO_CATALOG).unwrap_or_default()
}
