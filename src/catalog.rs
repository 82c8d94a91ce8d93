//! Static storefront catalog: merchandise and featured tracks, read from a
//! TOML file or taken from the built-in demo catalog.

mod load;
mod model;

pub use load::{CatalogError, demo_catalog, load_catalog, parse_catalog};
pub use model::{Catalog, MerchandiseItem};
