//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive the preview player, the cart
//! and the terminal front-end, plus helpers to load them from disk.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;
