//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog, the three
//! pane selections, the pending merch choice and handles to the shared cart
//! and the preview player's snapshot.

mod model;

pub use model::*;
