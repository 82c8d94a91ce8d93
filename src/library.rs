//! Track library: the `Track` record fed to the preview player and a
//! directory scanner that builds tracks from local audio files.

mod model;
mod scan;

pub use model::Track;
pub use scan::scan;

#[cfg(test)]
mod tests;
