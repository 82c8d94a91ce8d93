//! Shopping cart: line items keyed by product and chosen options, with
//! item count and total always derived from the current lines.
//!
//! One `CartStore` exists per session and is shared through a
//! [`SharedCart`] handle by every surface that reads or edits it.

mod model;
mod price;
mod store;

pub use model::{CartLineItem, LineItemId, LineOptions};
pub use price::{format_price, parse_price};
pub use store::{CartStore, CartSummary, SharedCart};

#[cfg(test)]
mod tests;
