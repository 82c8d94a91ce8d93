use std::sync::{Arc, Mutex};

use log::debug;

use crate::catalog::MerchandiseItem;
use crate::config::CartSettings;

use super::model::{CartLineItem, LineItemId, LineOptions};

/// Cart handle shared by the merch list, the cart pane and the header badge.
pub type SharedCart = Arc<Mutex<CartStore>>;

/// Item count and total, as shown on the cart summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CartSummary {
    pub item_count: u64,
    pub total: f64,
}

/// Ordered cart lines. Every operation is one self-contained edit of the
/// whole collection; count and total are recomputed on every call.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLineItem>,
    max_line_quantity: Option<u32>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &CartSettings) -> Self {
        Self {
            lines: Vec::new(),
            max_line_quantity: settings.max_line_quantity,
        }
    }

    pub fn into_shared(self) -> SharedCart {
        Arc::new(Mutex::new(self))
    }

    fn cap(&self, quantity: u32) -> u32 {
        match self.max_line_quantity {
            Some(max) => quantity.min(max.max(1)),
            None => quantity,
        }
    }

    fn position(&self, id: &LineItemId) -> Option<usize> {
        self.lines.iter().position(|l| &l.id == id)
    }

    /// Add `quantity` of `product` with `options`, merging into an existing
    /// line with the same key. Returns the id of the affected line, or `None`
    /// when `quantity` is zero.
    pub fn add_to_cart(
        &mut self,
        product: &MerchandiseItem,
        quantity: u32,
        options: &LineOptions,
    ) -> Option<LineItemId> {
        if quantity == 0 {
            debug!("ignoring add of zero {}", product.id);
            return None;
        }

        let id = LineItemId::new(&product.id, options);
        match self.position(&id) {
            Some(i) => {
                let merged = self.lines[i].quantity.saturating_add(quantity);
                self.lines[i].quantity = self.cap(merged);
                debug!("cart line {id} now x{}", self.lines[i].quantity);
            }
            None => {
                let line = CartLineItem::new(id.clone(), product, self.cap(quantity), options);
                debug!("cart line {id} added x{}", line.quantity);
                self.lines.push(line);
            }
        }
        Some(id)
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove_from_cart(&mut self, id: &LineItemId) {
        self.lines.retain(|l| &l.id != id);
    }

    /// Set a line's quantity, never below 1. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &LineItemId, quantity: u32) {
        let quantity = self.cap(quantity.max(1));
        if let Some(line) = self.lines.iter_mut().find(|l| &l.id == id) {
            line.quantity = quantity;
        }
    }

    /// Step a line's quantity by `delta`. A step that would go below 1 is ignored.
    pub fn adjust_quantity(&mut self, id: &LineItemId, delta: i64) {
        let Some(current) = self.line(id).map(|l| i64::from(l.quantity)) else {
            return;
        };
        let target = current.saturating_add(delta);
        if target < 1 {
            return;
        }
        self.update_quantity(id, u32::try_from(target).unwrap_or(u32::MAX));
    }

    pub fn clear_cart(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn line(&self, id: &LineItemId) -> Option<&CartLineItem> {
        self.lines.iter().find(|l| &l.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    pub fn cart_item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of parsed unit price times quantity over all lines.
    pub fn cart_total(&self) -> f64 {
        self.lines.iter().map(CartLineItem::subtotal).sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.cart_item_count(),
            total: self.cart_total(),
        }
    }
}
