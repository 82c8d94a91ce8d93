//! Application model types: `App`, `Pane` and `MerchSelection`.

use log::debug;

use crate::cart::{CartLineItem, CartSummary, LineItemId, LineOptions, SharedCart};
use crate::catalog::MerchandiseItem;
use crate::library::Track;
use crate::player::{PlaybackSnapshot, SnapshotHandle};

/// Which list has the cursor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Pane {
    #[default]
    Tracks,
    Merch,
    Cart,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Tracks => Pane::Merch,
            Pane::Merch => Pane::Cart,
            Pane::Cart => Pane::Tracks,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Pane::Tracks => " tracks ",
            Pane::Merch => " merch ",
            Pane::Cart => " cart ",
        }
    }
}

/// Options and quantity chosen for the highlighted merch item before it is added.
///
/// Indices point into the item's `sizes` / `colors` / `variants`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MerchSelection {
    pub size: usize,
    pub color: usize,
    pub variant: usize,
    pub quantity: u32,
}

impl Default for MerchSelection {
    fn default() -> Self {
        Self {
            size: 0,
            color: 0,
            variant: 0,
            quantity: 1,
        }
    }
}

fn cycle(idx: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (idx + 1) % len }
}

/// Wrap-around step through `len` entries.
fn step(current: usize, len: usize, forward: bool) -> usize {
    match (len, forward) {
        (0, _) => 0,
        (_, true) => (current + 1) % len,
        (_, false) if current == 0 || current >= len => len - 1,
        (_, false) => current - 1,
    }
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub merch: Vec<MerchandiseItem>,
    pub pane: Pane,
    pub track_selected: usize,
    pub merch_selected: usize,
    pub cart_selected: usize,
    pub selection: MerchSelection,
    pub cart: SharedCart,
    pub playback_handle: Option<SnapshotHandle>,
    pub current_dir: Option<String>,
    /// One-line feedback shown under the preview bar.
    pub status: Option<String>,
    pub currency_symbol: String,
}

impl App {
    pub fn new(tracks: Vec<Track>, merch: Vec<MerchandiseItem>, cart: SharedCart) -> Self {
        Self {
            tracks,
            merch,
            pane: Pane::Tracks,
            track_selected: 0,
            merch_selected: 0,
            cart_selected: 0,
            selection: MerchSelection::default(),
            cart,
            playback_handle: None,
            current_dir: None,
            status: None,
            currency_symbol: "$".to_string(),
        }
    }

    /// Attach the handle the player thread publishes snapshots to.
    pub fn set_playback_handle(&mut self, h: SnapshotHandle) {
        self.playback_handle = Some(h);
    }

    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Latest published player state, if a player is attached.
    pub fn playback(&self) -> Option<PlaybackSnapshot> {
        self.playback_handle
            .as_ref()
            .and_then(|h| h.lock().ok().map(|s| s.clone()))
    }

    pub fn cycle_pane(&mut self) {
        self.pane = self.pane.next();
        self.clamp_cart_selection();
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.tracks.get(self.track_selected)
    }

    pub fn selected_merch(&self) -> Option<&MerchandiseItem> {
        self.merch.get(self.merch_selected)
    }

    /// Number of rows in the focused pane.
    fn pane_len(&self) -> usize {
        match self.pane {
            Pane::Tracks => self.tracks.len(),
            Pane::Merch => self.merch.len(),
            Pane::Cart => self.cart_lines().len(),
        }
    }

    /// Move the cursor down in the focused pane, wrapping around.
    pub fn next(&mut self) {
        self.move_cursor(true);
    }

    /// Move the cursor up in the focused pane, wrapping around.
    pub fn prev(&mut self) {
        self.move_cursor(false);
    }

    /// Jump to the first row of the focused pane.
    pub fn select_first(&mut self) {
        self.select_index(0);
    }

    /// Jump to the last row of the focused pane.
    pub fn select_last(&mut self) {
        let last = self.pane_len().saturating_sub(1);
        self.select_index(last);
    }

    fn select_index(&mut self, idx: usize) {
        match self.pane {
            Pane::Tracks => self.track_selected = idx,
            Pane::Merch => {
                if idx != self.merch_selected {
                    self.selection = MerchSelection::default();
                }
                self.merch_selected = idx;
            }
            Pane::Cart => self.cart_selected = idx,
        }
    }

    fn move_cursor(&mut self, forward: bool) {
        let len = self.pane_len();
        match self.pane {
            Pane::Tracks => self.track_selected = step(self.track_selected, len, forward),
            Pane::Merch => {
                let next = step(self.merch_selected, len, forward);
                if next != self.merch_selected {
                    // A different product starts from its own defaults.
                    self.selection = MerchSelection::default();
                }
                self.merch_selected = next;
            }
            Pane::Cart => self.cart_selected = step(self.cart_selected, len, forward),
        }
    }

    pub fn cycle_size(&mut self) {
        if let Some(len) = self.selected_merch().map(|m| m.sizes.len()) {
            self.selection.size = cycle(self.selection.size, len);
        }
    }

    pub fn cycle_color(&mut self) {
        if let Some(len) = self.selected_merch().map(|m| m.colors.len()) {
            self.selection.color = cycle(self.selection.color, len);
        }
    }

    pub fn cycle_variant(&mut self) {
        if let Some(len) = self.selected_merch().map(|m| m.variants.len()) {
            self.selection.variant = cycle(self.selection.variant, len);
        }
    }

    pub fn increase_quantity(&mut self) {
        self.selection.quantity = self.selection.quantity.saturating_add(1);
    }

    /// Never goes below 1.
    pub fn decrease_quantity(&mut self) {
        self.selection.quantity = self.selection.quantity.saturating_sub(1).max(1);
    }

    /// Options currently picked for the highlighted merch item.
    pub fn pending_options(&self) -> LineOptions {
        let Some(item) = self.selected_merch() else {
            return LineOptions::default();
        };
        LineOptions {
            size: item.sizes.get(self.selection.size).cloned(),
            color: item.colors.get(self.selection.color).cloned(),
            variant: item.variants.get(self.selection.variant).cloned(),
        }
    }

    /// Put the highlighted merch item in the cart with the pending options and quantity.
    pub fn add_selected_to_cart(&mut self) -> Option<LineItemId> {
        let item = self.selected_merch()?.clone();
        let options = self.pending_options();
        let quantity = self.selection.quantity;

        let id = self
            .cart
            .lock()
            .ok()
            .and_then(|mut cart| cart.add_to_cart(&item, quantity, &options))?;

        debug!("added {quantity} x {id}");
        self.set_status(format!("Added {quantity} x {} to cart", item.title));
        self.selection.quantity = 1;
        Some(id)
    }

    /// Copy of the cart lines, in insertion order.
    pub fn cart_lines(&self) -> Vec<CartLineItem> {
        self.cart
            .lock()
            .map(|c| c.lines().to_vec())
            .unwrap_or_default()
    }

    pub fn cart_summary(&self) -> CartSummary {
        self.cart.lock().map(|c| c.summary()).unwrap_or_default()
    }

    fn selected_line_id(&self) -> Option<LineItemId> {
        self.cart
            .lock()
            .ok()
            .and_then(|c| c.lines().get(self.cart_selected).map(|l| l.id.clone()))
    }

    /// Step the highlighted cart line's quantity.
    pub fn adjust_selected_line(&mut self, delta: i64) {
        let Some(id) = self.selected_line_id() else {
            return;
        };
        if let Ok(mut cart) = self.cart.lock() {
            cart.adjust_quantity(&id, delta);
        }
    }

    pub fn remove_selected_line(&mut self) {
        let Some(id) = self.selected_line_id() else {
            return;
        };
        if let Ok(mut cart) = self.cart.lock() {
            cart.remove_from_cart(&id);
        }
        self.clamp_cart_selection();
        self.set_status("Removed from cart");
    }

    pub fn clear_cart(&mut self) {
        if let Ok(mut cart) = self.cart.lock() {
            cart.clear_cart();
        }
        self.cart_selected = 0;
        self.set_status("Cart cleared");
    }

    /// Keep the cart cursor on an existing line after the cart shrank.
    fn clamp_cart_selection(&mut self) {
        let len = self.cart_lines().len();
        if self.cart_selected >= len {
            self.cart_selected = len.saturating_sub(1);
        }
    }
}
