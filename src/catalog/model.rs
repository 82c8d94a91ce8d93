use serde::Deserialize;

use crate::cart::LineOptions;
use crate::library::Track;

/// A product that can be put in the cart. Prices stay textual (`"$24.99"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MerchandiseItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub price: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub variants: Vec<String>,
}

impl MerchandiseItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            image_url: String::new(),
            price: price.into(),
            sizes: Vec::new(),
            colors: Vec::new(),
            variants: Vec::new(),
        }
    }

    /// First entry of every option list, which is what a fresh selection starts with.
    pub fn default_options(&self) -> LineOptions {
        LineOptions {
            size: self.sizes.first().cloned(),
            color: self.colors.first().cloned(),
            variant: self.variants.first().cloned(),
        }
    }

    pub fn has_options(&self) -> bool {
        !(self.sizes.is_empty() && self.colors.is_empty() && self.variants.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub tracks: Vec<Track>,
    pub merch: Vec<MerchandiseItem>,
}

impl Catalog {
    pub fn merch_item(&self, id: &str) -> Option<&MerchandiseItem> {
        self.merch.iter().find(|m| m.id == id)
    }
}
