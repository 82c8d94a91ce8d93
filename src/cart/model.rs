use std::fmt;

use crate::catalog::MerchandiseItem;

/// Token used in a line id for an option that was not chosen.
const NO_OPTION: &str = "none";

/// Options picked for a product. Blank strings count as "not chosen".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineOptions {
    pub size: Option<String>,
    pub color: Option<String>,
    pub variant: Option<String>,
}

impl LineOptions {
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }
}

/// Trim and collapse inner whitespace; `None` for blank input.
fn normalize(value: Option<&str>) -> Option<String> {
    let joined = value?.split_whitespace().collect::<Vec<_>>().join(" ");
    if joined.is_empty() { None } else { Some(joined) }
}

fn escape(component: &str) -> String {
    // A literal option equal to the sentinel is written `%none` so it never
    // collides with an absent option.
    if component == NO_OPTION {
        return format!("%{NO_OPTION}");
    }
    let mut out = String::with_capacity(component.len());
    for ch in component.chars() {
        match ch {
            '%' => out.push_str("%25"),
            ':' => out.push_str("%3A"),
            _ => out.push(ch),
        }
    }
    out
}

/// Deterministic key of a cart line: product id plus normalized options.
///
/// Equal product/option combinations always produce the same id and
/// different combinations never share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineItemId(String);

impl LineItemId {
    pub fn new(product_id: &str, options: &LineOptions) -> Self {
        let part = |v: &Option<String>| {
            normalize(v.as_deref())
                .map(|v| escape(&v))
                .unwrap_or_else(|| NO_OPTION.to_string())
        };
        Self(format!(
            "{}:{}:{}:{}",
            escape(product_id),
            part(&options.size),
            part(&options.color),
            part(&options.variant)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line in the cart. Product fields are copied when the line is created.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    pub id: LineItemId,
    pub product_id: String,
    pub title: String,
    pub price: String,
    pub image_url: String,
    pub quantity: u32,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
    pub selected_variant: Option<String>,
}

impl CartLineItem {
    pub(super) fn new(
        id: LineItemId,
        product: &MerchandiseItem,
        quantity: u32,
        options: &LineOptions,
    ) -> Self {
        Self {
            id,
            product_id: product.id.clone(),
            title: product.title.clone(),
            price: product.price.clone(),
            image_url: product.image_url.clone(),
            quantity,
            selected_size: normalize(options.size.as_deref()),
            selected_color: normalize(options.color.as_deref()),
            selected_variant: normalize(options.variant.as_deref()),
        }
    }

    /// Parsed unit price times quantity.
    pub fn subtotal(&self) -> f64 {
        super::parse_price(&self.price) * f64::from(self.quantity)
    }

    /// "Variant: .. · Size: .. · Color: .." for whichever options are set.
    pub fn options_label(&self) -> String {
        [
            ("Variant", &self.selected_variant),
            ("Size", &self.selected_size),
            ("Color", &self.selected_color),
        ]
        .iter()
        .filter_map(|(label, v)| v.as_ref().map(|v| format!("{label}: {v}")))
        .collect::<Vec<_>>()
        .join(" · ")
    }
}
