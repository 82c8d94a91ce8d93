use super::*;
use crate::catalog::MerchandiseItem;
use crate::config::CartSettings;
use proptest::prelude::*;

fn shirt() -> MerchandiseItem {
    let mut item = MerchandiseItem::new("me1", "Band Logo T-Shirt", "$24.99");
    item.sizes = vec!["S".into(), "M".into(), "L".into()];
    item
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn storefront_checkout_scenario() {
    let mut cart = CartStore::new();
    let product = shirt();
    let medium = LineOptions::default().size("M");
    let large = LineOptions::default().size("L");

    let m_id = cart.add_to_cart(&product, 2, &medium).unwrap();
    assert_eq!(cart.cart_item_count(), 2);
    assert!(close(cart.cart_total(), 49.98));

    cart.add_to_cart(&product, 1, &medium);
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.cart_item_count(), 3);
    assert!(close(cart.cart_total(), 74.97));

    cart.add_to_cart(&product, 1, &large);
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.cart_item_count(), 4);
    assert!(close(cart.cart_total(), 99.96));

    cart.remove_from_cart(&m_id);
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.cart_item_count(), 1);
    assert!(close(cart.cart_total(), 24.99));
}

#[test]
fn new_line_copies_product_fields_and_options() {
    let mut cart = CartStore::new();
    let mut product = shirt();
    product.image_url = "https://example.com/shirt.jpg".into();

    let id = cart
        .add_to_cart(&product, 1, &LineOptions::default().size(" XL ").color("Black"))
        .unwrap();
    let line = cart.line(&id).unwrap();
    assert_eq!(line.product_id, "me1");
    assert_eq!(line.title, "Band Logo T-Shirt");
    assert_eq!(line.price, "$24.99");
    assert_eq!(line.image_url, "https://example.com/shirt.jpg");
    assert_eq!(line.selected_size.as_deref(), Some("XL"));
    assert_eq!(line.selected_color.as_deref(), Some("Black"));
    assert_eq!(line.selected_variant, None);
    assert_eq!(line.options_label(), "Size: XL · Color: Black");
}

#[test]
fn add_zero_is_ignored() {
    let mut cart = CartStore::new();
    assert_eq!(cart.add_to_cart(&shirt(), 0, &LineOptions::default()), None);
    assert!(cart.is_empty());
}

#[test]
fn remove_unknown_line_is_a_no_op() {
    let mut cart = CartStore::new();
    cart.add_to_cart(&shirt(), 1, &LineOptions::default());
    let ghost = LineItemId::new("ghost", &LineOptions::default());

    cart.remove_from_cart(&ghost);
    cart.remove_from_cart(&ghost);
    assert_eq!(cart.cart_item_count(), 1);
}

#[test]
fn update_quantity_never_drops_below_one() {
    let mut cart = CartStore::new();
    let id = cart.add_to_cart(&shirt(), 3, &LineOptions::default()).unwrap();

    cart.update_quantity(&id, 0);
    assert_eq!(cart.line(&id).unwrap().quantity, 1);
    assert_eq!(cart.lines().len(), 1);

    cart.update_quantity(&id, 7);
    assert_eq!(cart.cart_item_count(), 7);
    assert!(close(cart.cart_total(), 7.0 * 24.99));

    let ghost = LineItemId::new("ghost", &LineOptions::default());
    cart.update_quantity(&ghost, 5);
    assert_eq!(cart.cart_item_count(), 7);
}

#[test]
fn adjust_quantity_steps_and_stops_at_one() {
    let mut cart = CartStore::new();
    let id = cart.add_to_cart(&shirt(), 2, &LineOptions::default()).unwrap();

    cart.adjust_quantity(&id, 1);
    assert_eq!(cart.line(&id).unwrap().quantity, 3);
    cart.adjust_quantity(&id, -2);
    assert_eq!(cart.line(&id).unwrap().quantity, 1);
    cart.adjust_quantity(&id, -1);
    assert_eq!(cart.line(&id).unwrap().quantity, 1);
}

#[test]
fn clear_cart_empties_everything() {
    let mut cart = CartStore::new();
    cart.add_to_cart(&shirt(), 2, &LineOptions::default().size("S"));
    cart.add_to_cart(&shirt(), 2, &LineOptions::default().size("M"));

    cart.clear_cart();
    assert!(cart.is_empty());
    assert_eq!(cart.summary(), CartSummary { item_count: 0, total: 0.0 });
}

#[test]
fn unparsable_price_counts_as_zero() {
    let mut cart = CartStore::new();
    cart.add_to_cart(&MerchandiseItem::new("sticker", "Sticker", "free"), 4, &LineOptions::default());
    cart.add_to_cart(&shirt(), 1, &LineOptions::default());

    assert_eq!(cart.cart_item_count(), 5);
    assert!(close(cart.cart_total(), 24.99));
}

#[test]
fn configured_cap_bounds_merges_and_updates() {
    let settings = CartSettings {
        max_line_quantity: Some(10),
        ..CartSettings::default()
    };
    let mut cart = CartStore::with_settings(&settings);
    let id = cart.add_to_cart(&shirt(), 8, &LineOptions::default()).unwrap();

    cart.add_to_cart(&shirt(), 8, &LineOptions::default());
    assert_eq!(cart.line(&id).unwrap().quantity, 10);

    cart.update_quantity(&id, 50);
    assert_eq!(cart.line(&id).unwrap().quantity, 10);
}

#[test]
fn quantity_is_unbounded_by_default() {
    let mut cart = CartStore::new();
    let id = cart.add_to_cart(&shirt(), u32::MAX, &LineOptions::default()).unwrap();
    cart.add_to_cart(&shirt(), 5, &LineOptions::default());
    assert_eq!(cart.line(&id).unwrap().quantity, u32::MAX);
}

#[test]
fn shared_cart_is_seen_by_every_holder() {
    let cart = CartStore::new().into_shared();
    let badge = cart.clone();

    cart.lock()
        .unwrap()
        .add_to_cart(&shirt(), 2, &LineOptions::default());
    assert_eq!(badge.lock().unwrap().cart_item_count(), 2);
}

#[derive(Debug, Clone)]
enum Op {
    Add { product: usize, size: usize, qty: u32 },
    Remove(usize),
    Update(usize, u32),
    Adjust(usize, i64),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..3usize, 0..3usize, 1..20u32).prop_map(|(product, size, qty)| Op::Add { product, size, qty }),
        1 => (0..6usize).prop_map(Op::Remove),
        2 => (0..6usize, 0..30u32).prop_map(|(i, q)| Op::Update(i, q)),
        2 => (0..6usize, -5..5i64).prop_map(|(i, d)| Op::Adjust(i, d)),
        1 => Just(Op::Clear),
    ]
}

fn products() -> Vec<MerchandiseItem> {
    vec![
        shirt(),
        MerchandiseItem::new("me2", "Signed Vinyl Record", "$59.99"),
        MerchandiseItem::new("me3", "Enamel Pin Set", "18.99 USD"),
    ]
}

proptest! {
    #[test]
    fn same_key_merges_and_other_options_split(q1 in 1..1000u32, q2 in 1..1000u32) {
        let mut cart = CartStore::new();
        let product = shirt();
        let opts = LineOptions::default().size("M").color("Red");

        cart.add_to_cart(&product, q1, &opts);
        cart.add_to_cart(&product, q2, &opts);
        prop_assert_eq!(cart.lines().len(), 1);
        prop_assert_eq!(cart.lines()[0].quantity, q1 + q2);

        cart.add_to_cart(&product, 1, &opts.clone().color("White"));
        prop_assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn aggregates_always_match_lines(ops in proptest::collection::vec(op(), 0..40)) {
        let catalog = products();
        let sizes = ["S", "M", "L"];
        let mut cart = CartStore::new();

        for op in ops {
            let ids: Vec<LineItemId> = cart.lines().iter().map(|l| l.id.clone()).collect();
            match op {
                Op::Add { product, size, qty } => {
                    cart.add_to_cart(&catalog[product], qty, &LineOptions::default().size(sizes[size]));
                }
                Op::Remove(i) => {
                    if let Some(id) = ids.get(i) { cart.remove_from_cart(id); }
                }
                Op::Update(i, q) => {
                    if let Some(id) = ids.get(i) { cart.update_quantity(id, q); }
                }
                Op::Adjust(i, d) => {
                    if let Some(id) = ids.get(i) { cart.adjust_quantity(id, d); }
                }
                Op::Clear => cart.clear_cart(),
            }

            let expected_count: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
            let expected_total: f64 = cart
                .lines()
                .iter()
                .map(|l| parse_price(&l.price) * f64::from(l.quantity))
                .sum();
            prop_assert_eq!(cart.cart_item_count(), expected_count);
            prop_assert!((cart.cart_total() - expected_total).abs() < 1e-6);
            prop_assert!(cart.lines().iter().all(|l| l.quantity >= 1));
        }
    }
}
