//! Item collection behaviour of the list box, driven through the public API.

use std::rc::Rc;

use trellis::{AssetCache, Color, ListBox, MemoryTextureProvider, PropertyValue, Serializer, Widget};

fn assets() -> Rc<AssetCache> {
    Rc::new(AssetCache::new(
        MemoryTextureProvider::new()
            .with_texture("bar/Arrow.png", 16, 16)
            .with_texture("bar/Track.png", 16, 16)
            .with_texture("bar/Thumb.png", 16, 16),
    ))
}

/// Ten rows of 24 pixels, no scrollbar.
fn plain() -> ListBox {
    let mut list = ListBox::new(assets());
    list.load(200, 240, "", 24).unwrap();
    list
}

fn scrolling() -> ListBox {
    let mut list = ListBox::new(assets());
    list.load(200, 240, "bar", 24).unwrap();
    list
}

/// Deterministic pseudo-random sequence for the mixed add/remove walk.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound.max(1)
    }
}

fn assert_selection_valid(list: &ListBox) {
    let selected = list.selected_item_id();
    assert!(selected <= list.items().len(), "selection {selected} dangles");
    if selected == 0 {
        assert_eq!(list.selected_item(), "");
    } else {
        assert_eq!(list.selected_item(), list.items()[selected - 1]);
    }
}

// =========================================================================
// Selection
// =========================================================================

#[test]
fn selection_never_dangles() {
    let mut list = scrolling();
    let mut rng = Lcg(7);

    for step in 0..500 {
        match rng.next(5) {
            0 | 1 => {
                list.add_item(format!("Item{}", rng.next(8)));
            }
            2 => {
                let id = rng.next(list.items().len() + 2);
                list.remove_item(id);
            }
            3 => {
                list.remove_item_by_text(&format!("Item{}", rng.next(8)));
            }
            _ => {
                let id = rng.next(list.items().len() + 2);
                list.set_selected_item_id(id);
            }
        }
        assert_selection_valid(&list);
        let bar = list.scrollbar().unwrap();
        assert_eq!(
            bar.maximum(),
            list.items().len() as u32 * list.item_height(),
            "scrollbar maximum out of date at step {step}"
        );
    }
}

#[test]
fn removing_before_selection_shifts_it_down() {
    for k in 1..=5 {
        for selected in 1..=5 {
            let mut list = plain();
            for i in 1..=5 {
                list.add_item(format!("Item{i}"));
            }
            list.set_selected_item_id(selected);
            list.remove_item(k);

            let expected = match selected {
                s if s == k => 0,
                s if s > k => s - 1,
                s => s,
            };
            assert_eq!(list.selected_item_id(), expected, "remove {k} with {selected} selected");
        }
    }
}

#[test]
fn remove_first_of_five_keeps_logical_selection() {
    let mut list = plain();
    for i in 1..=5 {
        list.add_item(format!("Item{i}"));
    }
    assert!(list.set_selected_item_id(3));
    assert!(list.remove_item(1));

    assert_eq!(list.selected_item_id(), 2);
    assert_eq!(list.selected_item(), "Item3");
}

#[test]
fn failed_selection_clears() {
    let mut list = plain();
    list.add_item("Foo");
    assert!(list.set_selected_item("Foo"));
    assert!(!list.set_selected_item("Bar"));
    assert_eq!(list.selected_item_id(), 0);
    assert_eq!(list.find_item("Bar"), None);
    assert_eq!(list.item_id("Bar"), 0);
}

// =========================================================================
// Geometry
// =========================================================================

#[test]
fn item_height_is_clamped() {
    let mut list = plain();
    for requested in [0, 1, 9, 10, 11, 24] {
        list.set_item_height(requested);
        assert_eq!(list.item_height(), requested.max(10));
    }
}

#[test]
fn snapping_is_idempotent() {
    let mut list = plain();
    for height in [0.0, 13.0, 100.0, 250.0, 251.0, 500.0] {
        list.set_size(200.0, height);
        let once = list.size();
        list.set_size(200.0, height);
        assert_eq!(list.size(), once);
        assert_eq!(once.height % list.item_height(), 0);
    }
}

#[test]
fn capacity_without_scrollbar() {
    let mut list = plain();
    for i in 1..=10 {
        assert_eq!(list.add_item(format!("Item{i}")), i);
    }
    assert_eq!(list.add_item("Item11"), 0);
    assert_eq!(list.items().len(), 10);
    assert_eq!(list.items().last().map(String::as_str), Some("Item10"));
}

#[test]
fn shrinking_drops_tail_items() {
    let mut list = plain();
    for i in 1..=10 {
        list.add_item(format!("Item{i}"));
    }
    list.set_selected_item("Item9");
    list.set_size(200.0, 120.0);

    assert_eq!(list.items().len(), 5);
    assert_eq!(list.selected_item_id(), 0);
    assert_eq!(list.add_item("again"), 0);
}

#[test]
fn scrollbar_lifts_capacity() {
    let mut list = scrolling();
    for i in 1..=30 {
        assert_eq!(list.add_item(format!("Item{i}")), i);
    }
    assert_eq!(list.scrollbar().unwrap().maximum(), 30 * 24);

    list.remove_scrollbar();
    assert_eq!(list.items().len(), 10);
}

// =========================================================================
// Properties
// =========================================================================

#[test]
fn color_serialization() {
    let serializer = Serializer::default();
    assert_eq!(
        serializer.serialize(&PropertyValue::Color(Color::rgba(255, 0, 0, 255))).unwrap(),
        "rgb(255, 0, 0)"
    );
    assert_eq!(
        serializer.serialize(&PropertyValue::Color(Color::rgba(255, 0, 0, 128))).unwrap(),
        "rgba(255, 0, 0, 128)"
    );
}

#[test]
fn colors_do_not_touch_selection_or_scroll() {
    use trellis::RendererProperties;

    let mut list = scrolling();
    for i in 1..=20 {
        list.add_item(format!("Item{i}"));
    }
    list.set_selected_item_id(4);
    list.mouse_wheel_moved(-2, list.position());
    let value = list.scrollbar().unwrap().value();

    list.set_property_str("selectedbackgroundcolor", "rgb(10, 20, 30)").unwrap();
    list.set_text_color(Color::GREEN);

    assert_eq!(list.selected_item_id(), 4);
    assert_eq!(list.scrollbar().unwrap().value(), value);
    assert_eq!(list.colors().selected_background, Color::rgb(10, 20, 30));
}
