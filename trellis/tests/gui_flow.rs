//! End-to-end flows: a widget file loaded into a Gui, driven by host events.

use std::rc::Rc;

use trellis::{
    AssetCache, Callback, ComboBox, DrawList, Event, Gui, Key, ListBox, MemoryTextureProvider, MessageBox, MouseButton,
    Point, ScrollDelta, Widget, WidgetEvent, WidgetLoader,
};

const FORM: &str = r#"{
    "widgets": [
        {
            "type": "ComboBox",
            "name": "colors",
            "position": [10, 10],
            "size": [150, 20],
            "skin": "combo",
            "items_to_display": 3,
            "items": ["Foo", "Bar", "Baz"]
        },
        {
            "type": "listbox",
            "name": "files",
            "position": [300, 10],
            "size": [200, 240],
            "scrollbar": "bar",
            "item_height": 24,
            "items": ["a.txt", "b.txt", "c.txt", "d.txt"],
            "renderer": { "SelectedBackgroundColor": "rgb(0, 128, 0)" }
        },
        {
            "type": "messagebox",
            "name": "confirm",
            "position": [10, 300],
            "title": "Quit",
            "text": "Discard changes?",
            "buttons": ["Yes", "No"]
        }
    ]
}"#;

fn gui() -> Gui {
    let assets = AssetCache::new(
        MemoryTextureProvider::new()
            .with_texture("combo/Normal.png", 20, 20)
            .with_texture("combo/Hover.png", 20, 20)
            .with_texture("bar/Arrow.png", 16, 16)
            .with_texture("bar/Track.png", 16, 16)
            .with_texture("bar/Thumb.png", 16, 16),
    );
    let mut gui = Gui::new(Rc::new(assets));
    WidgetLoader::default().load_str(&mut gui, FORM).unwrap();
    gui
}

fn click(gui: &mut Gui, x: f32, y: f32) {
    let position = Point::new(x, y);
    gui.handle_event(&Event::MouseMoved { position });
    gui.handle_event(&Event::MousePressed {
        button: MouseButton::Left,
        position,
    });
    gui.handle_event(&Event::MouseReleased {
        button: MouseButton::Left,
        position,
    });
}

fn drain(gui: &mut Gui) -> Vec<Callback> {
    std::iter::from_fn(|| gui.poll_callback()).collect()
}

#[test]
fn form_loads_in_file_order() {
    let gui = gui();
    assert_eq!(gui.widget_names(), ["colors", "files", "confirm"]);
    assert_eq!(gui.get::<ComboBox>("colors").unwrap().items().len(), 3);
    assert_eq!(gui.get::<ListBox>("files").unwrap().scrollbar().unwrap().maximum(), 4 * 24);
    assert_eq!(gui.get::<MessageBox>("confirm").unwrap().buttons().len(), 2);
}

#[test]
fn picking_from_combo_closes_it_with_one_callback() {
    let mut gui = gui();

    click(&mut gui, 50.0, 20.0);
    assert!(gui.get::<ComboBox>("colors").unwrap().is_list_open());
    assert!(drain(&mut gui).is_empty());

    // Header is 20 high, so the first row spans y 30..50.
    click(&mut gui, 50.0, 35.0);

    let combo = gui.get::<ComboBox>("colors").unwrap();
    assert!(!combo.is_list_open());
    assert_eq!(combo.selected_item(), "Foo");
    assert_eq!(
        drain(&mut gui),
        [Callback {
            widget: "colors".into(),
            event: WidgetEvent::ItemSelected { id: 1, text: "Foo".into() },
        }]
    );
}

#[test]
fn clicking_elsewhere_closes_open_combo() {
    let mut gui = gui();
    click(&mut gui, 50.0, 20.0);
    click(&mut gui, 400.0, 30.0);

    assert!(!gui.get::<ComboBox>("colors").unwrap().is_list_open());
    let callbacks = drain(&mut gui);
    assert_eq!(callbacks.len(), 1);
    assert_eq!(callbacks[0].widget, "files");
}

#[test]
fn list_box_click_selects_row() {
    let mut gui = gui();
    click(&mut gui, 320.0, 10.0 + 24.0 * 2.0 + 5.0);

    assert_eq!(gui.get::<ListBox>("files").unwrap().selected_item(), "c.txt");
    assert_eq!(
        drain(&mut gui)[0].event,
        WidgetEvent::ItemSelected { id: 3, text: "c.txt".into() }
    );

    // Below the last item clears the selection.
    click(&mut gui, 320.0, 10.0 + 24.0 * 8.0);
    assert_eq!(
        drain(&mut gui)[0].event,
        WidgetEvent::ItemSelected { id: 0, text: String::new() }
    );
}

#[test]
fn keys_go_to_the_focused_widget() {
    let mut gui = gui();
    assert!(!gui.handle_event(&Event::KeyPressed(Key::Down)));

    click(&mut gui, 320.0, 15.0);
    drain(&mut gui);
    gui.handle_event(&Event::KeyPressed(Key::Down));

    assert_eq!(
        drain(&mut gui),
        [Callback {
            widget: "files".into(),
            event: WidgetEvent::ItemSelected { id: 2, text: "b.txt".into() },
        }]
    );
    assert_eq!(gui.get::<ComboBox>("colors").unwrap().selected_item_id(), 0);
}

#[test]
fn message_box_button_round_trip() {
    let mut gui = gui();
    let target = {
        let message_box = gui.get::<MessageBox>("confirm").unwrap();
        let button = &message_box.buttons()[1];
        let origin = message_box.position();
        // One pixel border, then the title bar.
        Point::new(
            origin.x + 1.0 + button.position().x + button.size().width / 2.0,
            origin.y + 1.0 + 20.0 + button.position().y + button.size().height / 2.0,
        )
    };
    click(&mut gui, target.x, target.y);

    assert_eq!(
        drain(&mut gui),
        [Callback {
            widget: "confirm".into(),
            event: WidgetEvent::ButtonPressed { caption: "No".into() },
        }]
    );
}

#[test]
fn wheel_over_list_without_overflow_is_inert() {
    let mut gui = gui();
    gui.handle_event(&Event::WheelScrolled {
        delta: ScrollDelta::Lines { x: 0.0, y: -3.0 },
        position: Point::new(320.0, 50.0),
    });
    assert_eq!(gui.get::<ListBox>("files").unwrap().scrollbar().unwrap().value(), 0);
}

#[test]
fn focus_loss_resets_open_combo() {
    let mut gui = gui();
    click(&mut gui, 50.0, 20.0);
    gui.handle_event(&Event::FocusLost);
    assert!(!gui.get::<ComboBox>("colors").unwrap().is_list_open());
}

#[test]
fn draw_reflects_selection_and_colors() {
    let mut gui = gui();
    gui.get_mut::<ListBox>("files").unwrap().set_selected_item("b.txt");

    let mut list = DrawList::new();
    gui.draw(&mut list);

    assert!(list.text_runs().any(|run| run.text == "b.txt"));
    assert!(list.text_runs().any(|run| run.text == "Discard changes?"));
    assert!(
        list.solid_rects()
            .any(|r| r.color == trellis::Color::rgb(0, 128, 0))
    );
}

#[test]
fn save_and_reload_through_a_file() {
    let gui = gui();
    let loader = WidgetLoader::default();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form.json");
    loader.save_file(&gui, &path).unwrap();

    let mut reloaded = Gui::new(Rc::clone(gui.assets()));
    loader.load_file(&mut reloaded, &path).unwrap();

    assert_eq!(loader.save(&reloaded).unwrap(), loader.save(&gui).unwrap());
    let files = reloaded.get::<ListBox>("files").unwrap();
    assert_eq!(files.size(), gui.get::<ListBox>("files").unwrap().size());
    assert_eq!(files.colors().selected_background, trellis::Color::rgb(0, 128, 0));
}
