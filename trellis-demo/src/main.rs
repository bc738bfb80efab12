//! Trellis demo - a scripted session against an in-memory form.
//!
//! Usage: `trellis-demo [CONFIG.json FORM.json]`. Without arguments the
//! demo uses built-in skins and a built-in form.

use std::rc::Rc;

use anyhow::Context;
use trellis::{
    AssetCache, DrawList, Event, Gui, MemoryTextureProvider, MouseButton, Point, ScrollDelta, ToolkitConfig,
    WidgetLoader,
};
use tracing_subscriber::EnvFilter;

const FORM: &str = r##"{
    "widgets": [
        {
            "type": "combobox",
            "name": "fruit",
            "position": [20, 20],
            "size": [160, 20],
            "skin": "combo",
            "scrollbar": "bar",
            "items_to_display": 3,
            "items": ["Apple", "Banana", "Cherry", "Damson", "Elderberry"]
        },
        {
            "type": "listbox",
            "name": "log",
            "position": [220, 20],
            "size": [240, 120],
            "scrollbar": "bar",
            "item_height": 20,
            "renderer": { "Borders": "(2, 2, 2, 2)", "SelectedBackgroundColor": "#3366CC" }
        },
        {
            "type": "messagebox",
            "name": "confirm",
            "position": [20, 200],
            "title": "Order",
            "text": "Place the order?",
            "buttons": ["OK", "Cancel"]
        }
    ]
}"##;

fn builtin_gui() -> anyhow::Result<Gui> {
    let assets = AssetCache::new(
        MemoryTextureProvider::new()
            .with_texture("combo/Normal.png", 20, 20)
            .with_texture("combo/Hover.png", 20, 20)
            .with_texture("bar/Arrow.png", 16, 16)
            .with_texture("bar/Track.png", 16, 16)
            .with_texture("bar/Thumb.png", 16, 16),
    );
    let mut gui = Gui::new(Rc::new(assets));
    WidgetLoader::default()
        .load_str(&mut gui, FORM)
        .context("loading built-in form")?;
    Ok(gui)
}

fn file_gui(config: &str, form: &str) -> anyhow::Result<Gui> {
    let config = ToolkitConfig::load(config).with_context(|| format!("reading config {config}"))?;
    let mut gui = Gui::with_config(&config);
    WidgetLoader::default()
        .load_file(&mut gui, form)
        .with_context(|| format!("loading form {form}"))?;
    Ok(gui)
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

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut gui = match args.as_slice() {
        [config, form] => file_gui(config, form)?,
        [] => builtin_gui()?,
        _ => anyhow::bail!("usage: trellis-demo [CONFIG.json FORM.json]"),
    };
    tracing::info!(widgets = ?gui.widget_names(), "form loaded");

    // Open the combo box, scroll its list and pick the second visible row.
    click(&mut gui, 60.0, 30.0);
    gui.handle_event(&Event::WheelScrolled {
        delta: ScrollDelta::Lines { x: 0.0, y: -1.0 },
        position: Point::new(60.0, 50.0),
    });
    click(&mut gui, 60.0, 65.0);

    // Press the first message box button.
    click(&mut gui, 60.0, 260.0);

    while let Some(callback) = gui.poll_callback() {
        tracing::info!(widget = %callback.widget, event = ?callback.event, "callback");
    }

    let mut frame = DrawList::new();
    gui.draw(&mut frame);
    tracing::info!(
        primitives = frame.len(),
        rects = frame.solid_rects().count(),
        text_runs = frame.text_runs().count(),
        textures = frame.textured_quads().count(),
        "frame recorded"
    );

    println!("{}", WidgetLoader::default().save(&gui)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis::{ComboBox, ListBox, Widget};

    #[test]
    fn builtin_form_loads() {
        let gui = builtin_gui().unwrap();
        assert_eq!(gui.widget_names(), ["fruit", "log", "confirm"]);
        assert_eq!(gui.get::<ComboBox>("fruit").unwrap().items().len(), 5);

        let log = gui.get::<ListBox>("log").unwrap();
        assert_eq!(log.colors().selected_background, trellis::Color::rgb(0x33, 0x66, 0xCC));
        assert_eq!(log.borders(), trellis::Borders::uniform(2));
        assert_eq!(log.position(), Point::new(220.0, 20.0));
    }

    #[test]
    fn scripted_session_picks_a_fruit() {
        let mut gui = builtin_gui().unwrap();
        click(&mut gui, 60.0, 30.0);
        assert!(gui.get::<ComboBox>("fruit").unwrap().is_list_open());

        click(&mut gui, 60.0, 45.0);
        let callback = gui.poll_callback().unwrap();
        assert_eq!(callback.widget, "fruit");
        assert_eq!(gui.get::<ComboBox>("fruit").unwrap().selected_item(), "Apple");
    }
}
