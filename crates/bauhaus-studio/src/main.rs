//! Scripted, headless tour of the widget engine: builds the controls of
//! a film-grain module, replays an input session against them and prints
//! every commit the host would receive.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use bauhaus_core::logging::{init_logging, LoggingConfig};
use bauhaus_ui::prelude::*;

fn layout(y: f64) -> WidgetLayout {
    WidgetLayout {
        rect: Rect::new(0.0, y, 260.0, 48.0),
        margin: Margins::uniform(2.0),
        padding: Margins::uniform(4.0),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  bauhaus studio — film grain");
    println!("  ───────────────────────────");

    let engine = Bauhaus::new(EngineConfig::default());
    let theme = Theme::default();
    let measure = MonospaceMeasure { char_width: 7.0 };

    // ── strength: a percent slider bound to a float field ─────────────────
    let strength_field = Rc::new(Cell::new(0.0f32));
    let mut strength = Slider::with_range(&engine, 0.0, 1.0, 0.01, 0.25, 3);
    strength.set_label(Some("film grain"), "strength");
    strength.set_format("%");
    strength.set_layout(layout(0.0));
    strength.bind(SliderBinding::with_hook(
        SliderSlot::Float(Rc::clone(&strength_field)),
        Box::new(|prev| println!("  strength field changed (was {prev:?})")),
    ));
    strength.on_value_changed(Box::new(|v| println!("  strength -> {v:.3}")));
    strength.on_quad_pressed(Box::new(|on| {
        println!("  grain preview {}", if on { "on" } else { "off" });
    }));
    strength.set_quad_toggle(true);

    // ── coarseness: a gradient-annotated slider ───────────────────────────
    let mut coarseness = Slider::with_range(&engine, 100.0, 3200.0, 0.0, 400.0, 0);
    coarseness.set_label(Some("film grain"), "coarseness");
    coarseness.set_format(" ISO");
    coarseness.set_layout(layout(50.0));
    coarseness.set_stop(0.0, Color::gray(0.2));
    coarseness.set_stop(1.0, Color::gray(0.8));
    coarseness.on_value_changed(Box::new(|v| println!("  coarseness -> {v:.0} ISO")));

    // ── mode: a combobox with an insensitive entry ────────────────────────
    let mut mode = Combobox::new(&engine);
    mode.set_label(Some("film grain"), "mode");
    mode.set_layout(layout(100.0));
    mode.add_list(["uniform", "poisson", "halton (coming soon)"]);
    mode.set_entry_sensitive(2, false);
    mode.on_active_changed(Box::new(|i| println!("  mode -> entry {i}")));

    let m = theme.metrics;
    let t0 = Instant::now();

    // drag the strength bar: provisional moves, one commit on release
    println!("\n  [drag] strength to ~30%");
    strength.on_event(
        &UiEvent::ButtonPress {
            pos: Vec2::new(80.0, 30.0),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            double: false,
        },
        &m,
        t0,
    );
    strength.on_event(&UiEvent::Motion { pos: Vec2::new(70.0, 30.0), dragging: true }, &m, t0);
    strength.on_event(
        &UiEvent::ButtonRelease { pos: Vec2::new(70.0, 30.0), button: MouseButton::Left },
        &m,
        t0 + Duration::from_millis(120),
    );

    // scroll steps coalesce into a single debounced commit
    println!("\n  [scroll] three coarseness ticks, one commit");
    let mut t = t0 + Duration::from_millis(500);
    for _ in 0..3 {
        coarseness.on_event(&UiEvent::Scroll { delta: -1.0, modifiers: Modifiers::NONE }, &m, t);
        t += Duration::from_millis(80);
    }
    coarseness.update(t + engine.commit_delay());

    // precision popup with a typed expression
    println!("\n  [popup] strength = x*2 via keyboard");
    let t1 = t + Duration::from_millis(400);
    strength.show_popup(t1);
    popup::handle_event(
        PopupTarget::Slider(&mut strength),
        &UiEvent::TextInput { text: "x*2".to_owned() },
        &m,
        t1,
    );
    popup::handle_event(
        PopupTarget::Slider(&mut strength),
        &UiEvent::KeyPress { key: Key::Enter, modifiers: Modifiers::NONE },
        &m,
        t1,
    );

    // combobox popup driven by prefix matching
    println!("\n  [popup] mode by typing a prefix");
    let t2 = t1 + Duration::from_millis(300);
    mode.show_popup(&m, t2);
    popup::handle_event(
        PopupTarget::Combo(&mut mode),
        &UiEvent::TextInput { text: "poi".to_owned() },
        &m,
        t2,
    );
    popup::handle_event(
        PopupTarget::Combo(&mut mode),
        &UiEvent::KeyPress { key: Key::Enter, modifiers: Modifiers::NONE },
        &m,
        t2,
    );

    // toggle the preview quad
    println!("\n  [quad] preview toggle");
    strength.on_event(
        &UiEvent::ButtonPress {
            pos: Vec2::new(250.0, 12.0),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            double: false,
        },
        &m,
        t2,
    );

    // one paint pass over everything
    let mut list = DrawList::new();
    let mut painter = Painter::new(&mut list, &theme, &measure);
    render::paint_slider(&strength, true, &mut painter);
    render::paint_slider(&coarseness, false, &mut painter);
    render::paint_combobox(&mode, false, &mut painter);

    println!();
    println!("  strength field   {:.3}", strength_field.get());
    println!("  strength shown   {}", strength.text());
    println!("  coarseness shown {}", coarseness.text());
    println!("  mode             {}", mode.active_label().unwrap_or("-"));
    println!("  draw commands    {}", list.len());
    println!();

    log::info!("session done, {} draw commands recorded", list.len());
    Ok(())
}
