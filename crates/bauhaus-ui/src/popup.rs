//! The popup singleton: one precision popup (slider) or drop-down list
//! (combobox) may be open at a time, owned by the engine.
//!
//! The popup previews values provisionally; the owning widget's state is
//! only committed on accept (click, Enter) and restored on reject
//! (Escape, click outside). Keyboard input accumulates in a small query
//! buffer used for arithmetic entry on sliders and prefix matching on
//! comboboxes.

use std::rc::Rc;
use std::time::Instant;

use bauhaus_core::coords::{Rect, Vec2};
use bauhaus_core::input::{Key, MouseButton};

use crate::calc;
use crate::combobox::Combobox;
use crate::engine::{Bauhaus, WidgetId};
use crate::event::{EventResult, UiEvent};
use crate::geometry;
use crate::slider::Slider;
use crate::theme::ThemeMetrics;

/// Byte bound on the keyboard query buffer.
pub const KEYS_MAX: usize = 64;

/// Shift a popup up so it fits above the viewport bottom.
#[inline]
pub(crate) fn clamp_to_viewport(y: f64, height: f64, viewport_height: f64) -> f64 {
    if y + height > viewport_height { (viewport_height - height).max(0.0) } else { y }
}

#[derive(Default)]
pub struct PopupState {
    owner: Option<WidgetId>,
    rect: Rect,
    opened_at: Option<Instant>,
    /// Set once a press decided the popup's fate; the matching release
    /// closes it.
    hiding: bool,
    keys: String,
    /// Last cursor position in popup-local coordinates.
    mouse: Vec2,
}

impl PopupState {
    /// Open for a new owner. An already open popup is evicted without
    /// committing; its provisional state is simply dropped.
    pub(crate) fn open(&mut self, owner: WidgetId, rect: Rect, now: Instant) {
        self.owner = Some(owner);
        self.rect = rect;
        self.opened_at = Some(now);
        self.hiding = false;
        self.keys.clear();
        self.mouse = Vec2::new(rect.w / 2.0, 0.0);
    }

    pub(crate) fn hide(&mut self) {
        self.owner = None;
        self.opened_at = None;
        self.hiding = false;
        self.keys.clear();
    }

    pub fn is_open(&self) -> bool {
        self.owner.is_some()
    }

    pub fn is_open_for(&self, id: WidgetId) -> bool {
        self.owner == Some(id)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn keys(&self) -> &str {
        &self.keys
    }

    pub fn mouse(&self) -> Vec2 {
        self.mouse
    }
}

/// The widget a popup event is routed to.
pub enum PopupTarget<'a> {
    Slider(&'a mut Slider),
    Combo(&'a mut Combobox),
}

impl PopupTarget<'_> {
    fn id(&self) -> WidgetId {
        match self {
            PopupTarget::Slider(s) => s.id(),
            PopupTarget::Combo(c) => c.id(),
        }
    }

    fn engine(&self) -> Rc<Bauhaus> {
        match self {
            PopupTarget::Slider(s) => Rc::clone(&s.common.engine),
            PopupTarget::Combo(c) => Rc::clone(&c.common.engine),
        }
    }
}

/// Indices of the entries a combobox popup currently shows: all of them,
/// or the case-folded prefix matches of the query buffer.
pub(crate) fn visible_entries(combo: &Combobox, keys: &str) -> Vec<usize> {
    if keys.is_empty() {
        return (0..combo.len()).collect();
    }
    let needle = keys.to_lowercase();
    combo
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| e.label.to_lowercase().starts_with(&needle))
        .map(|(i, _)| i)
        .collect()
}

// ── accept / reject ───────────────────────────────────────────────────────

/// Commit the previewed slider position. The provisional position is put
/// back first so the setter sees a real change from the committed state.
fn accept_slider(s: &mut Slider, debounce: Option<Instant>) {
    let value = s.position();
    s.pos = s.oldpos;
    s.set_normalized(value, true, debounce);
}

fn reject_slider(s: &mut Slider) {
    let old = s.oldpos;
    s.set_normalized(old, true, None);
}

fn accept_combo(c: &mut Combobox, debounce: Option<Instant>) {
    let hovered = c.hovered;
    if hovered >= 0 && c.entry_sensitive(hovered as usize) {
        match debounce {
            Some(now) => c.set_active_debounced(hovered, now),
            None => c.set_active(hovered),
        }
    }
}

// rejecting a combobox drops the hover preview, nothing was moved

fn slider_preview(s: &mut Slider, rect: Rect, mouse: Vec2, m: &ThemeMetrics) {
    let x = mouse.x / rect.w;
    let y = mouse.y / rect.h;
    let header = m.line_height / rect.h;
    let off = geometry::slider_line_offset(s.oldpos as f64, s.magnifier_scale(), x, y, header);
    s.pos = (s.oldpos as f64 + off).clamp(0.0, 1.0) as f32;
}

fn hovered_from_cursor(combo: &Combobox, keys: &str, local: Vec2, m: &ThemeMetrics) -> i32 {
    let mut row = (local.y / geometry::row_height(m)).floor() as i64;
    if !keys.is_empty() {
        // the query occupies the top row
        row -= 1;
    }
    if row < 0 {
        return -1;
    }
    let visible = visible_entries(combo, keys);
    visible.get(row as usize).map_or(-1, |&i| i as i32)
}

/// Route one event to the open popup of `target`. Returns `Ignored` when
/// the popup is not open for that widget.
pub fn handle_event(
    target: PopupTarget<'_>,
    event: &UiEvent,
    m: &ThemeMetrics,
    now: Instant,
) -> EventResult {
    let engine = target.engine();
    let (rect, opened_at, hiding, keys) = {
        let state = engine.popup.borrow();
        if !state.is_open_for(target.id()) {
            return EventResult::Ignored;
        }
        (state.rect, state.opened_at, state.hiding, state.keys.clone())
    };
    let within_grace = opened_at
        .is_some_and(|t| now.duration_since(t) < engine.double_click_time());

    match (target, event) {
        // ── button press ──────────────────────────────────────────────────
        (PopupTarget::Combo(combo), UiEvent::ButtonPress { pos, button, .. }) => {
            let local = *pos - rect.origin();
            if *button == MouseButton::Left && within_grace {
                // a press this soon after opening is the second half of a
                // double click: back to the default entry
                let default = combo.default_index();
                combo.set_active(default);
                engine.popup.borrow_mut().hide();
                return EventResult::Consumed;
            }
            if !rect.contains(*pos) {
                engine.popup.borrow_mut().hide();
                return EventResult::Ignored;
            }
            match button {
                MouseButton::Left => {
                    combo.hovered = hovered_from_cursor(combo, &keys, local, m);
                    accept_combo(combo, None);
                    engine.popup.borrow_mut().hiding = true;
                    EventResult::Consumed
                }
                _ => {
                    engine.popup.borrow_mut().hiding = true;
                    EventResult::Consumed
                }
            }
        }
        (PopupTarget::Slider(slider), UiEvent::ButtonPress { pos, button, .. }) => {
            if !rect.contains(*pos) {
                reject_slider(slider);
                engine.popup.borrow_mut().hide();
                return EventResult::Ignored;
            }
            let local = *pos - rect.origin();
            match button {
                MouseButton::Left => {
                    slider.is_dragging = true;
                    engine.popup.borrow_mut().mouse = local;
                    slider_preview(slider, rect, local, m);
                    accept_slider(slider, None);
                    engine.popup.borrow_mut().hiding = true;
                    EventResult::Consumed
                }
                MouseButton::Middle => {
                    slider.zoom_range(0.0);
                    EventResult::Consumed
                }
                MouseButton::Right => {
                    reject_slider(slider);
                    engine.popup.borrow_mut().hiding = true;
                    EventResult::Consumed
                }
            }
        }

        // ── button release ────────────────────────────────────────────────
        (PopupTarget::Slider(slider), UiEvent::ButtonRelease { .. }) => {
            slider.is_dragging = false;
            if hiding {
                engine.popup.borrow_mut().hide();
            }
            EventResult::Consumed
        }
        (PopupTarget::Combo(combo), UiEvent::ButtonRelease { pos, button }) => {
            if hiding {
                engine.popup.borrow_mut().hide();
                return EventResult::Consumed;
            }
            // the release that ends the opening press is ignored; a later
            // release selects whatever the cursor is over
            if *button == MouseButton::Left && !within_grace {
                let local = *pos - rect.origin();
                combo.hovered = hovered_from_cursor(combo, &keys, local, m);
                accept_combo(combo, None);
                engine.popup.borrow_mut().hide();
            }
            EventResult::Consumed
        }

        // ── motion ────────────────────────────────────────────────────────
        (PopupTarget::Slider(slider), UiEvent::Motion { pos, .. }) => {
            let local = *pos - rect.origin();
            engine.popup.borrow_mut().mouse = local;
            slider_preview(slider, rect, local, m);
            EventResult::Consumed
        }
        (PopupTarget::Combo(combo), UiEvent::Motion { pos, .. }) => {
            let local = *pos - rect.origin();
            engine.popup.borrow_mut().mouse = local;
            combo.hovered = hovered_from_cursor(combo, &keys, local, m);
            EventResult::Consumed
        }

        // ── scroll ────────────────────────────────────────────────────────
        (PopupTarget::Slider(slider), UiEvent::Scroll { delta, modifiers }) => {
            if *delta != 0.0 {
                slider.add_step(-*delta as f32, *modifiers, now);
                slider.oldpos = slider.position();
            }
            EventResult::Consumed
        }
        (PopupTarget::Combo(combo), UiEvent::Scroll { delta, .. }) => {
            if *delta != 0.0 {
                combo.next_sensitive(delta.signum() as i32);
            }
            EventResult::Consumed
        }

        // ── keyboard: slider ──────────────────────────────────────────────
        (PopupTarget::Slider(slider), UiEvent::KeyPress { key, .. }) => match key {
            Key::Escape => {
                reject_slider(slider);
                engine.popup.borrow_mut().hide();
                EventResult::Consumed
            }
            Key::Backspace | Key::Delete => {
                engine.popup.borrow_mut().keys.pop();
                EventResult::Consumed
            }
            Key::Enter => {
                if keys.is_empty() {
                    accept_slider(slider, None);
                    engine.popup.borrow_mut().hide();
                    return EventResult::Consumed;
                }
                match calc::eval(&keys, slider.display_value() as f64) {
                    Ok(value) => {
                        slider.set_display(value as f32);
                        engine.popup.borrow_mut().hide();
                    }
                    Err(err) => {
                        // leave the buffer for the user to fix
                        log::debug!("could not evaluate {keys:?}: {err}");
                    }
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        },
        (PopupTarget::Slider(_), UiEvent::TextInput { text }) => {
            let mut state = engine.popup.borrow_mut();
            for c in text.chars() {
                let allowed = matches!(c,
                    ' ' | '%' | '(' | ')' | '*' | '+' | ',' | '-' | '.' | '/'
                    | '0'..='9' | '^' | 'x' | 'X');
                if allowed && state.keys.len() + 2 < KEYS_MAX {
                    state.keys.push(c);
                }
            }
            EventResult::Consumed
        }

        // ── keyboard: combobox ────────────────────────────────────────────
        (PopupTarget::Combo(combo), UiEvent::KeyPress { key, modifiers }) => match key {
            Key::Escape => {
                engine.popup.borrow_mut().hide();
                EventResult::Consumed
            }
            Key::Backspace | Key::Delete => {
                engine.popup.borrow_mut().keys.pop();
                EventResult::Consumed
            }
            Key::Up if !modifiers.any() => {
                combo.next_sensitive(-1);
                EventResult::Consumed
            }
            Key::Down if !modifiers.any() => {
                combo.next_sensitive(1);
                EventResult::Consumed
            }
            Key::Enter => {
                if keys.is_empty() {
                    accept_combo(combo, None);
                    engine.popup.borrow_mut().hide();
                    return EventResult::Consumed;
                }
                if combo.editable() {
                    combo.set_text(&keys);
                    combo.set_active(-1);
                    engine.popup.borrow_mut().hide();
                    return EventResult::Consumed;
                }
                // a unique prefix match among sensitive entries selects it
                let matches: Vec<usize> = visible_entries(combo, &keys)
                    .into_iter()
                    .filter(|&i| combo.entry_sensitive(i))
                    .collect();
                if let [only] = matches[..] {
                    combo.set_active(only as i32);
                    engine.popup.borrow_mut().hide();
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        },
        (PopupTarget::Combo(_), UiEvent::TextInput { text }) => {
            let mut state = engine.popup.borrow_mut();
            for c in text.chars() {
                if !c.is_control() && state.keys.len() + c.len_utf8() + 1 < KEYS_MAX {
                    state.keys.push(c);
                }
            }
            EventResult::Consumed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use crate::geometry::WidgetLayout;
    use bauhaus_core::coords::Margins;
    use bauhaus_core::input::Modifiers;
    use std::cell::Cell;
    use std::time::Duration;

    const GRACE: Duration = Duration::from_millis(250);

    fn engine_sync() -> Rc<Bauhaus> {
        Bauhaus::new(EngineConfig { commit_delay: Duration::ZERO, ..EngineConfig::default() })
    }

    fn laid_out_slider(engine: &Rc<Bauhaus>) -> Slider {
        let mut s = Slider::with_range(engine, 0.0, 1.0, 0.1, 0.5, 3);
        s.set_layout(WidgetLayout {
            rect: Rect::from_size(200.0, 40.0),
            margin: Margins::uniform(0.0),
            padding: Margins::uniform(0.0),
        });
        s
    }

    fn laid_out_combo(engine: &Rc<Bauhaus>) -> Combobox {
        let mut c = Combobox::new(engine);
        c.set_layout(WidgetLayout {
            rect: Rect::from_size(200.0, 24.0),
            margin: Margins::uniform(0.0),
            padding: Margins::uniform(0.0),
        });
        c.add_list(["linear", "logarithmic", "loglogarithmic"]);
        c
    }

    fn press(x: f64, y: f64, button: MouseButton) -> UiEvent {
        UiEvent::ButtonPress {
            pos: Vec2::new(x, y),
            button,
            modifiers: Modifiers::NONE,
            double: false,
        }
    }

    fn key(key: Key) -> UiEvent {
        UiEvent::KeyPress { key, modifiers: Modifiers::NONE }
    }

    fn text(s: &str) -> UiEvent {
        UiEvent::TextInput { text: s.to_owned() }
    }

    #[test]
    fn clamp_keeps_popup_on_screen() {
        assert_eq!(clamp_to_viewport(100.0, 200.0, 1080.0), 100.0);
        assert_eq!(clamp_to_viewport(1000.0, 200.0, 1080.0), 880.0);
        assert_eq!(clamp_to_viewport(0.0, 2000.0, 1080.0), 0.0);
    }

    #[test]
    fn opening_evicts_previous_owner() {
        let engine = engine_sync();
        let mut s = laid_out_slider(&engine);
        let mut c = laid_out_combo(&engine);
        let t0 = Instant::now();
        s.show_popup(t0);
        assert!(engine.popup.borrow().is_open_for(s.id()));
        c.show_popup(&ThemeMetrics::default(), t0);
        assert!(engine.popup.borrow().is_open_for(c.id()));
        assert!(!engine.popup.borrow().is_open_for(s.id()));
    }

    #[test]
    fn stale_owner_events_are_ignored() {
        let engine = engine_sync();
        let mut s = laid_out_slider(&engine);
        let m = ThemeMetrics::default();
        let result =
            handle_event(PopupTarget::Slider(&mut s), &press(10.0, 10.0, MouseButton::Left), &m, Instant::now());
        assert_eq!(result, EventResult::Ignored);
    }

    #[test]
    fn fine_zone_moves_less_than_header() {
        let engine = engine_sync();
        let mut s = laid_out_slider(&engine);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        s.show_popup(t0);

        // same horizontal cursor delta, once at the header and once at
        // the bottom of the magnifier
        let motion = UiEvent::Motion { pos: Vec2::new(160.0, 5.0), dragging: false };
        handle_event(PopupTarget::Slider(&mut s), &motion, &m, t0);
        let coarse = (s.position() - s.committed_position()).abs();

        let motion = UiEvent::Motion { pos: Vec2::new(160.0, 195.0), dragging: false };
        handle_event(PopupTarget::Slider(&mut s), &motion, &m, t0);
        let fine = (s.position() - s.committed_position()).abs();

        assert!(fine < coarse);
    }

    #[test]
    fn click_accepts_preview_and_release_hides() {
        let engine = engine_sync();
        let mut s = laid_out_slider(&engine);
        let count = Rc::new(Cell::new(0u32));
        let count_in = Rc::clone(&count);
        s.on_value_changed(Box::new(move |_| count_in.set(count_in.get() + 1)));
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        s.show_popup(t0);

        let t1 = t0 + GRACE * 2;
        handle_event(PopupTarget::Slider(&mut s), &press(160.0, 5.0, MouseButton::Left), &m, t1);
        assert_eq!(count.get(), 1);
        assert!(s.position() > 0.5);
        assert!(engine.popup.borrow().is_open());

        let release = UiEvent::ButtonRelease { pos: Vec2::new(160.0, 5.0), button: MouseButton::Left };
        handle_event(PopupTarget::Slider(&mut s), &release, &m, t1);
        assert!(!engine.popup.borrow().is_open());
    }

    #[test]
    fn escape_restores_committed_position() {
        let engine = engine_sync();
        let mut s = laid_out_slider(&engine);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        s.set(0.5);
        s.show_popup(t0);

        let motion = UiEvent::Motion { pos: Vec2::new(190.0, 5.0), dragging: false };
        handle_event(PopupTarget::Slider(&mut s), &motion, &m, t0);
        assert!(s.position() > 0.5);

        handle_event(PopupTarget::Slider(&mut s), &key(Key::Escape), &m, t0);
        assert!((s.value() - 0.5).abs() < 1e-6);
        assert!(!engine.popup.borrow().is_open());
    }

    #[test]
    fn enter_evaluates_typed_expression() {
        let engine = engine_sync();
        let mut s = laid_out_slider(&engine);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        s.set(0.2);
        s.show_popup(t0);

        handle_event(PopupTarget::Slider(&mut s), &text("x*2"), &m, t0);
        handle_event(PopupTarget::Slider(&mut s), &key(Key::Enter), &m, t0);
        assert!((s.value() - 0.4).abs() < 1e-6);
        assert!(!engine.popup.borrow().is_open());
    }

    #[test]
    fn bad_expression_keeps_popup_open() {
        let engine = engine_sync();
        let mut s = laid_out_slider(&engine);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        s.set(0.2);
        s.show_popup(t0);

        handle_event(PopupTarget::Slider(&mut s), &text("1+"), &m, t0);
        handle_event(PopupTarget::Slider(&mut s), &key(Key::Enter), &m, t0);
        assert!((s.value() - 0.2).abs() < 1e-6);
        assert!(engine.popup.borrow().is_open());
    }

    #[test]
    fn query_buffer_filters_and_is_bounded() {
        let engine = engine_sync();
        let mut s = laid_out_slider(&engine);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        s.show_popup(t0);

        // letters other than x are dropped by the arithmetic filter
        handle_event(PopupTarget::Slider(&mut s), &text("a1b2"), &m, t0);
        assert_eq!(engine.popup.borrow().keys(), "12");

        let long = "9".repeat(KEYS_MAX * 2);
        handle_event(PopupTarget::Slider(&mut s), &text(&long), &m, t0);
        assert!(engine.popup.borrow().keys().len() < KEYS_MAX);
    }

    #[test]
    fn combo_release_selects_hovered_row() {
        let engine = engine_sync();
        let mut c = laid_out_combo(&engine);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        c.show_popup(&m, t0);

        // drag down to the second row, release after the grace window
        let t1 = t0 + GRACE * 2;
        let rect = engine.popup.borrow().rect();
        let y = rect.y + geometry::row_height(&m) * 1.5;
        let release =
            UiEvent::ButtonRelease { pos: Vec2::new(rect.x + 50.0, y), button: MouseButton::Left };
        handle_event(PopupTarget::Combo(&mut c), &release, &m, t1);
        assert_eq!(c.active(), 1);
        assert!(!engine.popup.borrow().is_open());
    }

    #[test]
    fn release_within_grace_keeps_popup_open() {
        let engine = engine_sync();
        let mut c = laid_out_combo(&engine);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        c.show_popup(&m, t0);

        let rect = engine.popup.borrow().rect();
        let release = UiEvent::ButtonRelease {
            pos: Vec2::new(rect.x + 50.0, rect.y + 5.0),
            button: MouseButton::Left,
        };
        handle_event(PopupTarget::Combo(&mut c), &release, &m, t0 + Duration::from_millis(50));
        assert!(engine.popup.borrow().is_open());
    }

    #[test]
    fn unique_prefix_match_selects_entry() {
        let engine = engine_sync();
        let mut c = laid_out_combo(&engine);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        c.show_popup(&m, t0);

        handle_event(PopupTarget::Combo(&mut c), &text("LIN"), &m, t0);
        handle_event(PopupTarget::Combo(&mut c), &key(Key::Enter), &m, t0);
        assert_eq!(c.active(), 0);
        assert!(!engine.popup.borrow().is_open());
    }

    #[test]
    fn ambiguous_prefix_keeps_popup_open() {
        let engine = engine_sync();
        let mut c = laid_out_combo(&engine);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        c.set_active(0);
        c.show_popup(&m, t0);

        // "log" matches both logarithmic entries
        handle_event(PopupTarget::Combo(&mut c), &text("log"), &m, t0);
        handle_event(PopupTarget::Combo(&mut c), &key(Key::Enter), &m, t0);
        assert_eq!(c.active(), 0);
        assert!(engine.popup.borrow().is_open());
    }

    #[test]
    fn editable_enter_stores_custom_text() {
        let engine = engine_sync();
        let mut c = laid_out_combo(&engine);
        c.set_editable(true);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        c.set_active(1);
        c.show_popup(&m, t0);

        handle_event(PopupTarget::Combo(&mut c), &text("1/250"), &m, t0);
        handle_event(PopupTarget::Combo(&mut c), &key(Key::Enter), &m, t0);
        assert_eq!(c.active(), -1);
        assert_eq!(c.active_label(), Some("1/250"));
        assert!(!engine.popup.borrow().is_open());
    }

    #[test]
    fn double_click_in_popup_restores_default() {
        let engine = engine_sync();
        let mut c = laid_out_combo(&engine);
        c.set_default(2);
        c.set_active(0);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        c.show_popup(&m, t0);

        // a press within the grace window counts as the double click
        let rect = engine.popup.borrow().rect();
        let ev = press(rect.x + 10.0, rect.y + 5.0, MouseButton::Left);
        handle_event(PopupTarget::Combo(&mut c), &ev, &m, t0 + Duration::from_millis(50));
        assert_eq!(c.active(), 2);
        assert!(!engine.popup.borrow().is_open());
    }

    #[test]
    fn keyboard_stepping_moves_hover_and_enter_commits() {
        let engine = engine_sync();
        let mut c = laid_out_combo(&engine);
        c.set_active(0);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        c.show_popup(&m, t0);

        handle_event(PopupTarget::Combo(&mut c), &key(Key::Down), &m, t0);
        assert_eq!(c.hovered, 1);
        handle_event(PopupTarget::Combo(&mut c), &key(Key::Enter), &m, t0);
        assert_eq!(c.active(), 1);
        assert!(!engine.popup.borrow().is_open());
    }
}
