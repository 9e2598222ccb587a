//! Slider widget: a labeled value bar with soft/hard bounds, a zoomable
//! working range, an affine display transform and debounced commits.

use std::rc::Rc;
use std::time::Instant;

use bauhaus_core::coords::Vec2;
use bauhaus_core::input::{Key, Modifiers, MouseButton};
use bauhaus_core::paint::{Color, GradientStops};
use bauhaus_core::time::CommitDeadline;

use crate::commit::SliderBinding;
use crate::engine::{Bauhaus, WidgetId};
use crate::event::{EventResult, UiEvent};
use crate::geometry::{self, Region, WidgetLayout};
use crate::theme::ThemeMetrics;
use crate::widget::{FocusHook, QuadHook, QuadPaintHook, WidgetCommon};

pub type ValueHook = Box<dyn FnMut(f32)>;

pub struct Slider {
    pub(crate) common: WidgetCommon,

    hard_min: f32,
    hard_max: f32,
    soft_min: f32,
    soft_max: f32,
    /// Current working bounds, mutable via zoom. Always within hard bounds.
    min: f32,
    max: f32,

    default_value: f32,
    /// Normalized position within the working bounds. May be provisional
    /// while dragging or while the popup previews a value.
    pub(crate) pos: f32,
    /// Snapshot taken when a popup or drag starts; the popup magnifier is
    /// anchored on it.
    pub(crate) oldpos: f32,

    step: f32,
    digits: i32,
    factor: f32,
    offset: f32,
    format: String,

    fill_feedback: bool,
    pub(crate) is_dragging: bool,
    stops: GradientStops,

    /// Last pointer position in content-local coordinates, kept for the
    /// release that ends a drag.
    last_cursor: Vec2,

    deadline: CommitDeadline,
    on_value_changed: Option<ValueHook>,
    binding: Option<SliderBinding>,
}

impl Slider {
    pub fn new(engine: &Rc<Bauhaus>) -> Self {
        Self::with_range(engine, 0.0, 1.0, 0.1, 0.5, 3)
    }

    pub fn with_range(
        engine: &Rc<Bauhaus>,
        min: f32,
        max: f32,
        step: f32,
        default_value: f32,
        digits: i32,
    ) -> Self {
        let pos = (default_value - min) / (max - min);
        Self {
            common: WidgetCommon::new(engine),
            hard_min: min,
            hard_max: max,
            soft_min: min,
            soft_max: max,
            min,
            max,
            default_value,
            pos,
            oldpos: pos,
            step,
            digits,
            factor: 1.0,
            offset: 0.0,
            format: String::new(),
            fill_feedback: true,
            is_dragging: false,
            stops: GradientStops::new(),
            last_cursor: Vec2::zero(),
            deadline: CommitDeadline::new(),
            on_value_changed: None,
            binding: None,
        }
    }

    // ── chrome passthroughs ───────────────────────────────────────────────

    pub fn id(&self) -> WidgetId {
        self.common.id
    }

    pub fn set_label(&mut self, section: Option<&str>, label: &str) {
        self.common.set_label(section, label);
    }

    pub fn set_layout(&mut self, layout: WidgetLayout) {
        self.common.layout = layout;
    }

    pub fn layout(&self) -> &WidgetLayout {
        &self.common.layout
    }

    pub fn set_sensitive(&mut self, sensitive: bool) {
        self.common.sensitive = sensitive;
    }

    pub fn set_show_quad(&mut self, show: bool) {
        self.common.show_quad = show;
    }

    pub fn set_quad_toggle(&mut self, toggle: bool) {
        self.common.quad_toggle = toggle;
    }

    pub fn set_quad_active(&mut self, active: bool) {
        self.common.quad_active = active;
    }

    pub fn quad_active(&self) -> bool {
        self.common.quad_active
    }

    pub fn on_quad_pressed(&mut self, hook: QuadHook) {
        self.common.on_quad_pressed = Some(hook);
    }

    pub fn set_quad_paint(&mut self, hook: QuadPaintHook) {
        self.common.quad_paint = Some(hook);
    }

    pub fn on_request_focus(&mut self, hook: FocusHook) {
        self.common.on_request_focus = Some(hook);
    }

    pub fn on_value_changed(&mut self, hook: ValueHook) {
        self.on_value_changed = Some(hook);
    }

    pub fn bind(&mut self, binding: SliderBinding) {
        self.binding = Some(binding);
    }

    // ── value accessors ───────────────────────────────────────────────────

    /// Raw value within the working bounds.
    pub fn value(&self) -> f32 {
        self.min + self.pos * (self.max - self.min)
    }

    /// Value as shown to the user: `raw * factor + offset`.
    pub fn display_value(&self) -> f32 {
        self.value() * self.factor + self.offset
    }

    pub fn position(&self) -> f32 {
        self.pos
    }

    pub fn committed_position(&self) -> f32 {
        self.oldpos
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn soft_bounds(&self) -> (f32, f32) {
        (self.soft_min, self.soft_max)
    }

    pub fn hard_bounds(&self) -> (f32, f32) {
        (self.hard_min, self.hard_max)
    }

    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    pub fn digits(&self) -> i32 {
        self.digits
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn display_offset(&self) -> f32 {
        self.offset
    }

    pub fn fill_feedback(&self) -> bool {
        self.fill_feedback
    }

    pub fn format_suffix(&self) -> &str {
        &self.format
    }

    pub(crate) fn gradient_stops(&self) -> &GradientStops {
        &self.stops
    }

    // ── value mutation ────────────────────────────────────────────────────

    /// Set the raw value, widening the working bounds if needed. Commits
    /// immediately.
    pub fn set(&mut self, value: f32) {
        let rpos = value.clamp(self.hard_min, self.hard_max);
        self.min = self.min.min(rpos);
        self.max = self.max.max(rpos);
        self.set_normalized(self.normalize(rpos), true, None);
    }

    /// Set from a display-space value.
    pub fn set_display(&mut self, value: f32) {
        self.set((value - self.offset) / self.factor);
    }

    fn set_debounced(&mut self, value: f32, now: Instant) {
        let rpos = value.clamp(self.hard_min, self.hard_max);
        self.min = self.min.min(rpos);
        self.max = self.max.max(rpos);
        self.set_normalized(self.normalize(rpos), true, Some(now));
    }

    /// Value to normalized position; a degenerate span maps to 0.
    fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span > 0.0 { (value - self.min) / span } else { 0.0 }
    }

    /// Set the normalized position.
    ///
    /// `raise` false only moves the provisional position (drag preview).
    /// With `raise` true the change is dispatched: debounced when `now`
    /// is given and the engine has a nonzero commit delay, synchronously
    /// otherwise. The stored value is rounded to the display precision.
    pub fn set_normalized(&mut self, pos: f32, raise: bool, now: Option<Instant>) {
        let old_pos = self.pos;
        let new_pos = pos.clamp(0.0, 1.0);
        if old_pos != new_pos || raise {
            let new_value = new_pos * (self.max - self.min) + self.min;
            let precision = 10f32.powi(self.digits) * self.factor;
            let rounded = (new_value * precision).round() / precision;
            self.pos = self.normalize(rounded);

            if raise && !self.common.engine.suppressed() {
                self.deadline.cancel();
                let delay = self.common.engine.commit_delay();
                match now {
                    Some(now) if !delay.is_zero() => self.deadline.arm(now, delay),
                    _ => self.commit(),
                }
            }
        }
    }

    /// Restore the soft working range and go back to the default value.
    pub fn reset(&mut self) {
        self.min = self.soft_min;
        self.max = self.soft_max;
        self.set(self.default_value);
    }

    fn commit(&mut self) {
        let value = self.value();
        if let Some(hook) = self.on_value_changed.as_mut() {
            hook(value);
        }
        if let Some(binding) = self.binding.as_mut() {
            binding.store(value);
        }
    }

    /// Flush a pending debounced commit whose deadline has passed.
    pub fn update(&mut self, now: Instant) {
        if self.deadline.fire_due(now) {
            self.commit();
        }
    }

    pub fn has_pending_commit(&self) -> bool {
        self.deadline.is_armed()
    }

    // ── range management ──────────────────────────────────────────────────

    /// Smallest value difference the display can represent.
    fn smallest_increment(&self) -> f32 {
        1.0 / (self.factor.abs() * 10f32.powi(self.digits))
    }

    fn round_to_digits(&self, v: f32) -> f32 {
        let precision = 10f32.powi(self.digits);
        (v * precision).round() / precision
    }

    /// Zoom the working bounds around the current value. `steps == 0`
    /// resets to the soft range. A zoom is accepted only when the new
    /// bounds stay within hard bounds and the span keeps at least ten
    /// representable steps; rejected zooms are silent no-ops.
    pub fn zoom_range(&mut self, steps: f32) {
        let value = self.value();

        if steps.round() == 0.0 {
            self.min = self.soft_min;
            self.max = self.soft_max;
            self.set(value);
            return;
        }

        let multiplier = (steps / 2.0).exp2();
        let new_min = value - multiplier * (value - self.min);
        let new_max = value + multiplier * (self.max - value);
        if new_min >= self.hard_min
            && new_max <= self.hard_max
            && new_max - new_min >= self.smallest_increment() * 10.0
        {
            self.min = new_min;
            self.max = new_max;
        }
    }

    pub fn set_hard_min(&mut self, val: f32) {
        let current = self.value();
        let desired = self.round_to_digits(val);
        self.hard_min = desired;
        self.min = self.min.max(desired);
        self.soft_min = self.soft_min.max(desired);
        if desired > self.hard_max {
            self.set_hard_max(desired);
        }
        if current < desired {
            self.set(desired);
        } else {
            self.set(current);
        }
    }

    pub fn set_hard_max(&mut self, val: f32) {
        let current = self.value();
        let desired = self.round_to_digits(val);
        self.hard_max = desired;
        self.max = self.max.min(desired);
        self.soft_max = self.soft_max.min(desired);
        if desired < self.hard_min {
            self.set_hard_min(desired);
        }
        if current > desired {
            self.set(desired);
        } else {
            self.set(current);
        }
    }

    /// Narrowing the soft range never changes the value, only the default
    /// working range; the current value is re-applied afterwards.
    pub fn set_soft_min(&mut self, val: f32) {
        let old = self.value();
        self.soft_min = val.clamp(self.hard_min, self.hard_max);
        self.min = self.soft_min;
        self.set(old);
    }

    pub fn set_soft_max(&mut self, val: f32) {
        let old = self.value();
        self.soft_max = val.clamp(self.hard_min, self.hard_max);
        self.max = self.soft_max;
        self.set(old);
    }

    pub fn set_soft_range(&mut self, soft_min: f32, soft_max: f32) {
        self.set_soft_min(soft_min);
        self.set_soft_max(soft_max);
    }

    pub fn set_default(&mut self, default_value: f32) {
        self.default_value = default_value;
    }

    // ── display transform ─────────────────────────────────────────────────

    pub fn set_digits(&mut self, digits: i32) {
        self.digits = digits;
    }

    pub fn set_factor(&mut self, factor: f32) {
        self.factor = factor;
    }

    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    pub fn set_step(&mut self, step: f32) {
        self.step = step;
    }

    /// Configured step, or a derived "nice" one: roughly 1% of the soft
    /// range, snapped to a power of ten (times five when the fraction of
    /// the log is large), sign-matched to the factor.
    pub fn step(&self) -> f32 {
        let mut step = self.step;

        if step == 0.0 {
            let min = self.soft_min;
            let max = self.soft_max;
            let top = (max - min).min(min.abs().max(max.abs()));
            if top >= 100.0 {
                step = 1.0;
            } else {
                step = top * self.factor.abs() / 100.0;
                let log10step = step.log10();
                let fdigits = (log10step + 0.1).floor();
                step = 10f32.powf(fdigits);
                if log10step - fdigits > 0.5 {
                    step *= 5.0;
                }
                step /= self.factor.abs();
            }
        }

        step.copysign(self.factor)
    }

    /// Set the display suffix. A percent suffix on a unit-ranged slider
    /// switches the display transform to percent: factor 100 (when still
    /// untouched) and two fewer decimals.
    pub fn set_format(&mut self, format: &str) {
        self.format = format.to_owned();
        if format.contains('%') && self.hard_max.abs() <= 10.0 {
            if self.factor == 1.0 {
                self.factor = 100.0;
            }
            self.digits -= 2;
        }
    }

    /// Format a raw value for display, with a forced sign when the
    /// displayed hard range straddles zero.
    pub fn format_value(&self, raw: f32) -> String {
        let display = raw * self.factor + self.offset;
        let digits = self.digits.max(0) as usize;
        let straddles = (self.hard_max * self.factor + self.offset)
            * (self.hard_min * self.factor + self.offset)
            < 0.0;
        if straddles {
            format!("{display:+.digits$}{}", self.format)
        } else {
            format!("{display:.digits$}{}", self.format)
        }
    }

    pub fn text(&self) -> String {
        self.format_value(self.value())
    }

    // ── gradient stops ────────────────────────────────────────────────────

    pub fn set_stop(&mut self, position: f32, color: Color) {
        self.stops.set(position, color);
    }

    pub fn clear_stops(&mut self) {
        self.stops.clear();
    }

    pub fn set_fill_feedback(&mut self, fill: bool) {
        self.fill_feedback = fill;
    }

    // ── interaction ───────────────────────────────────────────────────────

    /// Magnifier precision scale for the popup.
    pub(crate) fn magnifier_scale(&self) -> f64 {
        let min_step = (self.factor * 10f32.powi(self.digits)) as f64;
        geometry::slider_scale(min_step, self.min as f64, self.max as f64)
    }

    /// Step the value by `delta` step units. Both fine-control modifiers
    /// held widen the working bounds back to the soft range when stepping
    /// past an edge.
    pub fn add_step(&mut self, delta: f32, modifiers: Modifiers, now: Instant) {
        if delta == 0.0 {
            return;
        }
        let mut delta = delta * self.step();

        let min_visible = self.smallest_increment();
        if delta.abs() < min_visible {
            delta = min_visible.copysign(delta);
        }

        let value = self.value();

        if modifiers.shift_ctrl() {
            if if self.factor > 0.0 { self.pos < 0.0001 } else { self.pos > 0.9999 } {
                self.min = self.soft_min;
            }
            if if self.factor < 0.0 { self.pos < 0.0001 } else { self.pos > 0.9999 } {
                self.max = self.soft_max;
            }
            self.set_debounced(value + delta, now);
        } else {
            self.set_debounced((value + delta).clamp(self.min, self.max), now);
        }
    }

    /// Open the precision popup anchored on this slider.
    pub fn show_popup(&mut self, now: Instant) {
        self.oldpos = self.pos;
        self.is_dragging = false;
        let engine = Rc::clone(&self.common.engine);
        let rect = self.common.layout.rect;
        // square popup, clamped to the viewport bottom
        let height = rect.w;
        let y = crate::popup::clamp_to_viewport(rect.y, height, engine.config.viewport_height);
        let popup_rect = bauhaus_core::coords::Rect::new(rect.x, y, rect.w, height);
        engine.popup.borrow_mut().open(self.common.id, popup_rect, now);
    }

    pub fn on_event(&mut self, event: &UiEvent, m: &ThemeMetrics, now: Instant) -> EventResult {
        match event {
            UiEvent::ButtonPress { pos, button, double, .. } => {
                self.common.request_focus();
                let (region, local) =
                    geometry::classify_region(*pos, &self.common.layout, m, self.common.show_quad);
                self.last_cursor = local;
                match region {
                    Region::Outside => EventResult::Ignored,
                    Region::Quad => {
                        self.common.press_quad();
                        EventResult::Consumed
                    }
                    Region::Main => {
                        let main_w =
                            geometry::main_width(&self.common.layout, m, self.common.show_quad);
                        match button {
                            MouseButton::Left if *double => {
                                self.reset();
                                self.is_dragging = false;
                                EventResult::Consumed
                            }
                            MouseButton::Left => {
                                if local.y < m.line_height {
                                    // header: focus only
                                    self.is_dragging = false;
                                } else {
                                    self.is_dragging = true;
                                    self.set_normalized((local.x / main_w) as f32, false, None);
                                }
                                EventResult::Consumed
                            }
                            MouseButton::Right => {
                                self.show_popup(now);
                                EventResult::Consumed
                            }
                            MouseButton::Middle => {
                                self.zoom_range(0.0);
                                EventResult::Consumed
                            }
                        }
                    }
                }
            }
            UiEvent::ButtonRelease { button, .. } => {
                self.common.release_quad();
                if self.is_dragging {
                    self.is_dragging = false;
                    self.deadline.cancel();
                    if *button == MouseButton::Left {
                        let main_w =
                            geometry::main_width(&self.common.layout, m, self.common.show_quad);
                        self.set_normalized((self.last_cursor.x / main_w) as f32, true, None);
                        return EventResult::Consumed;
                    }
                }
                EventResult::Ignored
            }
            UiEvent::Motion { pos, dragging } => {
                if self.is_dragging && *dragging {
                    let (region, local) = geometry::classify_region(
                        *pos,
                        &self.common.layout,
                        m,
                        self.common.show_quad,
                    );
                    self.last_cursor = local;
                    let main_w =
                        geometry::main_width(&self.common.layout, m, self.common.show_quad);
                    self.set_normalized((local.x / main_w) as f32, true, Some(now));
                    if region == Region::Outside {
                        EventResult::Ignored
                    } else {
                        EventResult::Consumed
                    }
                } else {
                    EventResult::Ignored
                }
            }
            UiEvent::Scroll { delta, modifiers } => {
                if *delta == 0.0 {
                    return EventResult::Consumed;
                }
                if modifiers.shift_ctrl() {
                    self.zoom_range(*delta as f32);
                } else {
                    self.add_step(-*delta as f32, *modifiers, now);
                }
                EventResult::Consumed
            }
            UiEvent::KeyPress { key, modifiers } => match key {
                Key::Right => {
                    self.add_step(1.0, *modifiers, now);
                    EventResult::Consumed
                }
                Key::Left => {
                    self.add_step(-1.0, *modifiers, now);
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            UiEvent::TextInput { .. } => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use bauhaus_core::coords::{Margins, Rect};
    use std::cell::Cell;
    use std::time::Duration;

    fn engine() -> Rc<Bauhaus> {
        Bauhaus::new(EngineConfig::default())
    }

    fn engine_sync() -> Rc<Bauhaus> {
        Bauhaus::new(EngineConfig { commit_delay: Duration::ZERO, ..EngineConfig::default() })
    }

    fn counted(slider: &mut Slider) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let count_in = Rc::clone(&count);
        slider.on_value_changed(Box::new(move |_| count_in.set(count_in.get() + 1)));
        count
    }

    fn laid_out(slider: &mut Slider) {
        slider.set_layout(WidgetLayout {
            rect: Rect::from_size(200.0, 40.0),
            margin: Margins::uniform(0.0),
            padding: Margins::uniform(0.0),
        });
    }

    #[test]
    fn set_rounds_to_digits() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        s.set(0.123456);
        assert!((s.value() - 0.123).abs() < 1e-6);
    }

    #[test]
    fn zoom_then_reset_restores_soft_bounds() {
        // scenario: hard 0..1, digits 3, factor 1
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        s.set(0.5);
        let value = s.value();
        s.zoom_range(2.0);
        s.zoom_range(0.0);
        assert_eq!(s.bounds(), s.soft_bounds());
        assert_eq!(s.value(), value);
    }

    #[test]
    fn zoom_out_of_hard_bounds_is_rejected() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        s.set(0.5);
        let before = s.bounds();
        // multiplier 2 would push min to -0.5 and max to 1.5
        s.zoom_range(2.0);
        assert_eq!(s.bounds(), before);
    }

    #[test]
    fn zoom_in_accepted_within_bounds() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 100.0, 1.0, 50.0, 0);
        s.set(50.0);
        s.zoom_range(-2.0);
        let (min, max) = s.bounds();
        assert!(min > 0.0 && max < 100.0);
        assert!((s.value() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn debounced_changes_coalesce() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        let count = counted(&mut s);
        let t0 = Instant::now();

        s.set_normalized(0.2, true, Some(t0));
        s.set_normalized(0.4, true, Some(t0 + Duration::from_millis(100)));
        s.set_normalized(0.6, true, Some(t0 + Duration::from_millis(200)));
        assert_eq!(count.get(), 0);

        // not yet: last re-arm at t0+200ms
        s.update(t0 + Duration::from_millis(500));
        s.update(t0 + Duration::from_millis(600));
        assert_eq!(count.get(), 1);
        assert!((s.value() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn immediate_commit_is_synchronous() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        let count = counted(&mut s);
        s.set(0.25);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn zero_delay_dispatches_synchronously() {
        let engine = engine_sync();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        let count = counted(&mut s);
        s.set_normalized(0.7, true, Some(Instant::now()));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn suppression_swallows_notifications() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        let count = counted(&mut s);
        {
            let _guard = engine.suppress();
            s.set(0.9);
        }
        assert_eq!(count.get(), 0);
        assert!((s.value() - 0.9).abs() < 1e-6);
        s.set(0.1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn set_widens_working_bounds_to_hard_value() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        s.set_hard_max(2.0);
        s.set(1.5);
        assert!((s.value() - 1.5).abs() < 1e-6);
        let (_, max) = s.bounds();
        assert!(max >= 1.5);
    }

    #[test]
    fn hard_bound_cascade() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        s.set_hard_max(0.25);
        let (hard_min, hard_max) = s.hard_bounds();
        assert_eq!((hard_min, hard_max), (0.0, 0.25));
        // current value 0.5 exceeded the new bound
        assert!(s.value() <= 0.25 + 1e-6);

        s.set_hard_min(0.5); // above hard_max: drags it up
        let (hard_min, hard_max) = s.hard_bounds();
        assert_eq!(hard_min, 0.5);
        assert!(hard_max >= hard_min);
    }

    #[test]
    fn default_step_is_one_percent_power_of_ten() {
        let engine = engine();
        // soft range 0..1 -> 1% = 0.01
        let s = Slider::with_range(&engine, 0.0, 1.0, 0.0, 0.5, 3);
        assert!((s.step() - 0.01).abs() < 1e-7);
        // soft range 0..300 -> top >= 100 -> step 1
        let s = Slider::with_range(&engine, 0.0, 300.0, 0.0, 50.0, 0);
        assert_eq!(s.step(), 1.0);
        // soft range 0..0.35 -> 1% = 0.0035, log frac > 0.5 -> 0.005
        let s = Slider::with_range(&engine, 0.0, 0.35, 0.0, 0.1, 3);
        assert!((s.step() - 0.005).abs() < 1e-7);
    }

    #[test]
    fn percent_format_adjusts_transform() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.01, 0.5, 3);
        s.set_format("%");
        assert_eq!(s.factor(), 100.0);
        assert_eq!(s.digits(), 1);
        s.set(0.5);
        assert_eq!(s.text(), "50.0%");
    }

    #[test]
    fn sign_forced_when_display_range_straddles_zero() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, -1.0, 1.0, 0.01, 0.0, 2);
        s.set(0.25);
        assert_eq!(s.text(), "+0.25");
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.01, 0.0, 2);
        s.set(0.25);
        assert_eq!(s.text(), "0.25");
    }

    #[test]
    fn reset_restores_default_and_soft_range() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        s.set(0.9);
        s.zoom_range(-2.0);
        s.reset();
        assert_eq!(s.bounds(), s.soft_bounds());
        assert!((s.value() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn drag_commits_once_on_release() {
        let engine = engine_sync();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        laid_out(&mut s);
        let count = counted(&mut s);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();

        // press below the header, on the bar
        let press = UiEvent::ButtonPress {
            pos: Vec2::new(50.0, 20.0),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            double: false,
        };
        assert!(s.on_event(&press, &m, t0).is_consumed());
        assert!(s.is_dragging());
        // provisional: no commit yet
        assert_eq!(count.get(), 0);

        let motion = UiEvent::Motion { pos: Vec2::new(100.0, 20.0), dragging: true };
        s.on_event(&motion, &m, t0);

        let release =
            UiEvent::ButtonRelease { pos: Vec2::new(100.0, 20.0), button: MouseButton::Left };
        assert!(s.on_event(&release, &m, t0).is_consumed());
        assert!(!s.is_dragging());
        assert!(count.get() >= 1);
        // 100 px over (200 - quad 16 - 2*4 inner) = 176 px main width
        assert!((s.position() - (100.0 / 176.0) as f32).abs() < 2e-3);
    }

    #[test]
    fn double_click_resets() {
        let engine = engine_sync();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        laid_out(&mut s);
        s.set(0.9);
        let m = ThemeMetrics::default();
        let press = UiEvent::ButtonPress {
            pos: Vec2::new(50.0, 20.0),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            double: true,
        };
        s.on_event(&press, &m, Instant::now());
        assert!((s.value() - 0.5).abs() < 1e-6);
        assert!(!s.is_dragging());
    }

    #[test]
    fn header_click_only_focuses() {
        let engine = engine_sync();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        laid_out(&mut s);
        let focused = Rc::new(Cell::new(false));
        let focused_in = Rc::clone(&focused);
        s.on_request_focus(Box::new(move || focused_in.set(true)));
        let m = ThemeMetrics::default();
        let press = UiEvent::ButtonPress {
            pos: Vec2::new(50.0, 5.0), // above line_height
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            double: false,
        };
        s.on_event(&press, &m, Instant::now());
        assert!(focused.get());
        assert!(!s.is_dragging());
        assert!((s.value() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn quad_click_fires_hook_not_value() {
        let engine = engine_sync();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        laid_out(&mut s);
        let count = counted(&mut s);
        let quads = Rc::new(Cell::new(0));
        let quads_in = Rc::clone(&quads);
        s.on_quad_pressed(Box::new(move |_| quads_in.set(quads_in.get() + 1)));
        let m = ThemeMetrics::default();
        // quad occupies the trailing 16 px
        let press = UiEvent::ButtonPress {
            pos: Vec2::new(195.0, 20.0),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
            double: false,
        };
        assert!(s.on_event(&press, &m, Instant::now()).is_consumed());
        assert_eq!(quads.get(), 1);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn scroll_steps_and_zooms() {
        let engine = engine_sync();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        laid_out(&mut s);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();

        let scroll_up = UiEvent::Scroll { delta: -1.0, modifiers: Modifiers::NONE };
        s.on_event(&scroll_up, &m, t0);
        assert!((s.value() - 0.6).abs() < 1e-6);

        let zoom = UiEvent::Scroll {
            delta: -1.0,
            modifiers: Modifiers { shift: true, ctrl: true, alt: false },
        };
        let before = s.bounds();
        s.on_event(&zoom, &m, t0);
        let after = s.bounds();
        // zoom in around 0.6 stays within hard bounds, so it is accepted
        assert!(after.0 >= before.0 && after.1 <= before.1);
        assert_ne!(before, after);
    }

    #[test]
    fn arrow_keys_step() {
        let engine = engine_sync();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        laid_out(&mut s);
        let m = ThemeMetrics::default();
        let t0 = Instant::now();
        let right = UiEvent::KeyPress { key: Key::Right, modifiers: Modifiers::NONE };
        assert!(s.on_event(&right, &m, t0).is_consumed());
        assert!((s.value() - 0.6).abs() < 1e-6);
        let left = UiEvent::KeyPress { key: Key::Left, modifiers: Modifiers::NONE };
        s.on_event(&left, &m, t0);
        assert!((s.value() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn step_clamps_at_working_bounds() {
        let engine = engine_sync();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.4, 0.9, 3);
        s.add_step(1.0, Modifiers::NONE, Instant::now());
        assert!((s.value() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn dropping_widget_drops_pending_commit() {
        let engine = engine();
        let count = Rc::new(Cell::new(0u32));
        {
            let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
            let count_in = Rc::clone(&count);
            s.on_value_changed(Box::new(move |_| count_in.set(count_in.get() + 1)));
            s.set_normalized(0.8, true, Some(Instant::now()));
            assert!(s.has_pending_commit());
            // widget dropped here with the deadline still armed
        }
        assert_eq!(count.get(), 0);
    }
}
