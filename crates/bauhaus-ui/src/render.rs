//! Paint passes. Widgets are drawn in the coordinate space of their
//! allocation, popups in popup-local space; the host positions the popup
//! surface from the engine's popup rect.

use bauhaus_core::coords::{Rect, Vec2};
use bauhaus_core::paint::{Color, GradientStops};
use bauhaus_core::scene::{Ellipsize, TextAlign};

use crate::combobox::{Combobox, EntryAlignment};
use crate::geometry::{self, WidgetLayout};
use crate::painter::Painter;
use crate::popup;
use crate::slider::Slider;

const BASELINE_ALPHA: f32 = 0.4;
const INACTIVE_QUAD_FADE: f32 = 0.7;
const GUIDE_STEPS: usize = 128;

fn content_origin(layout: &WidgetLayout) -> Vec2 {
    Vec2::new(
        layout.rect.x + layout.margin.left + layout.padding.left,
        layout.rect.y + layout.margin.top + layout.padding.top,
    )
}

fn quad_origin_x(layout: &WidgetLayout, m: &crate::theme::ThemeMetrics, show_quad: bool) -> f64 {
    geometry::main_width(layout, m, show_quad) + 2.0 * m.inner_padding
}

/// Slider baseline: background bar plus the color gradient remapped to
/// the current working range so zooming in also zooms the gradient.
fn draw_baseline(
    p: &mut Painter,
    origin: Vec2,
    width: f64,
    slider: &Slider,
    stops: &GradientStops,
) {
    let m = p.theme.metrics;
    let bar = Rect::new(origin.x, origin.y + m.line_height + m.inner_padding, width, m.baseline_size);
    p.fill_rect(bar, p.theme.colors.bg);

    if !stops.is_empty() {
        let (min, max) = slider.bounds();
        let (hard_min, hard_max) = slider.hard_bounds();
        let zoom = (max - min) / (hard_max - hard_min);
        let shift = (min - hard_min) / (hard_max - hard_min);
        let mut remapped = GradientStops::new();
        for stop in stops.sorted() {
            remapped.set((stop.position - shift) / zoom, stop.color.faded(BASELINE_ALPHA));
        }
        p.gradient_rect(bar, &remapped);
    }

    if slider.fill_feedback() {
        let (min, max) = slider.bounds();
        let factor = slider.factor();
        // normalized position of displayed zero, the fill's anchor
        let zero = if factor > 0.0 {
            -min - slider.display_offset() / factor
        } else {
            max + slider.display_offset() / factor
        };
        let zero = ((zero / (max - min)).clamp(0.0, 1.0) as f64) * width;
        let pos = slider.position() as f64 * width;
        let (left, right) = if zero <= pos { (zero, pos) } else { (pos, zero) };
        let fill = Rect::new(origin.x + left, bar.y, right - left, bar.h);
        p.fill_rect(fill, p.theme.colors.fill);
    }

    // zero graduation; angle sliders wrap so the mark would lie
    let (hard_min, hard_max) = slider.hard_bounds();
    if hard_max != 360.0 && hard_min <= 0.0 && hard_max >= 0.0 {
        let (min, max) = slider.bounds();
        let span = max - min;
        if span > 0.0 && min <= 0.0 && max >= 0.0 {
            let x = origin.x + (-min / span) as f64 * width;
            p.line(
                Vec2::new(x, bar.y),
                Vec2::new(x, bar.y + bar.h),
                1.0,
                p.theme.colors.indicator_border,
            );
        }
    }
}

fn draw_indicator(p: &mut Painter, origin: Vec2, width: f64, pos: f64, filled: bool) {
    let m = p.theme.metrics;
    let cx = origin.x + pos * width;
    let cy = origin.y + geometry::indicator_y(&m);
    let half = m.marker_size / 2.0;
    let points = [
        Vec2::new(cx - half, cy + half),
        Vec2::new(cx + half, cy + half),
        Vec2::new(cx, cy - half),
    ];
    let colors = p.theme.colors;
    if filled {
        p.triangle(points, colors.fg, Some(colors.indicator_border));
    } else {
        p.triangle(points, Color::TRANSPARENT, Some(colors.fg));
    }
}

fn draw_quad(p: &mut Painter, origin: Vec2, x: f64, active: bool, chevron: bool) {
    let m = p.theme.metrics;
    let colors = p.theme.colors;
    let color = if active { colors.fg } else { colors.fg.faded(INACTIVE_QUAD_FADE) };
    let quad = Rect::new(origin.x + x, origin.y, m.quad_width, m.line_height);
    if chevron {
        let cx = quad.x + quad.w / 2.0;
        let cy = quad.y + quad.h / 2.0;
        let half = m.marker_size / 2.0;
        p.triangle(
            [
                Vec2::new(cx - half, cy - half / 2.0),
                Vec2::new(cx + half, cy - half / 2.0),
                Vec2::new(cx, cy + half),
            ],
            color,
            None,
        );
    } else {
        p.fill_rect(quad, color);
    }
}

/// Label on the left, value on the right, sharing the header row. The
/// value is measured first and the label ellipsized into what remains.
fn draw_header(p: &mut Painter, origin: Vec2, width: f64, label: &str, value: &str, value_color: Color) {
    let colors = p.theme.colors;
    let value_w = p.text(
        Vec2::new(origin.x + width, origin.y),
        width,
        TextAlign::Right,
        Ellipsize::Start,
        value_color,
        value,
    );
    if !label.is_empty() {
        let label_w = width - value_w - p.theme.metrics.inner_padding;
        if label_w > 0.0 {
            p.text(
                Vec2::new(origin.x, origin.y),
                label_w,
                TextAlign::Left,
                Ellipsize::End,
                colors.text,
                label,
            );
        }
    }
}

pub fn paint_slider(slider: &Slider, focused: bool, p: &mut Painter) {
    let layout = slider.layout();
    let m = p.theme.metrics;
    let colors = p.theme.colors;
    let origin = content_origin(layout);
    let show_quad = slider.common.show_quad;
    let width = geometry::main_width(layout, &m, show_quad);

    draw_baseline(p, origin, width, slider, slider.gradient_stops());
    draw_indicator(p, origin, width, slider.position() as f64, focused || slider.is_dragging());

    if show_quad {
        let x = quad_origin_x(layout, &m, show_quad);
        let quad = Rect::new(origin.x + x, origin.y, m.quad_width, m.line_height);
        match slider.common.quad_paint.as_ref() {
            Some(hook) => hook(p, quad, slider.common.quad_active),
            None => draw_quad(p, origin, x, slider.common.quad_active, false),
        }
    }

    let value_color = if slider.common.sensitive { colors.text } else { colors.fg_insensitive };
    let label =
        if slider.common.show_label { slider.common.effective_label() } else { String::new() };
    draw_header(p, origin, width, &label, &slider.text(), value_color);
}

pub fn paint_combobox(combo: &Combobox, focused: bool, p: &mut Painter) {
    let layout = combo.layout();
    let m = p.theme.metrics;
    let colors = p.theme.colors;
    let origin = content_origin(layout);
    let show_quad = combo.common.show_quad;
    let width = geometry::main_width(layout, &m, show_quad);

    if show_quad {
        let x = quad_origin_x(layout, &m, show_quad);
        let quad = Rect::new(origin.x + x, origin.y, m.quad_width, m.line_height);
        match combo.common.quad_paint.as_ref() {
            // default quad of a combobox is the drop-down chevron
            Some(hook) => hook(p, quad, combo.common.quad_active),
            None => draw_quad(p, origin, x, combo.common.quad_active, true),
        }
    }

    let value = combo.active_label().unwrap_or_default().to_owned();
    let value_color = if !combo.common.sensitive {
        colors.fg_insensitive
    } else if focused {
        colors.text_focused
    } else {
        colors.text
    };
    let label = if combo.common.show_label { combo.common.effective_label() } else { String::new() };
    match combo.selected_text_align() {
        EntryAlignment::Right => draw_header(p, origin, width, &label, &value, value_color),
        EntryAlignment::Left => {
            p.text(
                origin,
                width,
                TextAlign::Left,
                combo.entries_ellipsis(),
                value_color,
                &value,
            );
        }
    }
}

// ── popups ────────────────────────────────────────────────────────────────

/// One magnifier guide: the curve every popup cursor position on it maps
/// back to the same value offset.
fn draw_guide(
    p: &mut Painter,
    rect: Rect,
    pos: f64,
    off: f64,
    scale: f64,
    top: f64,
    width: f64,
    color: Color,
) {
    let mut points = Vec::with_capacity(GUIDE_STEPS + 1);
    for i in 0..=GUIDE_STEPS {
        let y = i as f64 / GUIDE_STEPS as f64;
        let x = geometry::guide_curve_x(pos, off, scale, y);
        points.push(Vec2::new(rect.w * x, top + (rect.h - top) * y));
    }
    p.polyline(points, width, color);
}

pub fn paint_slider_popup(slider: &Slider, p: &mut Painter) {
    let engine = &slider.common.engine;
    let state = engine.popup.borrow();
    if !state.is_open_for(slider.id()) {
        return;
    }
    let rect = Rect::from_size(state.rect().w, state.rect().h);
    let m = p.theme.metrics;
    let colors = p.theme.colors;

    p.fill_rect(rect, colors.bg);
    p.stroke_rect(rect, colors.border, m.border_width);

    let scale = slider.magnifier_scale();
    let oldpos = slider.committed_position() as f64;
    let pos = slider.position() as f64;
    let top = m.line_height;

    // fan of value graduations, fading with distance from the anchor
    let num_scales = (1.0 / scale).ceil() as i64 + 1;
    for k in 0..num_scales {
        let off = k as f64 * scale - oldpos;
        let alpha = (scale / off.abs().max(scale)).min(1.0) as f32;
        draw_guide(p, rect, oldpos, off, scale, top, 1.0, colors.border.faded(alpha));
    }

    // the guide under the cursor
    draw_guide(p, rect, oldpos, pos - oldpos, scale, top, 2.0, colors.fg);

    let origin = Vec2::zero();
    draw_baseline(p, origin, rect.w, slider, slider.gradient_stops());
    draw_indicator(p, origin, rect.w, pos, true);

    // typed expression takes over the value slot while editing
    let value = if state.keys().is_empty() { slider.text() } else { state.keys().to_owned() };
    let value_color = if state.keys().is_empty() { colors.text } else { colors.text_focused };
    draw_header(p, origin, rect.w, &slider.common.effective_label(), &value, value_color);
}

pub fn paint_combobox_popup(combo: &Combobox, p: &mut Painter) {
    let engine = &combo.common.engine;
    let state = engine.popup.borrow();
    if !state.is_open_for(combo.id()) {
        return;
    }
    let m = p.theme.metrics;
    let colors = p.theme.colors;
    let row_h = geometry::row_height(&m);
    let keys = state.keys();
    let visible = popup::visible_entries(combo, keys);
    let rows = visible.len() + usize::from(!keys.is_empty());
    let rect = Rect::from_size(state.rect().w, rows as f64 * row_h);

    p.fill_rect(rect, colors.bg);
    p.stroke_rect(rect, colors.border, m.border_width);

    let mut y = 0.0;
    if !keys.is_empty() {
        p.text(
            Vec2::new(rect.w - m.inner_padding, y),
            rect.w - 2.0 * m.inner_padding,
            TextAlign::Right,
            Ellipsize::None,
            colors.text_focused,
            keys,
        );
        y += row_h;
    }

    for index in visible {
        let index = index as i32;
        if index == combo.hovered {
            p.fill_rect(Rect::new(0.0, y, rect.w, row_h), colors.fill);
        }
        let color = if !combo.entry_sensitive(index as usize) {
            colors.fg_insensitive
        } else if index == combo.hovered {
            colors.text_hover
        } else if index == combo.active() {
            colors.text_selected
        } else {
            colors.text
        };
        let label = combo.entry_label(index as usize).unwrap_or_default();
        p.text(
            Vec2::new(rect.w - m.inner_padding, y),
            rect.w - 2.0 * m.inner_padding,
            TextAlign::Right,
            combo.entries_ellipsis(),
            color,
            label,
        );
        y += row_h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Bauhaus, EngineConfig};
    use crate::theme::{MonospaceMeasure, Theme};
    use bauhaus_core::coords::Margins;
    use bauhaus_core::scene::{DrawCmd, DrawList};
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    fn engine() -> Rc<Bauhaus> {
        Bauhaus::new(EngineConfig { commit_delay: Duration::ZERO, ..EngineConfig::default() })
    }

    fn laid_out<T>(rect_h: f64, set: impl FnOnce(WidgetLayout) -> T) -> T {
        set(WidgetLayout {
            rect: Rect::from_size(200.0, rect_h),
            margin: Margins::uniform(0.0),
            padding: Margins::uniform(0.0),
        })
    }

    fn count_cmds(list: &DrawList, want: fn(&DrawCmd) -> bool) -> usize {
        list.iter().filter(|c| want(c)).count()
    }

    #[test]
    fn slider_paint_emits_indicator_and_texts() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        laid_out(40.0, |l| s.set_layout(l));
        s.set_label(None, "strength");

        let theme = Theme::default();
        let measure = MonospaceMeasure { char_width: 7.0 };
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &theme, &measure);
        paint_slider(&s, false, &mut p);

        assert_eq!(count_cmds(&list, |c| matches!(c, DrawCmd::Triangle { .. })), 1);
        // value and label
        assert_eq!(count_cmds(&list, |c| matches!(c, DrawCmd::Text { .. })), 2);
        // zero graduation of a 0..1 range sits at the left edge
        assert_eq!(count_cmds(&list, |c| matches!(c, DrawCmd::Line { .. })), 1);
    }

    #[test]
    fn gradient_is_remapped_into_zoomed_range() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 100.0, 1.0, 50.0, 0);
        laid_out(40.0, |l| s.set_layout(l));
        s.set_stop(0.0, Color::BLACK);
        s.set_stop(1.0, Color::WHITE);
        s.zoom_range(-2.0);

        let theme = Theme::default();
        let measure = MonospaceMeasure { char_width: 7.0 };
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &theme, &measure);
        paint_slider(&s, false, &mut p);

        let stops = list
            .iter()
            .find_map(|c| match c {
                DrawCmd::GradientRect { stops, .. } => Some(stops.clone()),
                _ => None,
            })
            .unwrap();
        // zoomed in: the hard-range endpoints now lie outside [0, 1]
        assert!(stops.first().unwrap().position < 0.0);
        assert!(stops.last().unwrap().position > 1.0);
    }

    #[test]
    fn slider_popup_draws_guide_fan() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 2);
        laid_out(40.0, |l| s.set_layout(l));
        s.show_popup(Instant::now());

        let theme = Theme::default();
        let measure = MonospaceMeasure { char_width: 7.0 };
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &theme, &measure);
        paint_slider_popup(&s, &mut p);

        // scale 0.1: eleven fan guides plus the cursor guide
        assert_eq!(count_cmds(&list, |c| matches!(c, DrawCmd::Polyline { .. })), 12);
    }

    #[test]
    fn popup_paint_is_empty_for_non_owner() {
        let engine = engine();
        let mut s = Slider::with_range(&engine, 0.0, 1.0, 0.1, 0.5, 3);
        laid_out(40.0, |l| s.set_layout(l));

        let theme = Theme::default();
        let measure = MonospaceMeasure { char_width: 7.0 };
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &theme, &measure);
        paint_slider_popup(&s, &mut p);
        assert!(list.is_empty());
    }

    #[test]
    fn combobox_popup_rows_follow_query() {
        let engine = engine();
        let mut c = Combobox::new(&engine);
        laid_out(24.0, |l| c.set_layout(l));
        c.add_list(["linear", "logarithmic", "loglogarithmic"]);
        let m = crate::theme::ThemeMetrics::default();
        let t0 = Instant::now();
        c.show_popup(&m, t0);
        let typed = crate::event::UiEvent::TextInput { text: "log".to_owned() };
        popup::handle_event(popup::PopupTarget::Combo(&mut c), &typed, &m, t0);

        let theme = Theme::default();
        let measure = MonospaceMeasure { char_width: 7.0 };
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &theme, &measure);
        paint_combobox_popup(&c, &mut p);

        // the query row plus the two matching entries
        assert_eq!(count_cmds(&list, |c| matches!(c, DrawCmd::Text { .. })), 3);
    }
}
