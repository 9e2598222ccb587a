//! Pure sizing and hit-testing math.
//!
//! Sizing and spacing are computed here and only here; the widgets, the
//! popup controller and the renderer all go through these functions so a
//! hit test can never disagree with what was drawn.

use bauhaus_core::coords::{Margins, Rect, Vec2};

use crate::theme::ThemeMetrics;

/// Box model of one widget: the allocation handed out by the host plus
/// the spacing the host's styling resolved for it.
#[derive(Debug, Copy, Clone, Default)]
pub struct WidgetLayout {
    pub rect: Rect,
    pub margin: Margins,
    pub padding: Margins,
}

/// Where a cursor landed inside a widget or popup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Region {
    Outside,
    Main,
    Quad,
}

#[inline]
pub fn quad_width(m: &ThemeMetrics, show_quad: bool) -> f64 {
    if show_quad { m.quad_width } else { 0.0 }
}

/// Width of the content box: allocation minus margins and padding.
pub fn total_width(layout: &WidgetLayout) -> f64 {
    layout.rect.w - layout.margin.horizontal() - layout.padding.horizontal()
}

/// Width of the interactive main area: content box minus the quad and the
/// padding band separating the two.
pub fn main_width(layout: &WidgetLayout, m: &ThemeMetrics, show_quad: bool) -> f64 {
    total_width(layout) - quad_width(m, show_quad) - 2.0 * m.inner_padding
}

pub fn main_height(layout: &WidgetLayout) -> f64 {
    layout.rect.h - layout.margin.vertical() - layout.padding.vertical()
}

/// Height of one text row in a combobox popup.
#[inline]
pub fn row_height(m: &ThemeMetrics) -> f64 {
    m.line_height * 1.4
}

/// Natural height of a combobox widget.
pub fn combobox_height(margin: Margins, padding: Margins, m: &ThemeMetrics) -> f64 {
    margin.vertical() + padding.vertical() + row_height(m)
}

/// Natural height of a slider widget.
pub fn slider_height(margin: Margins, padding: Margins, m: &ThemeMetrics) -> f64 {
    margin.vertical() + padding.vertical() + m.inner_padding / 2.0 + 2.0 * m.border_width
        + m.line_height
        + m.marker_size
}

/// Vertical center of the position indicator.
pub fn indicator_y(m: &ThemeMetrics) -> f64 {
    m.line_height + m.inner_padding + m.baseline_size / 2.0
}

/// Height of the label line plus the baseline bar, discarding padding.
pub fn slider_bar_height(m: &ThemeMetrics) -> f64 {
    m.line_height + m.inner_padding + m.baseline_size
}

/// Height of a combobox popup: one row per entry plus one row for the
/// keyboard query when it is shown. Zero entries means zero height.
pub fn combobox_popup_height(entries: usize, query_shown: bool, m: &ThemeMetrics) -> f64 {
    if entries == 0 {
        return 0.0;
    }
    let rows = entries + usize::from(query_shown);
    rows as f64 * row_height(m)
}

/// Map a cursor position from allocation space to content space.
pub fn translate_cursor(pos: Vec2, layout: &WidgetLayout) -> Vec2 {
    Vec2::new(
        pos.x - layout.margin.left - layout.padding.left,
        pos.y - layout.margin.top - layout.padding.top,
    )
}

/// Hit-test a cursor against a widget (or popup) box. Returns the region
/// and the cursor translated to content space. The padding band between
/// the main area and the quad counts as main, so a slightly short drag
/// still hits the slider.
pub fn classify_region(
    pos: Vec2,
    layout: &WidgetLayout,
    m: &ThemeMetrics,
    show_quad: bool,
) -> (Region, Vec2) {
    let local = translate_cursor(pos, layout);
    let total = total_width(layout);
    let main_w = main_width(layout, m, show_quad);
    let main_h = main_height(layout);

    if local.y < 0.0 || local.y > main_h || local.x < 0.0 || local.x > total {
        return (Region::Outside, local);
    }
    if local.x <= main_w + 2.0 * m.inner_padding {
        (Region::Main, local)
    } else {
        (Region::Quad, local)
    }
}

// ── magnifier ─────────────────────────────────────────────────────────────

#[inline]
fn sq(x: f64) -> f64 {
    x * x
}

/// Precision scale of the slider popup magnifier.
///
/// `min_step` is `factor * 10^digits`; larger scales mean the fine zone
/// of the popup moves the value in smaller increments.
pub fn slider_scale(min_step: f64, min: f64, max: f64) -> f64 {
    10.0 / (min_step * (max - min))
}

/// Nonlinear cursor-to-position mapping of the slider popup.
///
/// All inputs except `pos` are in popup-relative [0,1] coordinates;
/// `line_height` is the fraction of the popup height covered by the label
/// and baseline. Above that the mapping is linear; below, the vertical
/// coordinate blends toward a zoomed view around `pos`. The result is
/// clamped so `pos + offset` stays within [0,1].
pub fn slider_line_offset(pos: f64, scale: f64, x: f64, y: f64, line_height: f64) -> f64 {
    let mut offset = if y < line_height {
        x - pos
    } else {
        let y = (y - line_height) / (1.0 - line_height);
        (x - sq(y) * 0.5 - (1.0 - sq(y)) * pos) / (0.5 * sq(y) / scale + (1.0 - sq(y)))
    };
    if pos + offset > 1.0 {
        offset = 1.0 - pos;
    }
    if pos + offset < 0.0 {
        offset = -pos;
    }
    offset
}

/// Horizontal sample of one magnifier guide curve at vertical fraction
/// `y` in [0,1] below the baseline. Inverse companion of
/// [`slider_line_offset`], used by the popup renderer.
pub fn guide_curve_x(pos: f64, off: f64, scale: f64, y: f64) -> f64 {
    sq(y) * 0.5 * (1.0 + off / scale) + (1.0 - sq(y)) * (pos + off)
}
