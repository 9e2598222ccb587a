//! Thin recording layer between the widget renderers and the draw list.

use bauhaus_core::coords::{Rect, Vec2};
use bauhaus_core::paint::{Color, GradientStops};
use bauhaus_core::scene::{DrawCmd, DrawList, Ellipsize, TextAlign};

use crate::theme::{TextMeasure, Theme};

pub struct Painter<'a> {
    pub list: &'a mut DrawList,
    pub theme: &'a Theme,
    pub measure: &'a dyn TextMeasure,
}

impl<'a> Painter<'a> {
    pub fn new(list: &'a mut DrawList, theme: &'a Theme, measure: &'a dyn TextMeasure) -> Self {
        Self { list, theme, measure }
    }

    #[inline]
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.list.push(DrawCmd::Rect { rect, color, filled: true, line_width: 0.0 });
    }

    #[inline]
    pub fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64) {
        self.list.push(DrawCmd::Rect { rect, color, filled: false, line_width });
    }

    pub fn gradient_rect(&mut self, rect: Rect, stops: &GradientStops) {
        self.list.push(DrawCmd::GradientRect { rect, stops: stops.sorted() });
    }

    #[inline]
    pub fn line(&mut self, from: Vec2, to: Vec2, width: f64, color: Color) {
        self.list.push(DrawCmd::Line { from, to, width, color });
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, width: f64, color: Color) {
        self.list.push(DrawCmd::Polyline { points, width, color });
    }

    pub fn triangle(&mut self, points: [Vec2; 3], color: Color, border: Option<Color>) {
        self.list.push(DrawCmd::Triangle { points, color, border });
    }

    #[inline]
    pub fn push_clip(&mut self, rect: Rect) {
        self.list.push_clip(rect);
    }

    #[inline]
    pub fn pop_clip(&mut self) {
        self.list.pop_clip();
    }

    #[inline]
    pub fn text_width(&self, text: &str) -> f64 {
        self.measure.text_width(text)
    }

    /// Record a text run and return the width it will occupy, capped at
    /// `max_width`. Callers use the return to lay out neighboring runs.
    pub fn text(
        &mut self,
        origin: Vec2,
        max_width: f64,
        align: TextAlign,
        ellipsize: Ellipsize,
        color: Color,
        text: &str,
    ) -> f64 {
        let width = self.measure.text_width(text).min(max_width);
        self.list.push(DrawCmd::Text {
            origin,
            max_width,
            align,
            ellipsize,
            color,
            text: text.to_owned(),
        });
        width
    }
}
