use crate::coords::{Rect, Vec2};
use crate::paint::{Color, ColorStop};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Where to drop characters when a label exceeds its box.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ellipsize {
    None,
    Start,
    Middle,
    End,
}

/// One renderer-agnostic drawing primitive. The host backend replays
/// these in order; clip commands nest.
#[derive(Debug, Clone)]
pub enum DrawCmd {
    Rect {
        rect: Rect,
        color: Color,
        filled: bool,
        line_width: f64,
    },
    /// Horizontal linear gradient across `rect`.
    GradientRect {
        rect: Rect,
        stops: Vec<ColorStop>,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f64,
        color: Color,
    },
    Polyline {
        points: Vec<Vec2>,
        width: f64,
        color: Color,
    },
    /// Filled triangle, e.g. the slider position indicator.
    Triangle {
        points: [Vec2; 3],
        color: Color,
        border: Option<Color>,
    },
    Text {
        origin: Vec2,
        max_width: f64,
        align: TextAlign,
        ellipsize: Ellipsize,
        color: Color,
        text: String,
    },
    PushClip(Rect),
    PopClip,
}
