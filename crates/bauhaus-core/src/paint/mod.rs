mod color;
mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, GradientStops, MAX_STOPS};
