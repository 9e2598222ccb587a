mod margins;
mod rect;
mod vec2;

pub use margins::Margins;
pub use rect::Rect;
pub use vec2::Vec2;
