mod types;

pub use types::{Key, Modifiers, MouseButton};
