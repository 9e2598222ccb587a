use bauhaus_core::coords::Vec2;
use bauhaus_core::input::{Key, MouseButton};

pub use bauhaus_core::input::Modifiers;

/// Input events routed to a widget or to the open popup.
///
/// Pointer coordinates are in the coordinate space of the receiving
/// surface (widget allocation or popup window); the popup controller
/// reprojects them itself when the host reports absolute coordinates.
#[derive(Debug, Clone)]
pub enum UiEvent {
    ButtonPress {
        pos: Vec2,
        button: MouseButton,
        modifiers: Modifiers,
        /// True when the host recognized this press as the second click
        /// of a double click.
        double: bool,
    },
    ButtonRelease {
        pos: Vec2,
        button: MouseButton,
    },
    Motion {
        pos: Vec2,
        /// Primary button held during the move.
        dragging: bool,
    },
    /// Wheel / trackpad scroll. `delta` > 0 scrolls down.
    Scroll {
        delta: f64,
        modifiers: Modifiers,
    },
    KeyPress {
        key: Key,
        modifiers: Modifiers,
    },
    /// Committed printable input (one or more characters).
    TextInput {
        text: String,
    },
}

/// Result returned by event handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; stop routing to siblings / parents.
    Consumed,
    /// Event was not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
