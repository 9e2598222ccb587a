/// Keys the widget engine reacts to. Printable input arrives separately
/// as text events, so only editing/navigation keys are named here.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Modifier state snapshot delivered with pointer and key events.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false };

    #[inline]
    pub const fn shift() -> Self {
        Modifiers { shift: true, ctrl: false, alt: false }
    }

    #[inline]
    pub const fn ctrl() -> Self {
        Modifiers { shift: false, ctrl: true, alt: false }
    }

    /// Both fine-control modifiers at once; the zoom chord.
    #[inline]
    pub fn shift_ctrl(self) -> bool {
        self.shift && self.ctrl
    }

    #[inline]
    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}
