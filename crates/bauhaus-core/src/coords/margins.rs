/// Per-edge spacing in logical pixels. Used for both outer margins and
/// inner padding of a widget box.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    #[inline]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }

    #[inline]
    pub const fn uniform(v: f64) -> Self {
        Self { left: v, right: v, top: v, bottom: v }
    }

    #[inline]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    #[inline]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}
