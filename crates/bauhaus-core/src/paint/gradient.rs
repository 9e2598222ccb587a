use super::Color;

/// Upper bound on gradient stops per slider baseline.
pub const MAX_STOPS: usize = 16;

/// One gradient stop at a normalized position along the baseline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub position: f32,
    pub color: Color,
}

/// Bounded, position-keyed stop collection. Setting a stop at an existing
/// position replaces it; once the table is full new positions are dropped
/// with a warning.
#[derive(Debug, Clone, Default)]
pub struct GradientStops {
    stops: Vec<ColorStop>,
}

impl GradientStops {
    pub fn new() -> Self {
        Self { stops: Vec::new() }
    }

    pub fn set(&mut self, position: f32, color: Color) {
        if let Some(stop) = self.stops.iter_mut().find(|s| s.position == position) {
            stop.color = color;
            return;
        }
        if self.stops.len() >= MAX_STOPS {
            log::warn!("gradient stop table full, dropping stop at {position}");
            return;
        }
        self.stops.push(ColorStop { position, color });
    }

    pub fn clear(&mut self) {
        self.stops.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Stops sorted by position, ready for the renderer.
    pub fn sorted(&self) -> Vec<ColorStop> {
        let mut out = self.stops.clone();
        out.sort_by(|a, b| a.position.total_cmp(&b.position));
        out
    }
}
