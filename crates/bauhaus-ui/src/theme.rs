use bauhaus_core::paint::Color;

/// Host-supplied text measurement. The engine never rasterizes text, it
/// only needs advance widths to lay out labels and values.
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f64;
}

/// Fixed-advance measurement, good enough for tests and headless hosts.
pub struct MonospaceMeasure {
    pub char_width: f64,
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }
}

/// Sizing constants, all in logical pixels.
#[derive(Debug, Copy, Clone)]
pub struct ThemeMetrics {
    pub line_height: f64,
    pub quad_width: f64,
    pub marker_size: f64,
    pub border_width: f64,
    pub baseline_size: f64,
    /// Gap between the main area and the quad, and between label and value.
    pub inner_padding: f64,
}

impl Default for ThemeMetrics {
    fn default() -> Self {
        Self {
            line_height: 16.0,
            quad_width: 16.0,
            marker_size: 8.0,
            border_width: 2.0,
            baseline_size: 4.0,
            inner_padding: 4.0,
        }
    }
}

/// Colors by role. Plain data, resolved by the host from whatever styling
/// system it uses.
#[derive(Debug, Copy, Clone)]
pub struct ThemeColors {
    pub fg: Color,
    pub fg_insensitive: Color,
    pub bg: Color,
    pub border: Color,
    pub fill: Color,
    pub indicator_border: Color,
    pub text: Color,
    pub text_selected: Color,
    pub text_hover: Color,
    pub text_focused: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            fg: Color::gray(0.9),
            fg_insensitive: Color::gray(0.5),
            bg: Color::gray(0.15),
            border: Color::gray(0.3),
            fill: Color::gray(0.35),
            indicator_border: Color::gray(0.1),
            text: Color::gray(0.85),
            text_selected: Color::WHITE,
            text_hover: Color::WHITE,
            text_focused: Color::gray(0.95),
        }
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Theme {
    pub metrics: ThemeMetrics,
    pub colors: ThemeColors,
}
