//! Bauhaus UI — slider and combobox widgets on top of `bauhaus-core`.
//!
//! The engine is host-agnostic: it owns widget state, hit testing and the
//! popup singleton, and paints into a [`bauhaus_core::scene::DrawList`]
//! the host replays with its own renderer. The host feeds it
//! [`event::UiEvent`]s and a clock.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use bauhaus_ui::prelude::*;
//! use std::time::Instant;
//!
//! let engine = Bauhaus::new(EngineConfig::default());
//! let mut exposure = Slider::with_range(&engine, -3.0, 3.0, 0.05, 0.0, 2);
//! exposure.set_label(Some("exposure"), "black level");
//! exposure.set_format(" EV");
//! exposure.on_value_changed(Box::new(|v| println!("exposure -> {v}")));
//!
//! // In your event callback:
//! exposure.on_event(&event, &theme.metrics, Instant::now());
//! // In your frame callback:
//! exposure.update(Instant::now());
//! let mut painter = Painter::new(&mut draw_list, &theme, &measure);
//! render::paint_slider(&exposure, focused, &mut painter);
//! ```
//!
//! While a popup is open, route events through
//! [`popup::handle_event`] with the owning widget as the target.

pub mod calc;
pub mod combobox;
pub mod commit;
pub mod engine;
pub mod event;
pub mod geometry;
pub mod painter;
pub mod popup;
pub mod render;
pub mod slider;
pub mod theme;
pub mod widget;

// Top-level re-exports for the common entry points.
pub use engine::{Bauhaus, EngineConfig};
pub use slider::Slider;
pub use combobox::Combobox;

/// Everything a host needs to build, drive and paint the widgets.
pub mod prelude {
    pub use crate::combobox::{ComboEntry, Combobox, EntryAlignment};
    pub use crate::commit::{ComboBinding, ComboSlot, FieldValue, SliderBinding, SliderSlot};
    pub use crate::engine::{Bauhaus, EngineConfig, WidgetId};
    pub use crate::event::{EventResult, Modifiers, UiEvent};
    pub use crate::geometry::WidgetLayout;
    pub use crate::painter::Painter;
    pub use crate::popup::{self, PopupTarget};
    pub use crate::render;
    pub use crate::slider::{Slider, ValueHook};
    pub use crate::theme::{MonospaceMeasure, TextMeasure, Theme, ThemeColors, ThemeMetrics};
    pub use crate::widget::{FocusHook, QuadHook, QuadPaintHook};

    // Re-export the core primitives every host touches.
    pub use bauhaus_core::coords::{Margins, Rect, Vec2};
    pub use bauhaus_core::input::{Key, MouseButton};
    pub use bauhaus_core::paint::{Color, ColorStop};
    pub use bauhaus_core::scene::{DrawCmd, DrawList, Ellipsize, TextAlign};
}
