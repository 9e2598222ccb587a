//! State and behavior shared by sliders and comboboxes: label, section,
//! sensitivity, focus hook and the optional quad button at the trailing
//! edge.

use std::rc::Rc;

use bauhaus_core::coords::Rect;

use crate::engine::{Bauhaus, WidgetId};
use crate::geometry::WidgetLayout;
use crate::painter::Painter;

pub type QuadHook = Box<dyn FnMut(bool)>;
pub type FocusHook = Box<dyn FnMut()>;
/// Custom quad icon painter: painter, quad box, active flag.
pub type QuadPaintHook = Box<dyn Fn(&mut Painter, Rect, bool)>;

pub struct WidgetCommon {
    pub(crate) id: WidgetId,
    pub(crate) engine: Rc<Bauhaus>,
    pub(crate) label: String,
    pub(crate) section: Option<String>,
    pub(crate) show_extended_label: bool,
    pub(crate) show_label: bool,
    pub(crate) show_quad: bool,
    pub(crate) quad_toggle: bool,
    pub(crate) quad_active: bool,
    pub(crate) sensitive: bool,
    pub(crate) layout: WidgetLayout,
    pub(crate) on_quad_pressed: Option<QuadHook>,
    pub(crate) quad_paint: Option<QuadPaintHook>,
    pub(crate) on_request_focus: Option<FocusHook>,
}

impl WidgetCommon {
    pub(crate) fn new(engine: &Rc<Bauhaus>) -> Self {
        Self {
            id: engine.alloc_widget_id(),
            engine: Rc::clone(engine),
            label: String::new(),
            section: None,
            show_extended_label: false,
            show_label: true,
            show_quad: true,
            quad_toggle: false,
            quad_active: false,
            sensitive: true,
            layout: WidgetLayout::default(),
            on_quad_pressed: None,
            quad_paint: None,
            on_request_focus: None,
        }
    }

    pub fn set_label(&mut self, section: Option<&str>, label: &str) {
        self.section = section.map(str::to_owned);
        self.label = label.to_owned();
    }

    /// Label as rendered: "section - label" when the extended form is on.
    pub fn effective_label(&self) -> String {
        match (&self.section, self.show_extended_label) {
            (Some(section), true) => format!("{section} - {}", self.label),
            _ => self.label.clone(),
        }
    }

    pub(crate) fn request_focus(&mut self) {
        if let Some(hook) = self.on_request_focus.as_mut() {
            hook();
        }
    }

    /// Quad press: a toggle flips, a momentary button latches on until
    /// release. The hook always fires with the resulting state.
    pub(crate) fn press_quad(&mut self) {
        if self.quad_toggle {
            self.quad_active = !self.quad_active;
        } else {
            self.quad_active = true;
        }
        let state = self.quad_active;
        if let Some(hook) = self.on_quad_pressed.as_mut() {
            hook(state);
        }
    }

    /// Quad release: only momentary buttons reset.
    pub(crate) fn release_quad(&mut self) {
        if !self.quad_toggle && self.quad_active {
            self.quad_active = false;
        }
    }
}
