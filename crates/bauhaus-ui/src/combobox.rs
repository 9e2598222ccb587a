//! Combobox widget: a labeled list of entries with an active index,
//! optional free-text entry and a drop-down popup.

use std::any::Any;
use std::rc::Rc;
use std::time::Instant;

use bauhaus_core::input::{Key, MouseButton};
use bauhaus_core::scene::Ellipsize;
use bauhaus_core::time::CommitDeadline;

use crate::commit::ComboBinding;
use crate::engine::{Bauhaus, WidgetId};
use crate::event::{EventResult, UiEvent};
use crate::geometry::{self, Region, WidgetLayout};
use crate::theme::ThemeMetrics;
use crate::widget::{FocusHook, QuadHook, QuadPaintHook, WidgetCommon};

/// Upper bound on the custom text of an editable combobox, in bytes.
pub const MAX_TEXT: usize = 180;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryAlignment {
    Left,
    Right,
}

pub struct ComboEntry {
    pub label: String,
    pub alignment: EntryAlignment,
    pub sensitive: bool,
    /// Host-meaningful tag, written back by enum bindings.
    pub tag: i32,
    /// Opaque per-entry payload; dropped with the entry.
    pub data: Option<Box<dyn Any>>,
}

impl ComboEntry {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            alignment: EntryAlignment::Right,
            sensitive: true,
            tag: 0,
            data: None,
        }
    }
}

pub type ActiveHook = Box<dyn FnMut(i32)>;
pub type PopulateHook = Box<dyn FnMut() -> Vec<ComboEntry>>;

pub struct Combobox {
    pub(crate) common: WidgetCommon,

    entries: Vec<ComboEntry>,
    /// Active index; -1 means none, or custom text on an editable box.
    active: i32,
    default_index: i32,
    editable: bool,
    text: String,
    text_align: EntryAlignment,
    ellipsis: Ellipsize,
    /// Entry under the popup cursor (or moved by keyboard stepping).
    pub(crate) hovered: i32,

    populate: Option<PopulateHook>,
    deadline: CommitDeadline,
    on_active_changed: Option<ActiveHook>,
    binding: Option<ComboBinding>,
}

impl Combobox {
    pub fn new(engine: &Rc<Bauhaus>) -> Self {
        Self {
            common: WidgetCommon::new(engine),
            entries: Vec::new(),
            active: -1,
            default_index: 0,
            editable: false,
            text: String::new(),
            text_align: EntryAlignment::Right,
            ellipsis: Ellipsize::End,
            hovered: -1,
            populate: None,
            deadline: CommitDeadline::new(),
            on_active_changed: None,
            binding: None,
        }
    }

    // ── chrome passthroughs ───────────────────────────────────────────────

    pub fn id(&self) -> WidgetId {
        self.common.id
    }

    pub fn set_label(&mut self, section: Option<&str>, label: &str) {
        self.common.set_label(section, label);
    }

    pub fn set_layout(&mut self, layout: WidgetLayout) {
        self.common.layout = layout;
    }

    pub fn layout(&self) -> &WidgetLayout {
        &self.common.layout
    }

    pub fn set_sensitive(&mut self, sensitive: bool) {
        self.common.sensitive = sensitive;
    }

    pub fn set_show_quad(&mut self, show: bool) {
        self.common.show_quad = show;
    }

    pub fn set_quad_toggle(&mut self, toggle: bool) {
        self.common.quad_toggle = toggle;
    }

    pub fn set_quad_active(&mut self, active: bool) {
        self.common.quad_active = active;
    }

    pub fn quad_active(&self) -> bool {
        self.common.quad_active
    }

    pub fn on_quad_pressed(&mut self, hook: QuadHook) {
        self.common.on_quad_pressed = Some(hook);
    }

    pub fn set_quad_paint(&mut self, hook: QuadPaintHook) {
        self.common.quad_paint = Some(hook);
    }

    pub fn on_request_focus(&mut self, hook: FocusHook) {
        self.common.on_request_focus = Some(hook);
    }

    pub fn on_active_changed(&mut self, hook: ActiveHook) {
        self.on_active_changed = Some(hook);
    }

    pub fn bind(&mut self, binding: ComboBinding) {
        self.binding = Some(binding);
    }

    // ── entries ───────────────────────────────────────────────────────────

    pub fn add(&mut self, label: &str) {
        self.add_entry(ComboEntry::new(label));
    }

    pub fn add_list<'a>(&mut self, labels: impl IntoIterator<Item = &'a str>) {
        for label in labels {
            self.add(label);
        }
    }

    /// Adding the first entry activates it, without notification.
    pub fn add_entry(&mut self, entry: ComboEntry) {
        self.entries.push(entry);
        if self.active < 0 {
            self.active = 0;
        }
    }

    pub fn insert(&mut self, pos: usize, entry: ComboEntry) {
        let pos = pos.min(self.entries.len());
        self.entries.insert(pos, entry);
        if self.active < 0 {
            self.active = 0;
        }
    }

    /// Remove one entry; the active index follows the entry it pointed
    /// at, and removing the last remaining entry deactivates the box.
    pub fn remove_at(&mut self, pos: usize) {
        let len = self.entries.len();
        if pos >= len {
            return;
        }
        if self.active > pos as i32 || self.active == len as i32 - 1 {
            self.active -= 1;
        }
        self.entries.remove(pos);
    }

    pub fn clear(&mut self) {
        self.active = -1;
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_label(&self, pos: usize) -> Option<&str> {
        self.entries.get(pos).map(|e| e.label.as_str())
    }

    pub fn set_entry_label(&mut self, pos: usize, label: &str) {
        if let Some(entry) = self.entries.get_mut(pos) {
            entry.label = label.to_owned();
        }
    }

    pub fn entry_sensitive(&self, pos: usize) -> bool {
        self.entries.get(pos).is_some_and(|e| e.sensitive)
    }

    pub fn set_entry_sensitive(&mut self, pos: usize, sensitive: bool) {
        if let Some(entry) = self.entries.get_mut(pos) {
            entry.sensitive = sensitive;
        }
    }

    pub(crate) fn entries(&self) -> &[ComboEntry] {
        &self.entries
    }

    // ── active entry ──────────────────────────────────────────────────────

    pub fn active(&self) -> i32 {
        self.active
    }

    /// Label of the active entry, or the custom text of an editable box.
    pub fn active_label(&self) -> Option<&str> {
        if self.active < 0 {
            if self.editable { Some(self.text.as_str()) } else { None }
        } else {
            self.entry_label(self.active as usize)
        }
    }

    pub fn active_tag(&self) -> Option<i32> {
        usize::try_from(self.active).ok().and_then(|i| self.entries.get(i)).map(|e| e.tag)
    }

    pub fn active_data(&self) -> Option<&dyn Any> {
        usize::try_from(self.active)
            .ok()
            .and_then(|i| self.entries.get(i))
            .and_then(|e| e.data.as_deref())
    }

    /// Set the active index immediately. -1 selects nothing (or the
    /// custom text of an editable box).
    pub fn set_active(&mut self, pos: i32) {
        self.set_active_full(pos, None);
    }

    /// Set the active index through the debounce window, for rapid
    /// interactive updates that should coalesce.
    pub fn set_active_debounced(&mut self, pos: i32, now: Instant) {
        self.set_active_full(pos, Some(now));
    }

    fn set_active_full(&mut self, pos: i32, debounce: Option<Instant>) {
        let old = self.active;
        let new = pos.clamp(-1, self.entries.len() as i32 - 1);
        if old != new {
            self.active = new;
            if !self.common.engine.suppressed() {
                self.deadline.cancel();
                let delay = self.common.engine.commit_delay();
                match debounce {
                    Some(now) if !delay.is_zero() => self.deadline.arm(now, delay),
                    _ => self.commit(),
                }
            }
        }
    }

    /// Activate the entry with this exact label. Returns false when no
    /// entry matches.
    pub fn set_from_label(&mut self, label: &str) -> bool {
        if let Some(pos) = self.entries.iter().position(|e| e.label == label) {
            self.set_active(pos as i32);
            true
        } else {
            false
        }
    }

    /// Activate the entry carrying this tag.
    pub fn set_from_tag(&mut self, tag: i32) -> bool {
        if let Some(pos) = self.entries.iter().position(|e| e.tag == tag) {
            self.set_active(pos as i32);
            true
        } else {
            false
        }
    }

    /// Step the active entry by `delta`, skipping insensitive entries.
    /// The hover highlight follows. A discrete step commits immediately,
    /// unlike a drag.
    pub fn next_sensitive(&mut self, delta: i32) {
        let mut new_pos = self.active;
        let step = if delta > 0 { 1 } else { -1 };
        let mut remaining = delta;
        let mut cur = new_pos + step;
        while remaining != 0 && cur >= 0 && (cur as usize) < self.entries.len() {
            if self.entries[cur as usize].sensitive {
                new_pos = cur;
                remaining -= step;
            }
            cur += step;
        }
        self.hovered = new_pos;
        self.set_active(new_pos);
    }

    fn commit(&mut self) {
        let active = self.active;
        let tag = self.active_tag();
        if let Some(hook) = self.on_active_changed.as_mut() {
            hook(active);
        }
        if let Some(binding) = self.binding.as_mut() {
            binding.store(active, tag);
        }
    }

    /// Flush a pending debounced commit whose deadline has passed.
    pub fn update(&mut self, now: Instant) {
        if self.deadline.fire_due(now) {
            self.commit();
        }
    }

    pub fn has_pending_commit(&self) -> bool {
        self.deadline.is_armed()
    }

    // ── editable text ─────────────────────────────────────────────────────

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    /// Replace the custom text of an editable box, truncated at a char
    /// boundary to the text bound.
    pub fn set_text(&mut self, text: &str) {
        if !self.editable {
            return;
        }
        let mut end = text.len().min(MAX_TEXT);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.text = text[..end].to_owned();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    // ── presentation ──────────────────────────────────────────────────────

    pub fn set_default(&mut self, pos: i32) {
        self.default_index = pos;
    }

    pub fn default_index(&self) -> i32 {
        self.default_index
    }

    pub fn set_selected_text_align(&mut self, align: EntryAlignment) {
        self.text_align = align;
    }

    pub fn selected_text_align(&self) -> EntryAlignment {
        self.text_align
    }

    pub fn set_entries_ellipsis(&mut self, ellipsis: Ellipsize) {
        self.ellipsis = ellipsis;
    }

    pub fn entries_ellipsis(&self) -> Ellipsize {
        self.ellipsis
    }

    /// Register a callback that rebuilds the entry list; it runs right
    /// before the popup is sized, for dynamically-populated boxes.
    pub fn set_populate(&mut self, populate: PopulateHook) {
        self.populate = Some(populate);
    }

    fn run_populate(&mut self) {
        if let Some(mut populate) = self.populate.take() {
            self.entries = populate();
            self.populate = Some(populate);
            if self.active >= self.entries.len() as i32 {
                self.active = -1;
            }
        }
    }

    // ── interaction ───────────────────────────────────────────────────────

    /// Open the drop-down. Runs the populate hook first; an empty list
    /// short-circuits and opens nothing.
    pub fn show_popup(&mut self, m: &ThemeMetrics, now: Instant) {
        self.run_populate();
        let height = geometry::combobox_popup_height(self.entries.len(), false, m);
        if height <= 0.0 {
            return;
        }
        self.hovered = self.active;
        let engine = Rc::clone(&self.common.engine);
        let rect = self.common.layout.rect;
        let y = crate::popup::clamp_to_viewport(rect.y, height, engine.config.viewport_height);
        let popup_rect = bauhaus_core::coords::Rect::new(rect.x, y, rect.w, height);
        engine.popup.borrow_mut().open(self.common.id, popup_rect, now);
    }

    pub fn on_event(&mut self, event: &UiEvent, m: &ThemeMetrics, now: Instant) -> EventResult {
        match event {
            UiEvent::ButtonPress { pos, button, double, .. } => {
                self.common.request_focus();
                self.deadline.cancel();
                let (region, _local) =
                    geometry::classify_region(*pos, &self.common.layout, m, self.common.show_quad);
                match region {
                    Region::Outside => EventResult::Ignored,
                    Region::Quad if self.common.quad_toggle => {
                        self.common.press_quad();
                        EventResult::Consumed
                    }
                    // without a quad toggle the whole widget is one unit
                    _ => match button {
                        MouseButton::Right => {
                            self.show_popup(m, now);
                            EventResult::Consumed
                        }
                        MouseButton::Left if *double => {
                            self.set_active_full(self.default_index, None);
                            EventResult::Consumed
                        }
                        MouseButton::Left => {
                            self.show_popup(m, now);
                            EventResult::Consumed
                        }
                        MouseButton::Middle => EventResult::Ignored,
                    },
                }
            }
            UiEvent::ButtonRelease { .. } => {
                self.common.release_quad();
                EventResult::Ignored
            }
            UiEvent::Scroll { delta, .. } => {
                if *delta != 0.0 {
                    self.next_sensitive(delta.signum() as i32);
                }
                EventResult::Consumed
            }
            UiEvent::KeyPress { key, modifiers } if !modifiers.any() => match key {
                Key::Up => {
                    self.next_sensitive(-1);
                    EventResult::Consumed
                }
                Key::Down => {
                    self.next_sensitive(1);
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }
}
