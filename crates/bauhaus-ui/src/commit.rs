//! Field writeback performed when a change commits.
//!
//! A widget can be bound to one typed storage slot. Committing writes the
//! current value into the slot and, when the stored value actually
//! changed, hands the previous value to the field-changed hook.

use std::cell::Cell;
use std::rc::Rc;

/// Previous value of a bound field, passed to the field-changed hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Float(f32),
    Int(i32),
    UInt(u32),
    UShort(u16),
    Bool(bool),
}

pub type FieldHook = Box<dyn FnMut(FieldValue)>;

/// Typed storage behind a slider.
pub enum SliderSlot {
    Float(Rc<Cell<f32>>),
    Int(Rc<Cell<i32>>),
    UShort(Rc<Cell<u16>>),
}

pub struct SliderBinding {
    pub slot: SliderSlot,
    pub on_field_changed: Option<FieldHook>,
}

impl SliderBinding {
    pub fn new(slot: SliderSlot) -> Self {
        Self { slot, on_field_changed: None }
    }

    pub fn with_hook(slot: SliderSlot, hook: FieldHook) -> Self {
        Self { slot, on_field_changed: Some(hook) }
    }

    /// Write `value` into the slot; runs the hook with the previous value
    /// only when the stored representation changed.
    pub(crate) fn store(&mut self, value: f32) {
        let previous = match &self.slot {
            SliderSlot::Float(slot) => {
                let prev = slot.get();
                slot.set(value);
                (slot.get() != prev).then_some(FieldValue::Float(prev))
            }
            SliderSlot::Int(slot) => {
                let prev = slot.get();
                slot.set(value as i32);
                (slot.get() != prev).then_some(FieldValue::Int(prev))
            }
            SliderSlot::UShort(slot) => {
                let prev = slot.get();
                slot.set(value as u16);
                (slot.get() != prev).then_some(FieldValue::UShort(prev))
            }
        };
        if let (Some(prev), Some(hook)) = (previous, self.on_field_changed.as_mut()) {
            hook(prev);
        }
    }
}

/// Typed storage behind a combobox.
pub enum ComboSlot {
    /// Stores the tag of the active entry. Nothing is written while no
    /// entry is active.
    EnumTag(Rc<Cell<i32>>),
    /// Stores the active index.
    Int(Rc<Cell<i32>>),
    Uint(Rc<Cell<u32>>),
    /// Stores whether the active index is nonzero.
    Bool(Rc<Cell<bool>>),
}

pub struct ComboBinding {
    pub slot: ComboSlot,
    pub on_field_changed: Option<FieldHook>,
}

impl ComboBinding {
    pub fn new(slot: ComboSlot) -> Self {
        Self { slot, on_field_changed: None }
    }

    pub fn with_hook(slot: ComboSlot, hook: FieldHook) -> Self {
        Self { slot, on_field_changed: Some(hook) }
    }

    /// Write the active index (or the active entry's tag) into the slot.
    pub(crate) fn store(&mut self, active: i32, active_tag: Option<i32>) {
        let previous = match &self.slot {
            ComboSlot::EnumTag(slot) => match active_tag {
                Some(tag) if active >= 0 => {
                    let prev = slot.get();
                    slot.set(tag);
                    (slot.get() != prev).then_some(FieldValue::Int(prev))
                }
                _ => None,
            },
            ComboSlot::Int(slot) => {
                let prev = slot.get();
                slot.set(active);
                (slot.get() != prev).then_some(FieldValue::Int(prev))
            }
            ComboSlot::Uint(slot) => {
                let prev = slot.get();
                slot.set(active.max(0) as u32);
                (slot.get() != prev).then_some(FieldValue::UInt(prev))
            }
            ComboSlot::Bool(slot) => {
                let prev = slot.get();
                slot.set(active > 0);
                (slot.get() != prev).then_some(FieldValue::Bool(prev))
            }
        };
        if let (Some(prev), Some(hook)) = (previous, self.on_field_changed.as_mut()) {
            hook(prev);
        }
    }
}
