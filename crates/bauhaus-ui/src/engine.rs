use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::popup::PopupState;

/// Stable identity of a widget, used to track popup ownership.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Delay before a debounced change is committed.
    pub commit_delay: Duration,
    /// Window after opening a popup during which a release is ignored and
    /// a second press counts as a double click.
    pub double_click_time: Duration,
    /// Height of the host viewport, used to keep popups on screen.
    pub viewport_height: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            commit_delay: Duration::from_millis(350),
            double_click_time: Duration::from_millis(250),
            viewport_height: 1080.0,
        }
    }
}

/// Shared, single-threaded engine state. One per UI; widgets keep an
/// `Rc` handle to it. Owns the popup singleton and the notification
/// suppression counter.
pub struct Bauhaus {
    pub(crate) config: EngineConfig,
    pub(crate) popup: RefCell<PopupState>,
    suppress_depth: Cell<u32>,
    next_widget_id: Cell<u64>,
}

impl Bauhaus {
    pub fn new(config: EngineConfig) -> Rc<Self> {
        Rc::new(Self {
            config,
            popup: RefCell::new(PopupState::default()),
            suppress_depth: Cell::new(0),
            next_widget_id: Cell::new(1),
        })
    }

    pub fn commit_delay(&self) -> Duration {
        self.config.commit_delay
    }

    pub fn double_click_time(&self) -> Duration {
        self.config.double_click_time
    }

    /// Suspends change notifications for as long as the guard lives.
    /// Nesting is allowed; notifications resume when the last guard drops.
    pub fn suppress(self: &Rc<Self>) -> SuppressGuard {
        self.suppress_depth.set(self.suppress_depth.get() + 1);
        SuppressGuard { engine: Rc::clone(self) }
    }

    #[inline]
    pub(crate) fn suppressed(&self) -> bool {
        self.suppress_depth.get() > 0
    }

    pub(crate) fn alloc_widget_id(&self) -> WidgetId {
        let id = self.next_widget_id.get();
        self.next_widget_id.set(id + 1);
        WidgetId(id)
    }
}

/// RAII token returned by [`Bauhaus::suppress`].
pub struct SuppressGuard {
    engine: Rc<Bauhaus>,
}

impl Drop for SuppressGuard {
    fn drop(&mut self) {
        let depth = self.engine.suppress_depth.get();
        debug_assert!(depth > 0);
        self.engine.suppress_depth.set(depth.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppress_nests() {
        let engine = Bauhaus::new(EngineConfig::default());
        assert!(!engine.suppressed());
        {
            let _outer = engine.suppress();
            assert!(engine.suppressed());
            {
                let _inner = engine.suppress();
                assert!(engine.suppressed());
            }
            assert!(engine.suppressed());
        }
        assert!(!engine.suppressed());
    }

    #[test]
    fn widget_ids_are_unique() {
        let engine = Bauhaus::new(EngineConfig::default());
        let a = engine.alloc_widget_id();
        let b = engine.alloc_widget_id();
        assert_ne!(a, b);
    }
}
