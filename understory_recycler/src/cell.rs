// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pooled element cells and the host traits that back them.

use alloc::rc::Rc;
use core::fmt;

/// Callback invoked with the record behind a clicked cell.
pub type ClickHandler<R> = Rc<dyn Fn(&R)>;

/// Host-side visual for a single element.
///
/// This is the extension point for concrete item types: the recycler calls
/// [`ElementVisual::refresh`] every time a cell is bound to a record, which may
/// be a different record than last time.
pub trait ElementVisual<R> {
    /// Updates the visual to display `record`.
    fn refresh(&mut self, record: &R);

    /// Shows or hides the visual's content without destroying it.
    ///
    /// Hidden cells pad out the last, partially filled line.
    fn set_visible(&mut self, visible: bool) {
        let _ = visible;
    }
}

/// Creates and destroys host visuals for element cells.
pub trait ElementFactory<R> {
    /// The visual type produced by this factory.
    type Element: ElementVisual<R>;

    /// Instantiates a new visual.
    fn create_element(&mut self) -> Self::Element;

    /// Releases a visual that the recycler no longer needs.
    ///
    /// The default implementation drops it.
    fn destroy_element(&mut self, element: Self::Element) {
        drop(element);
    }
}

/// A reusable slot holding one host visual and the record it currently shows.
pub struct ElementCell<R, V> {
    visual: V,
    record: Option<usize>,
    visible: bool,
    on_click: Option<ClickHandler<R>>,
}

impl<R, V: fmt::Debug> fmt::Debug for ElementCell<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementCell")
            .field("visual", &self.visual)
            .field("record", &self.record)
            .field("visible", &self.visible)
            .field("has_click_handler", &self.on_click.is_some())
            .finish()
    }
}

impl<R, V: ElementVisual<R>> ElementCell<R, V> {
    /// Wraps a freshly created visual. The cell starts unbound and visible.
    #[must_use]
    pub fn new(visual: V) -> Self {
        Self {
            visual,
            record: None,
            visible: true,
            on_click: None,
        }
    }

    /// Binds the cell to the record at `index` and refreshes the visual.
    pub fn bind(&mut self, index: usize, record: &R) {
        self.record = Some(index);
        self.visual.refresh(record);
    }

    /// Forgets the bound record and the click handler.
    ///
    /// The visual keeps whatever it last displayed.
    pub fn unbind(&mut self) {
        self.record = None;
        self.on_click = None;
    }

    /// Sets or clears the click handler.
    pub fn set_click_callback(&mut self, on_click: Option<ClickHandler<R>>) {
        self.on_click = on_click;
    }

    /// Shows or hides the cell's content.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.visual.set_visible(visible);
        }
    }

    /// Invokes the click handler with the bound record.
    ///
    /// Returns `false` without doing anything when no handler is registered or
    /// the bound index no longer exists in `records`.
    pub fn click(&self, records: &[R]) -> bool {
        let Some(on_click) = &self.on_click else {
            return false;
        };
        match self.record.and_then(|index| records.get(index)) {
            Some(record) => {
                on_click(record);
                true
            }
            None => false,
        }
    }
}

impl<R, V> ElementCell<R, V> {
    /// Index of the bound record, if the cell has been bound.
    #[must_use]
    pub const fn record_index(&self) -> Option<usize> {
        self.record
    }

    /// Returns `true` if the cell's content is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns `true` if a click handler is registered.
    #[must_use]
    pub fn has_click_callback(&self) -> bool {
        self.on_click.is_some()
    }

    /// Returns the host visual.
    #[must_use]
    pub const fn visual(&self) -> &V {
        &self.visual
    }

    /// Returns the host visual mutably.
    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    /// Consumes the cell and returns its visual.
    pub fn into_visual(self) -> V {
        self.visual
    }
}

#[cfg(test)]
mod tests {
    use super::{ClickHandler, ElementCell, ElementVisual};
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    #[derive(Debug, Default)]
    struct Label {
        text: Option<u32>,
        refreshes: usize,
    }

    impl ElementVisual<u32> for Label {
        fn refresh(&mut self, record: &u32) {
            self.text = Some(*record);
            self.refreshes += 1;
        }
    }

    #[test]
    fn bind_runs_refresh_hook() {
        let mut cell = ElementCell::<u32, _>::new(Label::default());
        cell.bind(3, &30);
        assert_eq!(cell.record_index(), Some(3));
        assert_eq!(cell.visual().text, Some(30));
        cell.bind(4, &40);
        assert_eq!(cell.visual().text, Some(40));
        assert_eq!(cell.visual().refreshes, 2);
    }

    #[test]
    fn click_without_handler_is_a_no_op() {
        let records = [10_u32, 20];
        let mut cell = ElementCell::<u32, Label>::new(Label::default());
        cell.bind(1, &records[1]);
        assert!(!cell.click(&records));
    }

    #[test]
    fn click_reports_bound_record() {
        let clicked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicked);
        let handler: ClickHandler<u32> = Rc::new(move |r: &u32| sink.borrow_mut().push(*r));

        let records = [10_u32, 20, 30];
        let mut cell = ElementCell::new(Label::default());
        cell.set_click_callback(Some(handler));
        // Unbound cells have nothing to report.
        assert!(!cell.click(&records));

        cell.bind(2, &records[2]);
        assert!(cell.click(&records));
        assert_eq!(*clicked.borrow(), [30]);

        // A stale index is ignored rather than panicking.
        assert!(!cell.click(&records[..1]));
    }

    #[test]
    fn unbind_drops_record_and_handler() {
        let records = [10_u32, 20];
        let handler: ClickHandler<u32> = Rc::new(|_: &u32| {});
        let mut cell = ElementCell::new(Label::default());
        cell.bind(1, &records[1]);
        cell.set_click_callback(Some(handler));

        cell.unbind();
        assert_eq!(cell.record_index(), None);
        assert!(!cell.has_click_callback());
        assert!(!cell.click(&records));
        assert_eq!(cell.visual().text, Some(20));
    }

    #[test]
    fn visibility_is_forwarded_only_on_change() {
        let toggles = Rc::new(Cell::new(0_u32));

        struct Counting(Rc<Cell<u32>>);
        impl ElementVisual<u32> for Counting {
            fn refresh(&mut self, _record: &u32) {}
            fn set_visible(&mut self, _visible: bool) {
                self.0.set(self.0.get() + 1);
            }
        }

        let mut cell = ElementCell::new(Counting(Rc::clone(&toggles)));
        assert!(cell.is_visible());
        cell.set_visible(true);
        assert_eq!(toggles.get(), 0);
        cell.set_visible(false);
        cell.set_visible(false);
        assert!(!cell.is_visible());
        assert_eq!(toggles.get(), 1);
    }
}
