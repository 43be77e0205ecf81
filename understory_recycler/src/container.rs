// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line containers: pooled slots that render one line of records.

use core::fmt;

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::{ClickHandler, ElementCell, ElementFactory, ElementVisual};

/// A reusable slot that renders one line (row or column) of records.
///
/// The container is identified by its pool `slot`, which never changes. The
/// line it renders changes as the view scrolls. Each container keeps its own
/// sub-pool of [`ElementCell`]s sized to the current number of elements per
/// line.
pub struct LineContainer<R, V> {
    slot: usize,
    line: Option<usize>,
    elements_per_line: usize,
    on_click: Option<ClickHandler<R>>,
    cells: SmallVec<[ElementCell<R, V>; 4]>,
    origin: Point,
    size: Size,
    active: bool,
}

impl<R, V: fmt::Debug> fmt::Debug for LineContainer<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineContainer")
            .field("slot", &self.slot)
            .field("line", &self.line)
            .field("elements_per_line", &self.elements_per_line)
            .field("has_click_handler", &self.on_click.is_some())
            .field("cells", &self.cells)
            .field("origin", &self.origin)
            .field("size", &self.size)
            .field("active", &self.active)
            .finish()
    }
}

impl<R, V> LineContainer<R, V> {
    /// Creates an empty, inactive container for pool `slot`.
    #[must_use]
    pub fn new(slot: usize) -> Self {
        Self {
            slot,
            line: None,
            elements_per_line: 0,
            on_click: None,
            cells: SmallVec::new(),
            origin: Point::ZERO,
            size: Size::ZERO,
            active: false,
        }
    }

    /// Pool index of this container.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Line currently bound to this container, if any.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    /// Returns `true` if the container is shown.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Top-left corner of the container in content coordinates.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Footprint of one line: full cross-axis length by one element along the axis.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Container bounds in content coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Materialized element cells, in line order.
    #[must_use]
    pub fn cells(&self) -> &[ElementCell<R, V>] {
        &self.cells
    }

    /// Element cell at `offset` within the line.
    #[must_use]
    pub fn cell(&self, offset: usize) -> Option<&ElementCell<R, V>> {
        self.cells.get(offset)
    }

    /// Number of materialized element cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no element cells are materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Binds this container to `line`.
    ///
    /// Takes effect on the next [`LineContainer::render`].
    pub fn bind(
        &mut self,
        line: usize,
        elements_per_line: usize,
        on_click: Option<ClickHandler<R>>,
    ) {
        self.line = Some(line);
        self.elements_per_line = elements_per_line;
        self.on_click = on_click;
    }

    /// Binds every cell of the line to its record.
    ///
    /// Cells are created through `factory` when the sub-pool is too small and
    /// destroyed through it when it is too large. Cells past the end of
    /// `records` are hidden and unbound but kept.
    pub fn render<F>(&mut self, records: &[R], factory: &mut F)
    where
        F: ElementFactory<R, Element = V>,
        V: ElementVisual<R>,
    {
        let Some(line) = self.line else {
            return;
        };
        let per_line = self.elements_per_line;
        let first = line.saturating_mul(per_line);

        for offset in 0..per_line {
            if offset >= self.cells.len() {
                self.cells.push(ElementCell::new(factory.create_element()));
            }
            let cell = &mut self.cells[offset];
            let index = first.saturating_add(offset);
            match records.get(index) {
                Some(record) => {
                    cell.set_visible(true);
                    cell.bind(index, record);
                    cell.set_click_callback(self.on_click.clone());
                }
                None => {
                    cell.set_visible(false);
                    cell.unbind();
                }
            }
        }

        while self.cells.len() > per_line {
            if let Some(cell) = self.cells.pop() {
                factory.destroy_element(cell.into_visual());
            }
        }
    }

    /// Invokes the click handler of the cell at `offset`.
    ///
    /// Inactive containers and hidden cells do not receive clicks.
    pub fn click(&self, offset: usize, records: &[R]) -> bool
    where
        V: ElementVisual<R>,
    {
        if !self.active {
            return false;
        }
        match self.cells.get(offset) {
            Some(cell) if cell.is_visible() => cell.click(records),
            _ => false,
        }
    }

    /// Destroys every cell through `factory`, consuming the container.
    pub fn destroy<F>(self, factory: &mut F)
    where
        F: ElementFactory<R, Element = V>,
    {
        for cell in self.cells {
            factory.destroy_element(cell.into_visual());
        }
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(crate) fn place(&mut self, origin: Point, size: Size) {
        self.origin = origin;
        self.size = size;
    }

    pub(crate) fn move_to(&mut self, origin: Point) {
        self.origin = origin;
    }
}

#[cfg(test)]
mod tests {
    use super::LineContainer;
    use crate::{ClickHandler, ElementFactory, ElementVisual};
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[derive(Debug, Default)]
    struct Label {
        id: usize,
        text: Option<char>,
        shown: bool,
    }

    impl ElementVisual<char> for Label {
        fn refresh(&mut self, record: &char) {
            self.text = Some(*record);
        }

        fn set_visible(&mut self, visible: bool) {
            self.shown = visible;
        }
    }

    #[derive(Debug, Default)]
    struct Factory {
        created: usize,
        destroyed: Vec<usize>,
    }

    impl ElementFactory<char> for Factory {
        type Element = Label;

        fn create_element(&mut self) -> Label {
            self.created += 1;
            Label {
                id: self.created,
                text: None,
                shown: true,
            }
        }

        fn destroy_element(&mut self, element: Label) {
            self.destroyed.push(element.id);
        }
    }

    const RECORDS: [char; 7] = ['a', 'b', 'c', 'd', 'e', 'f', 'g'];

    #[test]
    fn render_binds_the_lines_records() {
        let mut factory = Factory::default();
        let mut container = LineContainer::new(0);
        container.bind(1, 3, None);
        container.render(&RECORDS, &mut factory);

        assert_eq!(factory.created, 3);
        let texts: Vec<_> = container.cells().iter().map(|c| c.visual().text).collect();
        assert_eq!(texts, [Some('d'), Some('e'), Some('f')]);
        let indices: Vec<_> = container.cells().iter().map(|c| c.record_index()).collect();
        assert_eq!(indices, [Some(3), Some(4), Some(5)]);
    }

    #[test]
    fn partial_last_line_hides_padding_cells() {
        let mut factory = Factory::default();
        let mut container = LineContainer::new(0);
        container.bind(2, 3, None);
        container.render(&RECORDS, &mut factory);

        assert_eq!(container.len(), 3);
        let shown: Vec<_> = container.cells().iter().map(|c| c.is_visible()).collect();
        assert_eq!(shown, [true, false, false]);
        assert!(!container.cells()[1].visual().shown);
        assert_eq!(container.cells()[0].visual().text, Some('g'));
        // Hidden cells are not bound.
        assert_eq!(container.cells()[1].record_index(), None);

        // Rebinding to a full line shows them again.
        container.bind(0, 3, None);
        container.render(&RECORDS, &mut factory);
        assert!(container.cells().iter().all(|c| c.is_visible()));
        assert_eq!(factory.created, 3);
    }

    #[test]
    fn rebinding_to_partial_line_unbinds_padding_cells() {
        let handler: ClickHandler<char> = Rc::new(|_: &char| {});
        let mut factory = Factory::default();
        let mut container = LineContainer::new(0);
        container.bind(0, 3, Some(handler));
        container.render(&RECORDS, &mut factory);
        assert!(container.cells().iter().all(|c| c.has_click_callback()));

        container.bind(2, 3, container.on_click.clone());
        container.render(&RECORDS, &mut factory);
        let indices: Vec<_> = container.cells().iter().map(|c| c.record_index()).collect();
        assert_eq!(indices, [Some(6), None, None]);
        let handlers: Vec<_> = container
            .cells()
            .iter()
            .map(|c| c.has_click_callback())
            .collect();
        assert_eq!(handlers, [true, false, false]);

        container.set_active(true);
        assert!(!container.click(1, &RECORDS));
    }

    #[test]
    fn shrinking_elements_per_line_destroys_tail_cells() {
        let mut factory = Factory::default();
        let mut container = LineContainer::new(0);
        container.bind(0, 4, None);
        container.render(&RECORDS, &mut factory);
        assert_eq!(container.len(), 4);

        container.bind(0, 2, None);
        container.render(&RECORDS, &mut factory);
        assert_eq!(container.len(), 2);
        assert_eq!(factory.destroyed, [4, 3]);

        container.destroy(&mut factory);
        assert_eq!(factory.destroyed, [4, 3, 1, 2]);
    }

    #[test]
    fn clicks_require_active_container_and_visible_cell() {
        let clicked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicked);
        let handler: ClickHandler<char> = Rc::new(move |r: &char| sink.borrow_mut().push(*r));

        let mut factory = Factory::default();
        let mut container = LineContainer::new(0);
        container.bind(2, 3, Some(handler));
        container.render(&RECORDS, &mut factory);

        assert!(!container.click(0, &RECORDS));
        container.set_active(true);
        assert!(container.click(0, &RECORDS));
        assert!(!container.click(1, &RECORDS));
        assert!(!container.click(9, &RECORDS));
        assert_eq!(*clicked.borrow(), ['g']);
    }

    #[test]
    fn unbound_container_renders_nothing() {
        let mut factory = Factory::default();
        let mut container = LineContainer::<char, Label>::new(0);
        container.render(&RECORDS, &mut factory);
        assert!(container.is_empty());
        assert_eq!(container.line(), None);
    }
}
