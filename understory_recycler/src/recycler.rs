// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The windowing engine: a bounded pool of line containers over a record list.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use kurbo::{Point, Size};
use smallvec::SmallVec;

use crate::layout::line_count;
use crate::{
    ClickHandler, ElementFactory, GridLayout, LineContainer, ScrollAxis, SmoothScroll,
};

/// A virtualized list/grid that recycles a fixed pool of line containers.
///
/// This type:
/// - owns the ordered record list, the layout parameters, and the scroll state,
/// - derives elements per line, line count, content size, and pool capacity on
///   [`RecyclerView::refresh`],
/// - on every scroll change, binds each visible line to pool slot
///   `line % pool_len` and deactivates the remaining slots,
/// - animates index-targeted scrolling with a [`SmoothScroll`] that a drag
///   cancels.
///
/// The number of containers depends only on the viewport and the layout, never
/// on the number of records.
///
/// Coordinates are content coordinates: the origin is the scroll-start edge and
/// the scroll offset is the distance from the content start to the viewport's
/// leading edge, positive downstream on both axes.
pub struct RecyclerView<R, F: ElementFactory<R>> {
    axis: ScrollAxis,
    layout: GridLayout,
    viewport: Size,
    scroll_offset: f64,

    records: Vec<R>,
    factory: F,
    on_click: Option<ClickHandler<R>>,
    pool: Vec<LineContainer<R, F::Element>>,

    elements_per_line: usize,
    line_count: usize,
    content_size: Size,

    scroll: SmoothScroll,
    dragging: bool,
    records_changed: bool,
}

impl<R, F> fmt::Debug for RecyclerView<R, F>
where
    R: fmt::Debug,
    F: ElementFactory<R> + fmt::Debug,
    F::Element: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecyclerView")
            .field("axis", &self.axis)
            .field("layout", &self.layout)
            .field("viewport", &self.viewport)
            .field("scroll_offset", &self.scroll_offset)
            .field("records", &self.records)
            .field("factory", &self.factory)
            .field("has_click_handler", &self.on_click.is_some())
            .field("pool", &self.pool)
            .field("elements_per_line", &self.elements_per_line)
            .field("line_count", &self.line_count)
            .field("content_size", &self.content_size)
            .field("scroll", &self.scroll)
            .field("dragging", &self.dragging)
            .field("records_changed", &self.records_changed)
            .finish()
    }
}

impl<R, F: ElementFactory<R>> RecyclerView<R, F> {
    /// Creates an empty recycler.
    ///
    /// Nothing is materialized until the first [`RecyclerView::refresh`].
    #[must_use]
    pub fn new(axis: ScrollAxis, layout: GridLayout, viewport: Size, factory: F) -> Self {
        Self {
            axis,
            layout,
            viewport: sanitize_viewport(viewport),
            scroll_offset: 0.0,
            records: Vec::new(),
            factory,
            on_click: None,
            pool: Vec::new(),
            elements_per_line: 0,
            line_count: 0,
            content_size: Size::ZERO,
            scroll: SmoothScroll::new(),
            dragging: false,
            records_changed: false,
        }
    }

    /// Returns this recycler with a differently tuned scroll animation.
    #[must_use]
    pub fn with_smooth_scroll(mut self, scroll: SmoothScroll) -> Self {
        self.scroll = scroll;
        self
    }

    /// Scroll axis of this recycler.
    #[must_use]
    pub const fn axis(&self) -> ScrollAxis {
        self.axis
    }

    /// Current layout parameters.
    #[must_use]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Replaces the layout parameters. Call [`RecyclerView::refresh`] afterwards.
    pub fn set_layout(&mut self, layout: GridLayout) {
        self.layout = layout;
    }

    /// Current viewport size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Sets the viewport size. Call [`RecyclerView::refresh`] afterwards.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = sanitize_viewport(viewport);
    }

    /// The ordered record list.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Replaces the record list wholesale.
    ///
    /// This does not run a layout pass; call [`RecyclerView::refresh`].
    pub fn assign_data(&mut self, records: Vec<R>) {
        self.records = records;
        self.records_changed = true;
    }

    /// Appends a record. Call [`RecyclerView::refresh`] to see it.
    pub fn add_record(&mut self, record: R) {
        self.records.push(record);
        self.records_changed = true;
    }

    /// Removes and returns the first record equal to `record`.
    ///
    /// Call [`RecyclerView::refresh`] to see the change.
    pub fn remove_record(&mut self, record: &R) -> Option<R>
    where
        R: PartialEq,
    {
        let index = self.records.iter().position(|r| r == record)?;
        self.records_changed = true;
        Some(self.records.remove(index))
    }

    /// Returns `true` if the records changed since the last [`RecyclerView::refresh`].
    ///
    /// Cells still show the records they were bound to before the change, so
    /// clicks are ignored until the next refresh.
    #[must_use]
    pub const fn needs_refresh(&self) -> bool {
        self.records_changed
    }

    /// Registers the callback invoked with the record behind a clicked cell.
    ///
    /// Cells pick up the callback on the next [`RecyclerView::refresh`].
    pub fn set_click_callback(&mut self, on_click: impl Fn(&R) + 'static) {
        self.on_click = Some(Rc::new(on_click));
    }

    /// Removes the click callback.
    pub fn clear_click_callback(&mut self) {
        self.on_click = None;
    }

    /// The element factory.
    #[must_use]
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    /// The element factory, mutably.
    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Elements per line computed by the last refresh.
    #[must_use]
    pub const fn elements_per_line(&self) -> usize {
        self.elements_per_line
    }

    /// Number of lines computed by the last refresh.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    /// Number of pooled line containers.
    #[must_use]
    pub fn pool_capacity(&self) -> usize {
        self.pool.len()
    }

    /// Size of the scrollable content computed by the last refresh.
    #[must_use]
    pub const fn content_size(&self) -> Size {
        self.content_size
    }

    /// All pooled containers, indexed by slot.
    #[must_use]
    pub fn containers(&self) -> &[LineContainer<R, F::Element>] {
        &self.pool
    }

    /// Container in pool `slot`.
    #[must_use]
    pub fn container(&self, slot: usize) -> Option<&LineContainer<R, F::Element>> {
        self.pool.get(slot)
    }

    /// Returns `true` while the host reports a drag in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns `true` while an index-targeted scroll animation is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.scroll.is_animating()
    }

    /// Full recompute of the layout, the pool, and the visible containers.
    pub fn refresh(&mut self) {
        let viewport_cross = self.axis.cross(self.viewport);
        self.elements_per_line = self.layout.elements_per_line(self.axis, self.viewport);
        self.line_count = line_count(self.records.len(), self.elements_per_line);
        let extent = self.layout.content_extent(self.axis, self.line_count);
        self.content_size = self.axis.size(extent, viewport_cross);

        self.resize_pool();
        tracing::debug!(
            records = self.records.len(),
            elements_per_line = self.elements_per_line,
            line_count = self.line_count,
            pool = self.pool.len(),
            "recycler refreshed"
        );
        self.show_and_hide_containers(true);
        self.records_changed = false;
    }

    /// Current scroll offset along the scroll axis.
    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Sets the scroll offset and updates the visible containers.
    ///
    /// Offsets outside `[0, max_scroll_offset]` are accepted so that hosts can
    /// report elastic overscroll.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        debug_assert!(
            offset.is_finite(),
            "RecyclerView scroll offsets must be finite; got {offset:?}"
        );
        if !offset.is_finite() || offset == self.scroll_offset {
            return;
        }
        self.scroll_offset = offset;
        self.show_and_hide_containers(false);
    }

    /// Adjusts the scroll offset by `delta`.
    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll_offset(self.scroll_offset + delta);
    }

    /// Largest in-bounds scroll offset.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        (self.axis.along(self.content_size) - self.axis.along(self.viewport)).max(0.0)
    }

    /// Scroll offset mapped into `[0, 1]`, where `0` is the start edge and `1` the end edge.
    ///
    /// Content that fits inside the viewport reports `0`.
    #[must_use]
    pub fn normalized_position(&self) -> f64 {
        let max = self.max_scroll_offset();
        if max > 0.0 {
            (self.scroll_offset / max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Scrolls to a normalized position, clamped into `[0, 1]`.
    pub fn set_normalized_position(&mut self, position: f64) {
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        self.set_scroll_offset(position * self.max_scroll_offset());
    }

    /// Range of line indices that intersect the viewport, if any.
    #[must_use]
    pub fn visible_lines(&self) -> Option<Range<usize>> {
        if self.line_count == 0 {
            return None;
        }
        let (first, last) = self.layout.visible_line_bounds(
            self.axis,
            self.scroll_offset,
            self.axis.along(self.viewport),
        );
        let first = usize::try_from(first).unwrap_or(0);
        let end = usize::try_from(last).ok()?.saturating_add(1).min(self.line_count);
        (first < end).then_some(first..end)
    }

    /// Locates the materialized cell showing record `index`.
    ///
    /// Returns `(slot, offset)`: the pool slot of the line container and the
    /// element offset within it. Returns `None` if the record is not currently
    /// materialized.
    #[must_use]
    pub fn slot_for_index(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.records.len() || self.elements_per_line == 0 || self.pool.is_empty() {
            return None;
        }
        let line = index / self.elements_per_line;
        let slot = line % self.pool.len();
        let container = &self.pool[slot];
        (container.is_active() && container.line() == Some(line))
            .then_some((slot, index % self.elements_per_line))
    }

    /// Routes a host click on cell `offset` of container `slot` to the click callback.
    ///
    /// Returns `true` if a callback ran. Inactive containers, hidden cells, and
    /// recyclers without a callback ignore clicks, as do recyclers whose records
    /// changed since the last [`RecyclerView::refresh`].
    pub fn click(&self, slot: usize, offset: usize) -> bool {
        if self.records_changed {
            return false;
        }
        self.pool
            .get(slot)
            .is_some_and(|container| container.click(offset, &self.records))
    }

    /// Scrolls so that the line holding record `index` is centered in the viewport.
    ///
    /// Out-of-range indices are ignored. With `skip_animation` the position is
    /// applied immediately; otherwise an animation starts and advances on each
    /// [`RecyclerView::tick`]. Either way any running animation is replaced.
    pub fn move_to_index(&mut self, index: usize, skip_animation: bool) {
        if index >= self.records.len() {
            return;
        }
        let line = index / self.elements_per_line.max(1);
        let target = self.normalized_target(line);
        tracing::debug!(index, line, goal = target, skip_animation, "move to index");
        if skip_animation {
            self.scroll.cancel();
            self.set_normalized_position(target);
        } else {
            self.scroll.start(target);
        }
    }

    /// Advances a running scroll animation by one display frame.
    ///
    /// Returns `true` if the animation is still running afterwards. A drag in
    /// progress cancels the animation instead of advancing it.
    pub fn tick(&mut self) -> bool {
        if !self.scroll.is_animating() {
            return false;
        }
        if self.dragging || self.max_scroll_offset() <= 0.0 {
            self.scroll.cancel();
            return false;
        }
        if let Some(next) = self.scroll.step(self.normalized_position()) {
            self.set_normalized_position(next);
        }
        self.scroll.is_animating()
    }

    /// Notifies the recycler that the user started dragging.
    ///
    /// Any running scroll animation stops immediately.
    pub fn begin_drag(&mut self) {
        self.scroll.cancel();
        self.dragging = true;
    }

    /// Notifies the recycler that the user stopped dragging.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    fn normalized_target(&self, line: usize) -> f64 {
        let max = self.max_scroll_offset();
        if max <= 0.0 {
            return 0.0;
        }
        let centered = self
            .layout
            .centered_offset(self.axis, line, self.axis.along(self.viewport));
        (centered / max).clamp(0.0, 1.0)
    }

    fn line_origin(&self, line: usize) -> Point {
        self.axis.point(self.layout.line_offset(self.axis, line), 0.0)
    }

    fn resize_pool(&mut self) {
        let capacity = self.layout.pool_capacity(self.axis, self.viewport);
        let current = self.pool.len();
        if capacity > current {
            tracing::debug!(from = current, to = capacity, "growing line container pool");
            self.pool.extend((current..capacity).map(LineContainer::new));
        } else if capacity < current {
            tracing::debug!(from = current, to = capacity, "shrinking line container pool");
            for container in self.pool.drain(capacity..) {
                container.destroy(&mut self.factory);
            }
        }

        // Park every container at its own slot position; the visibility pass
        // moves the active ones onto their lines.
        let line_size = self.axis.size(
            self.axis.along(self.layout.element_size()),
            self.axis.cross(self.viewport),
        );
        for container in &mut self.pool {
            let along = self.layout.line_offset(self.axis, container.slot());
            container.place(self.axis.point(along, 0.0), line_size);
        }
    }

    /// Binds visible lines to their slots and deactivates the rest.
    ///
    /// Unless `rebind_all`, an active container already showing its line keeps
    /// its cells as they are.
    fn show_and_hide_containers(&mut self, rebind_all: bool) {
        let pool_len = self.pool.len();
        if pool_len == 0 {
            return;
        }
        let mut touched: SmallVec<[bool; 16]> = SmallVec::from_elem(false, pool_len);

        if let Some(lines) = self.visible_lines() {
            debug_assert!(
                lines.len() <= pool_len,
                "visible lines {lines:?} exceed pool of {pool_len}"
            );
            tracing::trace!(
                first = lines.start,
                end = lines.end,
                offset = self.scroll_offset,
                "showing lines"
            );
            for line in lines {
                let slot = line % pool_len;
                touched[slot] = true;
                let origin = self.line_origin(line);
                let container = &mut self.pool[slot];
                if rebind_all || !container.is_active() || container.line() != Some(line) {
                    container.bind(line, self.elements_per_line, self.on_click.clone());
                    container.render(&self.records, &mut self.factory);
                }
                container.move_to(origin);
                container.set_active(true);
            }
        }

        for (container, touched) in self.pool.iter_mut().zip(touched) {
            if !touched {
                container.set_active(false);
            }
        }
    }
}

fn sanitize_viewport(viewport: Size) -> Size {
    // `f64::max` maps NaN to the other operand.
    Size::new(viewport.width.max(0.0), viewport.height.max(0.0))
}
