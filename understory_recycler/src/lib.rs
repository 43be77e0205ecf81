// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_recycler --heading-base-level=0

//! Understory Recycler: pooled line containers for virtualized lists and grids.
//!
//! This crate provides the bookkeeping half of a virtualized scroll view. Instead
//! of creating one visual per record, a [`RecyclerView`] keeps a small pool of
//! [`LineContainer`]s, one per visible *line* (a row when scrolling vertically,
//! a column when scrolling horizontally). As the scroll offset changes, the
//! containers are repositioned and rebound to whichever lines are now visible,
//! so memory and per-frame work follow the viewport size rather than the number
//! of records.
//!
//! The core concepts are:
//!
//! - [`ScrollAxis`]: the single axis a recycler scrolls along. The other axis
//!   is the *cross* axis.
//! - [`GridLayout`]: element size, spacing between elements of a line, and
//!   spacing between lines, plus the pure formulas derived from them (elements
//!   per line, content extent, pool capacity, visible line bounds).
//! - [`RecyclerView`]: owns the records, the container pool, and the scroll
//!   state. Visible line `i` always lives in pool slot `i % pool_len`.
//! - [`LineContainer`] and [`ElementCell`]: the pooled slots. Cells wrap a host
//!   visual created by an [`ElementFactory`] and refreshed through
//!   [`ElementVisual::refresh`] whenever they are bound to a record.
//! - [`SmoothScroll`]: a damped, cancellable animation toward a normalized
//!   scroll position, used by [`RecyclerView::move_to_index`].
//!
//! This crate deliberately does **not** render, hit-test, or lay out elements
//! inside a line. Host frameworks are responsible for:
//!
//! - Creating and destroying visuals on request of the [`ElementFactory`].
//! - Reporting the viewport size, scroll offset, and drag begin/end.
//! - Calling [`RecyclerView::tick`] once per frame while
//!   [`RecyclerView::is_animating`] is `true`.
//! - Drawing each active container at its [`LineContainer::bounds`] and
//!   forwarding clicks through [`RecyclerView::click`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_recycler::{
//!     ElementFactory, ElementVisual, GridLayout, RecyclerView, ScrollAxis,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Label(String);
//!
//! impl ElementVisual<u32> for Label {
//!     fn refresh(&mut self, record: &u32) {
//!         self.0 = record.to_string();
//!     }
//! }
//!
//! struct Labels;
//!
//! impl ElementFactory<u32> for Labels {
//!     type Element = Label;
//!
//!     fn create_element(&mut self) -> Label {
//!         Label::default()
//!     }
//! }
//!
//! // 100 x 100 elements with 10 units between rows in a 300 x 500 viewport.
//! let layout = GridLayout::new(Size::new(100.0, 100.0), 0.0, 10.0);
//! let mut view = RecyclerView::new(ScrollAxis::Vertical, layout, Size::new(300.0, 500.0), Labels);
//! view.assign_data((0..100_000).collect());
//! view.refresh();
//!
//! assert_eq!(view.elements_per_line(), 3);
//! assert_eq!(view.pool_capacity(), 6);
//!
//! // Scroll down; visible rows are rebound onto the same six containers.
//! view.set_scroll_offset(1_000.0);
//! let rows = view.visible_lines().unwrap();
//! assert_eq!(rows, 9..14);
//! let container = view.container(rows.start % view.pool_capacity()).unwrap();
//! assert_eq!(container.cells()[0].visual().0, "27");
//! ```
//!
//! ## Animated scrolling
//!
//! [`RecyclerView::move_to_index`] centers the line holding a record. With
//! animation enabled, each [`RecyclerView::tick`] covers 5% of the remaining
//! distance until the normalized position is within `0.0005` of the target.
//! [`RecyclerView::begin_drag`] stops the animation immediately.
//!
//! ```rust
//! # use kurbo::Size;
//! # use understory_recycler::{ElementFactory, ElementVisual, GridLayout, RecyclerView, ScrollAxis};
//! # struct Blank;
//! # impl ElementVisual<u32> for Blank { fn refresh(&mut self, _: &u32) {} }
//! # struct Blanks;
//! # impl ElementFactory<u32> for Blanks {
//! #     type Element = Blank;
//! #     fn create_element(&mut self) -> Blank { Blank }
//! # }
//! let layout = GridLayout::new(Size::new(100.0, 100.0), 0.0, 10.0);
//! let mut view = RecyclerView::new(ScrollAxis::Horizontal, layout, Size::new(500.0, 300.0), Blanks);
//! view.assign_data((0..100).collect());
//! view.refresh();
//!
//! view.move_to_index(99, false);
//! let mut frames = 0;
//! while view.tick() {
//!     frames += 1;
//! }
//! assert!(frames <= 150);
//! assert_eq!(view.normalized_position(), 1.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and `tracing`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for `kurbo`'s
//!   floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod axis;
mod cell;
mod container;
mod layout;
mod recycler;
mod smooth_scroll;
mod util;

pub use axis::ScrollAxis;
pub use cell::{ClickHandler, ElementCell, ElementFactory, ElementVisual};
pub use container::LineContainer;
pub use layout::{GridLayout, MIN_ELEMENT_EXTENT, MIN_PITCH, line_count};
pub use recycler::RecyclerView;
pub use smooth_scroll::{
    AnimationToken, DEFAULT_DAMPING, DEFAULT_EPSILON, ScrollPhase, SmoothScroll,
};
