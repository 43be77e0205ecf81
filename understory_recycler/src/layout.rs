// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid layout parameters and the pure formulas derived from them.
//!
//! Everything here is a function of the element size, the two spacings, the
//! scroll axis, and the viewport size. Nothing depends on the number of
//! records except [`line_count`] and [`GridLayout::content_extent`].

use kurbo::Size;

use crate::ScrollAxis;
use crate::util::{ceil_to_isize, floor_to_isize};

/// Smallest extent an element may have along either axis.
pub const MIN_ELEMENT_EXTENT: f64 = 1.0;

/// Smallest distance between the starts of two consecutive elements or lines.
///
/// Spacings may be negative so that elements overlap, but a pitch below this
/// value would make the index math degenerate and is clamped.
pub const MIN_PITCH: f64 = 1.0;

/// Layout parameters for a recycled grid.
///
/// - `element_size` is the footprint of a single element. Each component is
///   clamped to at least [`MIN_ELEMENT_EXTENT`].
/// - `element_spacing` separates elements within a line (cross axis).
/// - `line_spacing` separates consecutive lines (scroll axis).
///
/// Both spacings may be negative to make elements or lines overlap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridLayout {
    element_size: Size,
    element_spacing: f64,
    line_spacing: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            element_size: Size::new(MIN_ELEMENT_EXTENT, MIN_ELEMENT_EXTENT),
            element_spacing: 0.0,
            line_spacing: 0.0,
        }
    }
}

impl GridLayout {
    /// Creates a layout, clamping degenerate parameters.
    #[must_use]
    pub fn new(element_size: Size, element_spacing: f64, line_spacing: f64) -> Self {
        Self {
            element_size: clamp_size(element_size),
            element_spacing: sanitize_spacing(element_spacing),
            line_spacing: sanitize_spacing(line_spacing),
        }
    }

    /// Returns this layout with a different element size.
    #[must_use]
    pub fn with_element_size(mut self, element_size: Size) -> Self {
        self.set_element_size(element_size);
        self
    }

    /// Returns this layout with a different spacing between elements of a line.
    #[must_use]
    pub fn with_element_spacing(mut self, spacing: f64) -> Self {
        self.set_element_spacing(spacing);
        self
    }

    /// Returns this layout with a different spacing between lines.
    #[must_use]
    pub fn with_line_spacing(mut self, spacing: f64) -> Self {
        self.set_line_spacing(spacing);
        self
    }

    /// Sets the element size. Components below [`MIN_ELEMENT_EXTENT`] are clamped.
    pub fn set_element_size(&mut self, element_size: Size) {
        self.element_size = clamp_size(element_size);
    }

    /// Sets the spacing between elements of a line.
    pub fn set_element_spacing(&mut self, spacing: f64) {
        self.element_spacing = sanitize_spacing(spacing);
    }

    /// Sets the spacing between lines.
    pub fn set_line_spacing(&mut self, spacing: f64) {
        self.line_spacing = sanitize_spacing(spacing);
    }

    /// Returns the (clamped) element size.
    #[must_use]
    pub const fn element_size(&self) -> Size {
        self.element_size
    }

    /// Returns the spacing between elements of a line.
    #[must_use]
    pub const fn element_spacing(&self) -> f64 {
        self.element_spacing
    }

    /// Returns the spacing between lines.
    #[must_use]
    pub const fn line_spacing(&self) -> f64 {
        self.line_spacing
    }

    /// Distance between the starts of two consecutive elements within a line.
    #[must_use]
    pub fn element_pitch(&self, axis: ScrollAxis) -> f64 {
        (self.element_spacing + axis.cross(self.element_size)).max(MIN_PITCH)
    }

    /// Distance between the starts of two consecutive lines.
    #[must_use]
    pub fn line_pitch(&self, axis: ScrollAxis) -> f64 {
        (self.line_spacing + axis.along(self.element_size)).max(MIN_PITCH)
    }

    /// Number of elements that fit in one line of a viewport.
    ///
    /// This is `1 + floor(max(0, cross_viewport - cross_element) / element_pitch)`
    /// and is always at least `1`, even when one element is wider than the viewport.
    #[must_use]
    pub fn elements_per_line(&self, axis: ScrollAxis, viewport: Size) -> usize {
        let remain = axis.cross(viewport) - axis.cross(self.element_size);
        if remain > 0.0 {
            1 + whole_steps(remain, self.element_pitch(axis))
        } else {
            1
        }
    }

    /// Extent of the scrollable content along the scroll axis for `line_count` lines.
    ///
    /// The last line contributes its element extent but no trailing spacing.
    #[must_use]
    pub fn content_extent(&self, axis: ScrollAxis, line_count: usize) -> f64 {
        if line_count == 0 {
            return 0.0;
        }
        let along = axis.along(self.element_size);
        (along + (line_count - 1) as f64 * self.line_pitch(axis)).max(0.0)
    }

    /// Number of line containers needed to cover a viewport.
    ///
    /// Two slots are always kept for the partially visible lines at either
    /// edge. The remaining viewport length after one line adds one slot per whole
    /// line pitch, plus one more when the division leaves a remainder.
    ///
    /// When negative line spacing makes lines overlap, more lines can intersect
    /// the viewport than that count suggests; the capacity is raised so that
    /// every simultaneously visible line still maps to a distinct slot.
    #[must_use]
    pub fn pool_capacity(&self, axis: ScrollAxis, viewport: Size) -> usize {
        let along = axis.along(self.element_size);
        let viewport_along = axis.along(viewport).max(0.0);
        let pitch = self.line_pitch(axis);

        let mut capacity = 2;
        let remain = viewport_along - along;
        if remain > 0.0 {
            capacity += whole_steps(remain, pitch);
            if remain % pitch != 0.0 {
                capacity += 1;
            }
        }

        let covering =
            usize::try_from(ceil_to_isize((viewport_along + along) / pitch)).unwrap_or(1);
        capacity.max(covering)
    }

    /// Offset of a line's leading edge from the start of the content.
    #[must_use]
    pub fn line_offset(&self, axis: ScrollAxis, line: usize) -> f64 {
        line as f64 * self.line_pitch(axis)
    }

    /// Signed bounds of the lines that intersect a viewport.
    ///
    /// Line `i` spans `[i * pitch, i * pitch + along)` and the viewport spans
    /// `[offset, offset + viewport_along)`. The returned `(first, last)` pair is
    /// inclusive and is not clamped to the number of lines; negative offsets
    /// (overscroll before the start) yield negative bounds. `first > last` means
    /// no line intersects the viewport.
    #[must_use]
    pub fn visible_line_bounds(
        &self,
        axis: ScrollAxis,
        offset: f64,
        viewport_along: f64,
    ) -> (isize, isize) {
        let along = axis.along(self.element_size);
        let pitch = self.line_pitch(axis);
        let first = floor_to_isize((offset - along) / pitch).saturating_add(1);
        let last = ceil_to_isize((offset + viewport_along) / pitch).saturating_sub(1);
        (first, last)
    }

    /// Scroll offset that centers `line` within a viewport of length `viewport_along`.
    ///
    /// The result is not clamped to the content.
    #[must_use]
    pub fn centered_offset(&self, axis: ScrollAxis, line: usize, viewport_along: f64) -> f64 {
        let along = axis.along(self.element_size);
        self.line_offset(axis, line) + (along - viewport_along) / 2.0
    }
}

/// Number of lines needed for `len` records at `elements_per_line` records per line.
///
/// This is `ceil(len / elements_per_line)`; an `elements_per_line` of `0` is
/// treated as `1`.
#[must_use]
pub const fn line_count(len: usize, elements_per_line: usize) -> usize {
    if elements_per_line == 0 {
        return len;
    }
    len.div_ceil(elements_per_line)
}

fn whole_steps(length: f64, pitch: f64) -> usize {
    usize::try_from(floor_to_isize(length / pitch)).unwrap_or(0)
}

fn clamp_size(size: Size) -> Size {
    // `f64::max` returns the other operand for NaN, so NaN also becomes the minimum.
    Size::new(
        size.width.max(MIN_ELEMENT_EXTENT),
        size.height.max(MIN_ELEMENT_EXTENT),
    )
}

fn sanitize_spacing(spacing: f64) -> f64 {
    debug_assert!(
        spacing.is_finite(),
        "GridLayout spacings must be finite; got {spacing:?}"
    );
    if spacing.is_finite() { spacing } else { 0.0 }
}
