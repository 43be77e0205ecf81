// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll orientation and along/cross projections of 2D geometry.

use kurbo::{Point, Size};

/// The single axis along which a recycler scrolls.
///
/// Lines are rows for [`ScrollAxis::Vertical`] and columns for
/// [`ScrollAxis::Horizontal`]. The *along* axis is the scroll direction and the
/// *cross* axis is perpendicular to it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    /// Content scrolls along y; lines are rows stacked downwards.
    #[default]
    Vertical,
    /// Content scrolls along x; lines are columns stacked rightwards.
    Horizontal,
}

impl ScrollAxis {
    /// Returns the component of `size` along the scroll axis.
    #[must_use]
    pub const fn along(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Returns the component of `size` across the scroll axis.
    #[must_use]
    pub const fn cross(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// Builds a [`Size`] from along-axis and cross-axis lengths.
    #[must_use]
    pub const fn size(self, along: f64, cross: f64) -> Size {
        match self {
            Self::Vertical => Size::new(cross, along),
            Self::Horizontal => Size::new(along, cross),
        }
    }

    /// Builds a [`Point`] from along-axis and cross-axis coordinates.
    #[must_use]
    pub const fn point(self, along: f64, cross: f64) -> Point {
        match self {
            Self::Vertical => Point::new(cross, along),
            Self::Horizontal => Point::new(along, cross),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollAxis;
    use kurbo::{Point, Size};

    #[test]
    fn projections_swap_with_orientation() {
        let size = Size::new(300.0, 500.0);
        assert_eq!(ScrollAxis::Vertical.along(size), 500.0);
        assert_eq!(ScrollAxis::Vertical.cross(size), 300.0);
        assert_eq!(ScrollAxis::Horizontal.along(size), 300.0);
        assert_eq!(ScrollAxis::Horizontal.cross(size), 500.0);
    }

    #[test]
    fn builders_invert_projections() {
        for axis in [ScrollAxis::Vertical, ScrollAxis::Horizontal] {
            let size = axis.size(120.0, 40.0);
            assert_eq!(axis.along(size), 120.0);
            assert_eq!(axis.cross(size), 40.0);
        }
        assert_eq!(ScrollAxis::Vertical.point(10.0, 0.0), Point::new(0.0, 10.0));
        assert_eq!(
            ScrollAxis::Horizontal.point(10.0, 0.0),
            Point::new(10.0, 0.0)
        );
    }
}
