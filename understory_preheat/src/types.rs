// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item indices and scroll axes.

use kurbo::{Point, Rect, Size};

/// Location of an item inside a sectioned collection.
///
/// Ordering is lexicographic: first by [`group`](Self::group), then by
/// [`item`](Self::item). Flat lists use group `0` throughout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemIndex {
    /// Section (group) containing the item.
    pub group: usize,
    /// Position of the item within its group.
    pub item: usize,
}

impl ItemIndex {
    /// Create an index from a group and an item-within-group.
    #[inline]
    pub const fn new(group: usize, item: usize) -> Self {
        Self { group, item }
    }
}

impl From<(usize, usize)> for ItemIndex {
    #[inline]
    fn from((group, item): (usize, usize)) -> Self {
        Self::new(group, item)
    }
}

/// The single dimension along which a collection scrolls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    /// Content scrolls along `y`.
    #[default]
    Vertical,
    /// Content scrolls along `x`.
    Horizontal,
}

impl ScrollAxis {
    /// Component of `point` along the scroll axis.
    #[inline]
    pub const fn along(self, point: Point) -> f64 {
        match self {
            Self::Vertical => point.y,
            Self::Horizontal => point.x,
        }
    }

    /// Length of `size` along the scroll axis.
    #[inline]
    pub const fn extent(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Length of `size` across the scroll axis.
    #[inline]
    pub const fn cross_extent(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// The `(min, max)` span of `rect` along the scroll axis.
    #[inline]
    pub const fn span(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Vertical => (rect.y0, rect.y1),
            Self::Horizontal => (rect.x0, rect.x1),
        }
    }

    /// The `(min, max)` span of `rect` across the scroll axis.
    #[inline]
    pub const fn cross_span(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Vertical => (rect.x0, rect.x1),
            Self::Horizontal => (rect.y0, rect.y1),
        }
    }

    /// Build a rectangle from spans along and across this axis.
    #[inline]
    pub const fn rect(self, along: (f64, f64), cross: (f64, f64)) -> Rect {
        match self {
            Self::Vertical => Rect::new(cross.0, along.0, cross.1, along.1),
            Self::Horizontal => Rect::new(along.0, cross.0, along.1, cross.1),
        }
    }

    /// Build a point from components along and across this axis.
    #[inline]
    pub const fn point(self, along: f64, cross: f64) -> Point {
        match self {
            Self::Vertical => Point::new(cross, along),
            Self::Horizontal => Point::new(along, cross),
        }
    }
}
