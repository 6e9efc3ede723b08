// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability a scrollable list or grid exposes to the preheat controller.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Rect;

use crate::ScrollAxis;

/// A scrollable collection of discretely indexed items.
///
/// Hosts implement this for their list/grid view types. All queries are
/// expected to be synchronous and free of side effects; they are called from
/// whichever thread drives [`PreheatController`][crate::PreheatController].
pub trait ScrollableCollection {
    /// Identifier of an item. Ordering should follow layout order along the
    /// scroll axis, since preheat sets are sorted by it.
    type Index: Copy + Ord + Hash + Debug;

    /// The axis this collection scrolls along. Must not change over the
    /// collection's lifetime.
    fn axis(&self) -> ScrollAxis;

    /// The visible region in content coordinates: origin at the scroll offset,
    /// size equal to the viewport size.
    fn visible_bounds(&self) -> Rect;

    /// Visit items whose frame intersects `rect`.
    ///
    /// Reporting extra items near the edges is fine; missing an item that
    /// intersects is not. Items may be reported more than once.
    fn visit_indices_in<F: FnMut(Self::Index)>(&self, rect: Rect, f: F);

    /// Visit items currently on screen.
    fn visit_visible_indices<F: FnMut(Self::Index)>(&self, f: F);

    /// Collect items whose frame intersects `rect`.
    ///
    /// The default implementation collects [`visit_indices_in`][Self::visit_indices_in].
    fn indices_in(&self, rect: Rect) -> Vec<Self::Index> {
        let mut out = Vec::new();
        self.visit_indices_in(rect, |i| out.push(i));
        out
    }

    /// Collect items currently on screen.
    ///
    /// The default implementation collects [`visit_visible_indices`][Self::visit_visible_indices].
    fn visible_indices(&self) -> Vec<Self::Index> {
        let mut out = Vec::new();
        self.visit_visible_indices(|i| out.push(i));
        out
    }
}

impl<C: ScrollableCollection + ?Sized> ScrollableCollection for &C {
    type Index = C::Index;

    fn axis(&self) -> ScrollAxis {
        (**self).axis()
    }

    fn visible_bounds(&self) -> Rect {
        (**self).visible_bounds()
    }

    fn visit_indices_in<F: FnMut(Self::Index)>(&self, rect: Rect, f: F) {
        (**self).visit_indices_in(rect, f);
    }

    fn visit_visible_indices<F: FnMut(Self::Index)>(&self, f: F) {
        (**self).visit_visible_indices(f);
    }
}

/// Half-open overlap test between two spans: touching edges do not overlap
/// and empty spans overlap nothing.
#[inline]
pub(crate) fn spans_overlap(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 < a.1 && b.0 < b.1 && a.0 < b.1 && b.0 < a.1
}
