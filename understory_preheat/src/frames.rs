// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A collection of items with precomputed frames.
//!
//! [`FrameCollection`] suits hosts that measure their own layout (variable row
//! heights, flow layouts with uneven cells) and just need region queries over
//! the resulting frames. Frames are bucketed into a uniform grid of square
//! cells; a region query only touches the buckets it overlaps.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::collection::spans_overlap;
use crate::{ScrollAxis, ScrollableCollection};

type CellKey = (i32, i32);

/// Items with explicit frames, indexed by a uniform bucket grid.
pub struct FrameCollection<I> {
    axis: ScrollAxis,
    bucket_size: f64,
    items: HashMap<I, Entry>,
    buckets: HashMap<CellKey, SmallVec<[I; 8]>>,
    scroll_offset: Point,
    viewport_size: Size,
}

#[derive(Clone, Debug)]
struct Entry {
    frame: Rect,
    // Buckets currently holding this item.
    cells: SmallVec<[CellKey; 4]>,
}

impl<I: Debug> Debug for FrameCollection<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameCollection")
            .field("axis", &self.axis)
            .field("bucket_size", &self.bucket_size)
            .field("items", &self.items.len())
            .field("buckets", &self.buckets.len())
            .field("scroll_offset", &self.scroll_offset)
            .field("viewport_size", &self.viewport_size)
            .finish()
    }
}

impl<I: Copy + Eq + Hash> FrameCollection<I> {
    /// Create an empty collection scrolling along `axis`.
    ///
    /// `bucket_size` is the side of each square bucket; something close to a
    /// typical item size works well. It must be strictly positive.
    pub fn new(axis: ScrollAxis, bucket_size: f64) -> Self {
        debug_assert!(bucket_size > 0.0, "bucket_size must be strictly positive");
        Self {
            axis,
            bucket_size,
            items: HashMap::new(),
            buckets: HashMap::new(),
            scroll_offset: Point::ZERO,
            viewport_size: Size::ZERO,
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert or move an item. Returns its previous frame, if any.
    pub fn insert(&mut self, index: I, frame: Rect) -> Option<Rect> {
        let previous = self.remove(index);
        let cells = self.covered_cells(frame);
        for &cell in &cells {
            self.buckets.entry(cell).or_default().push(index);
        }
        self.items.insert(index, Entry { frame, cells });
        previous
    }

    /// Remove an item. Returns its frame, if it was present.
    pub fn remove(&mut self, index: I) -> Option<Rect> {
        let entry = self.items.remove(&index)?;
        for cell in &entry.cells {
            let Some(bucket) = self.buckets.get_mut(cell) else {
                continue;
            };
            if let Some(pos) = bucket.iter().position(|&i| i == index) {
                bucket.swap_remove(pos);
            }
            if bucket.is_empty() {
                self.buckets.remove(cell);
            }
        }
        Some(entry.frame)
    }

    /// Remove all items. Scroll state is kept.
    pub fn clear(&mut self) {
        self.items.clear();
        self.buckets.clear();
    }

    /// Frame of `index`, if present.
    pub fn frame_of(&self, index: I) -> Option<Rect> {
        self.items.get(&index).map(|e| e.frame)
    }

    /// Current scroll offset.
    pub const fn scroll_offset(&self) -> Point {
        self.scroll_offset
    }

    /// Set the scroll offset.
    pub fn set_scroll_offset(&mut self, offset: Point) {
        self.scroll_offset = offset;
    }

    /// Current viewport size.
    pub const fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
    }

    fn cell_range(&self, min: f64, max: f64) -> (i32, i32) {
        let c0 = cell_coord(min, self.bucket_size);
        let c1 = cell_coord(max, self.bucket_size);
        if c0 <= c1 { (c0, c1) } else { (c1, c0) }
    }

    fn covered_cells(&self, rect: Rect) -> SmallVec<[CellKey; 4]> {
        let (ix0, ix1) = self.cell_range(rect.x0, rect.x1);
        let (iy0, iy1) = self.cell_range(rect.y0, rect.y1);
        let mut out = SmallVec::new();
        for ix in ix0..=ix1 {
            for iy in iy0..=iy1 {
                out.push((ix, iy));
            }
        }
        out
    }
}

impl<I: Copy + Ord + Hash + Debug> ScrollableCollection for FrameCollection<I> {
    type Index = I;

    fn axis(&self) -> ScrollAxis {
        self.axis
    }

    fn visible_bounds(&self) -> Rect {
        Rect::from_origin_size(self.scroll_offset, self.viewport_size)
    }

    fn visit_indices_in<F: FnMut(I)>(&self, rect: Rect, mut f: F) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let (ix0, ix1) = self.cell_range(rect.x0, rect.x1);
        let (iy0, iy1) = self.cell_range(rect.y0, rect.y1);

        let mut seen: HashSet<I> = HashSet::new();
        for ix in ix0..=ix1 {
            for iy in iy0..=iy1 {
                let Some(bucket) = self.buckets.get(&(ix, iy)) else {
                    continue;
                };
                for &index in bucket {
                    if !seen.insert(index) {
                        continue;
                    }
                    let Some(entry) = self.items.get(&index) else {
                        continue;
                    };
                    let frame = entry.frame;
                    if spans_overlap((frame.x0, frame.x1), (rect.x0, rect.x1))
                        && spans_overlap((frame.y0, frame.y1), (rect.y0, rect.y1))
                    {
                        f(index);
                    }
                }
            }
        }
    }

    fn visit_visible_indices<F: FnMut(I)>(&self, f: F) {
        self.visit_indices_in(self.visible_bounds(), f);
    }
}

/// Map a coordinate to a bucket coordinate, rounding towards -∞ and
/// saturating at the `i32` range.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Bucket coordinates are intentionally i32; out-of-range values are saturated."
)]
fn cell_coord(value: f64, bucket_size: f64) -> i32 {
    let t = value / bucket_size;
    let coord = t as i32;
    if t < 0.0 && f64::from(coord) > t {
        coord.saturating_sub(1)
    } else {
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn sorted(mut v: Vec<u32>) -> Vec<u32> {
        v.sort_unstable();
        v
    }

    #[test]
    fn insert_query_remove() {
        let mut frames = FrameCollection::new(ScrollAxis::Vertical, 50.0);
        frames.insert(1_u32, Rect::new(0.0, 0.0, 100.0, 40.0));
        frames.insert(2, Rect::new(0.0, 40.0, 100.0, 120.0));
        frames.insert(3, Rect::new(0.0, 120.0, 100.0, 130.0));
        assert_eq!(frames.len(), 3);

        let hits = sorted(frames.indices_in(Rect::new(10.0, 30.0, 20.0, 125.0)));
        assert_eq!(hits, vec![1, 2, 3]);

        // Touching the bottom edge of item 1 only.
        let hits = sorted(frames.indices_in(Rect::new(0.0, 40.0, 100.0, 60.0)));
        assert_eq!(hits, vec![2]);

        assert_eq!(frames.remove(2), Some(Rect::new(0.0, 40.0, 100.0, 120.0)));
        assert_eq!(frames.remove(2), None);
        assert!(frames.indices_in(Rect::new(0.0, 50.0, 100.0, 110.0)).is_empty());
    }

    #[test]
    fn large_frames_are_reported_once() {
        let mut frames = FrameCollection::new(ScrollAxis::Vertical, 10.0);
        frames.insert(7_u32, Rect::new(0.0, 0.0, 95.0, 95.0));
        assert_eq!(frames.indices_in(Rect::new(5.0, 5.0, 90.0, 90.0)), vec![7]);
    }

    #[test]
    fn moving_an_item_updates_buckets() {
        let mut frames = FrameCollection::new(ScrollAxis::Horizontal, 32.0);
        frames.insert(1_u32, Rect::new(0.0, 0.0, 10.0, 10.0));
        let old = frames.insert(1, Rect::new(-200.0, 0.0, -190.0, 10.0));
        assert_eq!(old, Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(frames.len(), 1);
        assert!(frames.indices_in(Rect::new(0.0, 0.0, 10.0, 10.0)).is_empty());
        assert_eq!(
            frames.indices_in(Rect::new(-195.0, 0.0, -180.0, 5.0)),
            vec![1]
        );
        assert_eq!(frames.frame_of(1), Some(Rect::new(-200.0, 0.0, -190.0, 10.0)));
    }

    #[test]
    fn visible_uses_scroll_state() {
        let mut frames = FrameCollection::new(ScrollAxis::Vertical, 50.0);
        for i in 0..20_u32 {
            let y = f64::from(i) * 25.0;
            frames.insert(i, Rect::new(0.0, y, 100.0, y + 25.0));
        }
        frames.set_viewport_size(Size::new(100.0, 50.0));
        frames.set_scroll_offset(Point::new(0.0, 100.0));
        assert_eq!(frames.visible_bounds(), Rect::new(0.0, 100.0, 100.0, 150.0));
        assert_eq!(sorted(frames.visible_indices()), vec![4, 5]);

        frames.clear();
        assert!(frames.is_empty());
        assert!(frames.visible_indices().is_empty());
        assert_eq!(frames.scroll_offset(), Point::new(0.0, 100.0));
    }

    #[test]
    fn cell_coord_floors_and_saturates() {
        assert_eq!(cell_coord(-0.5, 1.0), -1);
        assert_eq!(cell_coord(0.0, 1.0), 0);
        assert_eq!(cell_coord(9.99, 10.0), 0);
        assert_eq!(cell_coord(1e20, 1.0), i32::MAX);
        assert_eq!(cell_coord(-1e20, 1.0), i32::MIN);
    }
}
