// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A sectioned grid of uniformly sized cells.
//!
//! [`UniformGrid`] lays items out along a scroll axis in *tracks* (rows of a
//! vertical grid, columns of a horizontal one). Each track holds
//! `cells_per_track` cells. Sections are stacked one after another; each
//! starts on a fresh track, optionally after a header band.
//!
//! Along the axis, section `s` occupies:
//!
//! ```text
//! [start(s), start(s) + header)                      header band
//! [start(s) + header + k * pitch, ... + track)       track k, for k in 0..tracks(s)
//! pitch = track + spacing
//! start(s + 1) = start(s) + header + tracks(s) * pitch
//! ```
//!
//! Across the axis, cell `c` of a track occupies `[c * cell, (c + 1) * cell)`.
//! Intersection tests are half-open, so items that merely touch a query
//! rectangle are not reported.

use alloc::vec::Vec;
use core::num::NonZeroUsize;
use core::ops::Range;

use kurbo::{Point, Rect, Size, Vec2};

use crate::collection::spans_overlap;
use crate::{ItemIndex, ScrollAxis, ScrollableCollection};

/// A sectioned list/grid with uniform cell sizes and its own scroll state.
///
/// A single-column vertical grid is a plain sectioned list; see
/// [`UniformGrid::list`].
#[derive(Clone, Debug)]
pub struct UniformGrid {
    axis: ScrollAxis,
    cells_per_track: NonZeroUsize,
    track_extent: f64,
    cell_extent: f64,
    track_spacing: f64,
    header_extent: f64,
    sections: Vec<usize>,
    // Prefix offsets along the axis; `section_starts[s + 1]` ends section `s`.
    section_starts: Vec<f64>,
    scroll_offset: Point,
    viewport_size: Size,
}

impl UniformGrid {
    /// Create a grid.
    ///
    /// - `sections`: number of items in each section.
    /// - `cells_per_track`: cells per row (vertical) or column (horizontal).
    /// - `cell_size`: size of each cell in content coordinates.
    ///
    /// The grid starts with a zero offset and a zero-sized viewport.
    pub fn new(
        axis: ScrollAxis,
        sections: impl IntoIterator<Item = usize>,
        cells_per_track: NonZeroUsize,
        cell_size: Size,
    ) -> Self {
        let mut grid = Self {
            axis,
            cells_per_track,
            track_extent: non_negative(axis.extent(cell_size)),
            cell_extent: non_negative(axis.cross_extent(cell_size)),
            track_spacing: 0.0,
            header_extent: 0.0,
            sections: sections.into_iter().collect(),
            section_starts: Vec::new(),
            scroll_offset: Point::ZERO,
            viewport_size: Size::ZERO,
        };
        grid.rebuild();
        grid
    }

    /// Create a vertical single-column list of `row_height` rows spanning `width`.
    pub fn list(sections: impl IntoIterator<Item = usize>, width: f64, row_height: f64) -> Self {
        Self::new(
            ScrollAxis::Vertical,
            sections,
            NonZeroUsize::MIN,
            Size::new(width, row_height),
        )
    }

    /// Returns this grid with `spacing` inserted after every track.
    #[must_use]
    pub fn with_track_spacing(mut self, spacing: f64) -> Self {
        self.track_spacing = non_negative(spacing);
        self.rebuild();
        self
    }

    /// Returns this grid with a header band of `extent` before every section.
    #[must_use]
    pub fn with_header_extent(mut self, extent: f64) -> Self {
        self.header_extent = non_negative(extent);
        self.rebuild();
        self
    }

    /// Returns this grid with the given viewport size.
    #[must_use]
    pub fn with_viewport_size(mut self, size: Size) -> Self {
        self.viewport_size = size;
        self
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of items in `section`, or zero if it does not exist.
    pub fn items_in_section(&self, section: usize) -> usize {
        self.sections.get(section).copied().unwrap_or(0)
    }

    /// Total number of items across all sections.
    pub fn len(&self) -> usize {
        self.sections.iter().sum()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the per-section item counts.
    pub fn set_sections(&mut self, sections: impl IntoIterator<Item = usize>) {
        self.sections.clear();
        self.sections.extend(sections);
        self.rebuild();
    }

    /// Number of cells in each track.
    pub const fn cells_per_track(&self) -> usize {
        self.cells_per_track.get()
    }

    /// Change the number of cells in each track.
    pub fn set_cells_per_track(&mut self, cells_per_track: NonZeroUsize) {
        self.cells_per_track = cells_per_track;
        self.rebuild();
    }

    /// Length of all content along the scroll axis.
    pub fn content_extent(&self) -> f64 {
        self.section_starts.last().copied().unwrap_or(0.0)
    }

    /// Current scroll offset (top-left of the viewport in content coordinates).
    ///
    /// Offsets are not clamped to the content, so hosts with rubber-band
    /// scrolling can report positions past either end.
    pub const fn scroll_offset(&self) -> Point {
        self.scroll_offset
    }

    /// Set the scroll offset.
    pub fn set_scroll_offset(&mut self, offset: Point) {
        self.scroll_offset = offset;
    }

    /// Move the scroll offset by `delta`.
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.scroll_offset += delta;
    }

    /// Current viewport size.
    pub const fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
    }

    /// Frame of `index` in content coordinates, if it exists.
    pub fn item_frame(&self, index: ItemIndex) -> Option<Rect> {
        if index.item >= self.items_in_section(index.group) {
            return None;
        }
        let n = self.cells_per_track.get();
        let track = index.item / n;
        let cell = index.item % n;
        let lead = self.track_start(index.group, track);
        let cross = cell as f64 * self.cell_extent;
        Some(self.axis.rect(
            (lead, lead + self.track_extent),
            (cross, cross + self.cell_extent),
        ))
    }

    fn pitch(&self) -> f64 {
        self.track_extent + self.track_spacing
    }

    fn tracks_in_section(&self, section: usize) -> usize {
        self.items_in_section(section)
            .div_ceil(self.cells_per_track.get())
    }

    fn track_start(&self, section: usize, track: usize) -> f64 {
        self.section_starts[section] + self.header_extent + track as f64 * self.pitch()
    }

    fn rebuild(&mut self) {
        let pitch = self.pitch();
        self.section_starts.clear();
        self.section_starts.reserve(self.sections.len() + 1);
        let mut start = 0.0;
        self.section_starts.push(start);
        for section in 0..self.sections.len() {
            start += self.header_extent + self.tracks_in_section(section) as f64 * pitch;
            self.section_starts.push(start);
        }
    }

    /// Cells of a track overlapping the cross-axis span `cross`, half-open.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Cell positions are far below usize::MAX; the casts saturate."
    )]
    fn cell_range(&self, cross: (f64, f64)) -> Range<usize> {
        let n = self.cells_per_track.get();
        if cross.0 >= cross.1 {
            return 0..0;
        }
        // Truncation floors non-negative values and saturates negatives at zero.
        let start = (cross.0 / self.cell_extent) as usize;
        let t = cross.1 / self.cell_extent;
        let mut end = t as usize;
        if (end as f64) < t {
            end = end.saturating_add(1);
        }
        start.min(n)..end.min(n)
    }

    fn visit_section<F: FnMut(ItemIndex)>(
        &self,
        section: usize,
        along: (f64, f64),
        cells: Range<usize>,
        f: &mut F,
    ) {
        let n = self.cells_per_track.get();
        let count = self.items_in_section(section);
        let tracks = self.tracks_in_section(section);
        let first_track_start = self.track_start(section, 0);
        let pitch = self.pitch();

        // Truncation floors non-negative values and saturates negatives at zero.
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Track positions are far below usize::MAX; the cast saturates."
        )]
        let guess = ((along.0 - first_track_start) / pitch) as usize;
        let mut track = guess.saturating_sub(1);
        while track < tracks {
            let lead = self.track_start(section, track);
            if lead >= along.1 {
                break;
            }
            if spans_overlap((lead, lead + self.track_extent), along) {
                for cell in cells.clone() {
                    let item = track * n + cell;
                    if item < count {
                        f(ItemIndex::new(section, item));
                    }
                }
            }
            track += 1;
        }
    }
}

impl ScrollableCollection for UniformGrid {
    type Index = ItemIndex;

    fn axis(&self) -> ScrollAxis {
        self.axis
    }

    fn visible_bounds(&self) -> Rect {
        Rect::from_origin_size(self.scroll_offset, self.viewport_size)
    }

    fn visit_indices_in<F: FnMut(ItemIndex)>(&self, rect: Rect, mut f: F) {
        if self.track_extent <= 0.0 || self.cell_extent <= 0.0 {
            return;
        }
        let along = self.axis.span(rect);
        let cross = self.axis.cross_span(rect);
        let cells = self.cell_range(cross);
        if cells.is_empty() || along.0 >= along.1 {
            return;
        }

        let first = self.section_starts[1..].partition_point(|&end| end <= along.0);
        for section in first..self.sections.len() {
            if self.section_starts[section] >= along.1 {
                break;
            }
            self.visit_section(section, along, cells.clone(), &mut f);
        }
    }

    fn visit_visible_indices<F: FnMut(ItemIndex)>(&self, f: F) {
        self.visit_indices_in(self.visible_bounds(), f);
    }
}

fn non_negative(v: f64) -> f64 {
    if v > 0.0 { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ix(group: usize, item: usize) -> ItemIndex {
        ItemIndex::new(group, item)
    }

    fn three_columns() -> NonZeroUsize {
        NonZeroUsize::new(3).unwrap()
    }

    #[test]
    fn list_rows_in_band() {
        let list = UniformGrid::list([100], 320.0, 10.0);
        assert_eq!(list.content_extent(), 1000.0);
        let hits = list.indices_in(Rect::new(0.0, 130.0, 320.0, 230.0));
        let expected: Vec<_> = (13..23).map(|i| ix(0, i)).collect();
        assert_eq!(hits, expected);
    }

    #[test]
    fn partially_covered_rows_are_included() {
        let list = UniformGrid::list([100], 320.0, 10.0);
        let hits = list.indices_in(Rect::new(0.0, 5.0, 320.0, 21.0));
        assert_eq!(hits, vec![ix(0, 0), ix(0, 1), ix(0, 2)]);
    }

    #[test]
    fn grid_cells_respect_cross_axis() {
        // 3 columns of 100px, rows of 50px.
        let grid = UniformGrid::new(
            ScrollAxis::Vertical,
            [7],
            three_columns(),
            Size::new(100.0, 50.0),
        );
        // Rows 0..3 (7 items => last row has one cell).
        assert_eq!(grid.content_extent(), 150.0);
        // Only the middle column, second and third rows.
        let hits = grid.indices_in(Rect::new(150.0, 60.0, 180.0, 140.0));
        assert_eq!(hits, vec![ix(0, 4)]);
        // Third row only holds item 6.
        let hits = grid.indices_in(Rect::new(0.0, 100.0, 300.0, 150.0));
        assert_eq!(hits, vec![ix(0, 6)]);
    }

    #[test]
    fn sections_start_new_tracks_after_headers() {
        let grid = UniformGrid::new(
            ScrollAxis::Vertical,
            [4, 2],
            three_columns(),
            Size::new(10.0, 10.0),
        )
        .with_header_extent(5.0);
        // Section 0: header 0..5, rows 5..15 and 15..25. Section 1: header 25..30, row 30..40.
        assert_eq!(grid.content_extent(), 40.0);
        assert_eq!(
            grid.item_frame(ix(0, 3)),
            Some(Rect::new(0.0, 15.0, 10.0, 25.0))
        );
        assert_eq!(
            grid.item_frame(ix(1, 1)),
            Some(Rect::new(10.0, 30.0, 20.0, 40.0))
        );
        assert_eq!(grid.item_frame(ix(1, 2)), None);

        // A band covering only the header of section 1 hits nothing.
        assert!(grid.indices_in(Rect::new(0.0, 25.0, 30.0, 30.0)).is_empty());
        let hits = grid.indices_in(Rect::new(0.0, 20.0, 30.0, 35.0));
        assert_eq!(hits, vec![ix(0, 3), ix(1, 0), ix(1, 1)]);
    }

    #[test]
    fn spacing_gaps_report_nothing() {
        let list = UniformGrid::list([10], 100.0, 10.0).with_track_spacing(10.0);
        // Rows at 0..10, 20..30, 40..50, ...
        assert!(list.indices_in(Rect::new(0.0, 10.0, 100.0, 20.0)).is_empty());
        assert_eq!(
            list.indices_in(Rect::new(0.0, 15.0, 100.0, 45.0)),
            vec![ix(0, 1), ix(0, 2)]
        );
    }

    #[test]
    fn horizontal_axis() {
        // Two cells per column, columns 40px wide, cells 25px tall.
        let grid = UniformGrid::new(
            ScrollAxis::Horizontal,
            [6],
            NonZeroUsize::new(2).unwrap(),
            Size::new(40.0, 25.0),
        );
        assert_eq!(grid.content_extent(), 120.0);
        assert_eq!(
            grid.item_frame(ix(0, 3)),
            Some(Rect::new(40.0, 25.0, 80.0, 50.0))
        );
        let hits = grid.indices_in(Rect::new(50.0, 0.0, 90.0, 20.0));
        assert_eq!(hits, vec![ix(0, 2), ix(0, 4)]);
    }

    #[test]
    fn visible_follows_scroll_state() {
        let mut list =
            UniformGrid::list([50], 100.0, 10.0).with_viewport_size(Size::new(100.0, 30.0));
        assert_eq!(list.visible_indices(), vec![ix(0, 0), ix(0, 1), ix(0, 2)]);
        list.scroll_by(Vec2::new(0.0, 15.0));
        assert_eq!(list.scroll_offset(), Point::new(0.0, 15.0));
        assert_eq!(
            list.visible_indices(),
            vec![ix(0, 1), ix(0, 2), ix(0, 3), ix(0, 4)]
        );
        // Past the end, or with nothing to show.
        list.set_scroll_offset(Point::new(0.0, 600.0));
        assert!(list.visible_indices().is_empty());
        list.set_scroll_offset(Point::ZERO);
        list.set_viewport_size(Size::ZERO);
        assert!(list.visible_indices().is_empty());
    }

    #[test]
    fn cell_range_is_half_open_and_clamped() {
        let grid = UniformGrid::new(
            ScrollAxis::Vertical,
            [9],
            three_columns(),
            Size::new(10.0, 10.0),
        );
        assert_eq!(grid.cell_range((0.0, 30.0)), 0..3);
        assert_eq!(grid.cell_range((10.0, 20.0)), 1..2);
        assert_eq!(grid.cell_range((9.5, 10.5)), 0..2);
        assert_eq!(grid.cell_range((-50.0, 5.0)), 0..1);
        assert_eq!(grid.cell_range((25.0, 1e9)), 2..3);
        assert!(grid.cell_range((30.0, 40.0)).is_empty());
        assert!(grid.cell_range((-20.0, 0.0)).is_empty());
        assert!(grid.cell_range((15.0, 15.0)).is_empty());
    }

    #[test]
    fn wide_tracks_only_touch_overlapping_cells() {
        // Fifty million one-pixel cells per row; a query a few pixels wide
        // must resolve to those few cells.
        let grid = UniformGrid::new(
            ScrollAxis::Vertical,
            [150_000_000],
            NonZeroUsize::new(50_000_000).unwrap(),
            Size::new(1.0, 10.0),
        );
        assert_eq!(grid.content_extent(), 30.0);
        let hits = grid.indices_in(Rect::new(1_000.5, 12.0, 1_003.0, 25.0));
        assert_eq!(
            hits,
            vec![
                ix(0, 50_001_000),
                ix(0, 50_001_001),
                ix(0, 50_001_002),
                ix(0, 100_001_000),
                ix(0, 100_001_001),
                ix(0, 100_001_002),
            ]
        );
        // Cells beyond the track are never reported.
        let hits = grid.indices_in(Rect::new(49_999_999.5, 0.0, 1e12, 5.0));
        assert_eq!(hits, vec![ix(0, 49_999_999)]);
    }

    #[test]
    fn empty_and_degenerate_grids() {
        let empty = UniformGrid::list([], 100.0, 10.0);
        assert!(empty.is_empty());
        assert_eq!(empty.content_extent(), 0.0);
        assert!(empty.indices_in(Rect::new(0.0, 0.0, 100.0, 100.0)).is_empty());

        let zero_rows = UniformGrid::list([10], 100.0, 0.0);
        assert!(
            zero_rows
                .indices_in(Rect::new(0.0, 0.0, 100.0, 100.0))
                .is_empty()
        );

        let mut grid = UniformGrid::list([0, 0, 3], 100.0, 10.0);
        assert_eq!(grid.len(), 3);
        assert_eq!(
            grid.indices_in(Rect::new(0.0, 0.0, 100.0, 100.0)),
            vec![ix(2, 0), ix(2, 1), ix(2, 2)]
        );
        grid.set_sections([2]);
        assert_eq!(grid.section_count(), 1);
        grid.set_cells_per_track(NonZeroUsize::new(2).unwrap());
        assert_eq!(grid.content_extent(), 10.0);
    }
}
