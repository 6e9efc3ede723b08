// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Preheat window geometry and the scroll-direction/throttle heuristics.
//!
//! These are free functions so hosts that drive their own state can reuse the
//! geometry without a [`PreheatController`][crate::PreheatController].

use kurbo::{Point, Rect, Size};

use crate::ScrollAxis;

/// Distance the offset must move (strictly more than) before the window is recomputed.
///
/// This is the viewport length along `axis` multiplied by `update_ratio`.
#[inline]
#[must_use]
pub fn update_margin(axis: ScrollAxis, viewport: Size, update_ratio: f64) -> f64 {
    axis.extent(viewport) * update_ratio
}

/// Whether the offset has moved far enough from `previous` to warrant recomputation.
///
/// With no previous offset (cold start) this is always `true`. Otherwise the
/// Euclidean distance between the two offsets must exceed `margin`; moving
/// exactly `margin` does not trigger an update.
#[inline]
#[must_use]
pub fn should_update(previous: Option<Point>, current: Point, margin: f64) -> bool {
    match previous {
        None => true,
        Some(previous) => current.distance(previous) > margin,
    }
}

/// Whether scrolling is forward (towards larger offsets) along `axis`.
///
/// Cold starts count as forward so the first window looks ahead. Standing
/// still along the axis also counts as forward.
#[inline]
#[must_use]
pub fn is_scrolling_forward(axis: ScrollAxis, previous: Option<Point>, current: Point) -> bool {
    match previous {
        None => true,
        Some(previous) => axis.along(current) >= axis.along(previous),
    }
}

/// Compute the preheat window adjacent to `viewport`.
///
/// Along `axis` the window is `viewport length × size_ratio` long and starts at
/// the viewport's trailing edge when `forward`, or ends at its leading edge
/// otherwise. Across the axis it spans the viewport. The result is expanded
/// outward to integer coordinates so partially covered items are never lost.
///
/// ```
/// use kurbo::Rect;
/// use understory_preheat::{ScrollAxis, preheat_rect};
///
/// let viewport = Rect::new(0.0, 30.0, 320.0, 130.0);
/// let ahead = preheat_rect(ScrollAxis::Vertical, viewport, true, 1.0);
/// assert_eq!(ahead, Rect::new(0.0, 130.0, 320.0, 230.0));
///
/// let behind = preheat_rect(ScrollAxis::Vertical, viewport, false, 0.5);
/// assert_eq!(behind, Rect::new(0.0, -20.0, 320.0, 30.0));
/// ```
#[must_use]
pub fn preheat_rect(axis: ScrollAxis, viewport: Rect, forward: bool, size_ratio: f64) -> Rect {
    let (lead, trail) = axis.span(viewport);
    let length = (trail - lead) * size_ratio;
    let along = if forward {
        (trail, trail + length)
    } else {
        (lead - length, lead)
    };
    axis.rect(along, axis.cross_span(viewport)).expand()
}
