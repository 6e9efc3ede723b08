// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_preheat --heading-base-level=0

//! Understory Preheat: scroll-driven preheat windows for lists and grids.
//!
//! Content-heavy lists and grids hide the latency of expensive per-item work
//! (image decoding, network fetches) by starting it *before* items scroll into
//! view. This crate decides which items those are. It does not do the work
//! itself and keeps no resources; it tells the host which items entered and
//! left the "preheat" set as the user scrolls.
//!
//! The core concepts are:
//!
//! - [`ScrollableCollection`]: the capability a host's list/grid exposes: its
//!   [`ScrollAxis`], the visible bounds, and "which items intersect this
//!   rectangle" queries.
//! - [`PreheatController`]: owns a collection and the current preheat set. On
//!   every scroll-offset change it decides whether the offset moved far enough
//!   to matter, builds a lookahead rectangle in the scroll direction, maps it to
//!   items, drops those already visible, orders the rest by proximity and
//!   reports a [`PreheatDiff`].
//! - [`preheat_rect`], [`should_update`], [`is_scrolling_forward`]: the window
//!   geometry and heuristics as free functions.
//! - [`UniformGrid`] and [`FrameCollection`]: ready-made collections for
//!   uniform sectioned grids/lists and for items with measured frames.
//! - [`Subscription`]: a scoped registration with the host's offset-change
//!   notifications, released when the controller goes away.
//!
//! ## How the window moves
//!
//! With a vertical viewport of height `h` at offset `y`, scrolling forward
//! (down) gives a window covering `y + h .. y + h + h × size_ratio`; scrolling
//! backward gives `y − h × size_ratio .. y`. The window is only recomputed
//! once the offset has moved more than `h × update_ratio` (Euclidean
//! distance) from where it was last computed. See [`PreheatConfig`].
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Size};
//! use understory_preheat::{ItemIndex, PreheatController, UniformGrid};
//!
//! // 100 rows of 10px, in a 320×100 viewport.
//! let list = UniformGrid::list([100], 320.0, 10.0).with_viewport_size(Size::new(320.0, 100.0));
//! let mut controller = PreheatController::new(list);
//!
//! let started = Rc::new(RefCell::new(Vec::new()));
//! let sink = started.clone();
//! controller.set_handler(move |diff| {
//!     // Start work for `diff.added`, cancel it for `diff.removed`.
//!     sink.borrow_mut().extend(diff.added.iter().copied());
//! });
//!
//! // Enabling computes the first window: the screenful below the viewport.
//! controller.set_enabled(true);
//! assert_eq!(controller.indices().first(), Some(&ItemIndex::new(0, 10)));
//!
//! // Small moves are ignored...
//! controller.collection_mut().set_scroll_offset(Point::new(0.0, 10.0));
//! assert!(controller.on_scroll_offset_changed().is_none());
//!
//! // ...larger ones shift the window.
//! controller.collection_mut().set_scroll_offset(Point::new(0.0, 30.0));
//! let diff = controller.on_scroll_offset_changed().unwrap();
//! assert_eq!(diff.added.len(), 3);
//! assert_eq!(started.borrow().len(), 13);
//! ```
//!
//! All geometry uses [`kurbo`] types in a caller-chosen coordinate space
//! (typically logical pixels); coordinates are expected to be finite.
//!
//! ## Threading
//!
//! Everything is synchronous. A controller is driven from one thread (usually
//! the UI thread) and every mutating call takes `&mut self`, so calls cannot
//! overlap.
//!
//! ## Logging
//!
//! Recomputations and enable/disable/reset transitions are reported through
//! the [`log`] facade at `debug` level; throttled offset changes at `trace`.
//!
//! ## Features
//!
//! - `std` *(default)*: use `std` for kurbo's float math.
//! - `libm`: use `libm` instead, for `no_std` targets.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collection;
mod config;
mod controller;
mod diff;
mod frames;
mod layout;
mod subscription;
mod types;
mod window;

pub use collection::ScrollableCollection;
pub use config::PreheatConfig;
pub use controller::PreheatController;
pub use diff::{PreheatDiff, sort_in_scroll_direction};
pub use frames::FrameCollection;
pub use layout::UniformGrid;
pub use subscription::Subscription;
pub use types::{ItemIndex, ScrollAxis};
pub use window::{is_scrolling_forward, preheat_rect, should_update, update_margin};
