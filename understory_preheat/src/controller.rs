// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stateful preheat controller.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashSet;
use kurbo::Point;
use log::{debug, trace};

use crate::diff::sort_in_scroll_direction;
use crate::window::{is_scrolling_forward, preheat_rect, should_update, update_margin};
use crate::{PreheatConfig, PreheatDiff, ScrollableCollection, Subscription};

type Handler<I> = Box<dyn FnMut(&PreheatDiff<I>)>;

/// Maintains the set of items to preheat for one [`ScrollableCollection`].
///
/// The controller starts disabled. Enable it with
/// [`set_enabled`](Self::set_enabled), then call
/// [`on_scroll_offset_changed`](Self::on_scroll_offset_changed) whenever the
/// collection's scroll offset changes. Each recomputation diffs the new
/// preheat set against the previous one, hands the diff to the change handler
/// and returns it.
///
/// The preheat set never contains visible items or duplicates, and is ordered
/// by proximity to the viewport in the current scroll direction.
///
/// Change handler policy: diffs that add and remove nothing are only passed
/// to the handler when [`PreheatConfig::notify_empty`] is set. They are always
/// returned from the call that produced them.
pub struct PreheatController<C: ScrollableCollection> {
    collection: C,
    config: PreheatConfig,
    enabled: bool,
    previous_offset: Option<Point>,
    indices: Vec<C::Index>,
    handler: Option<Handler<C::Index>>,
    subscription: Option<Subscription>,
}

impl<C: ScrollableCollection + Debug> Debug for PreheatController<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PreheatController")
            .field("collection", &self.collection)
            .field("config", &self.config)
            .field("enabled", &self.enabled)
            .field("previous_offset", &self.previous_offset)
            .field("indices", &self.indices)
            .field("has_handler", &self.handler.is_some())
            .field("subscription", &self.subscription)
            .finish()
    }
}

impl<C: ScrollableCollection> PreheatController<C> {
    /// Create a disabled controller with the default configuration.
    pub fn new(collection: C) -> Self {
        Self::with_config(collection, PreheatConfig::default())
    }

    /// Create a disabled controller with `config`.
    pub fn with_config(collection: C, config: PreheatConfig) -> Self {
        Self {
            collection,
            config,
            enabled: false,
            previous_offset: None,
            indices: Vec::new(),
            handler: None,
            subscription: None,
        }
    }

    /// The collection this controller is bound to.
    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Mutable access to the collection, e.g. to move its scroll offset.
    ///
    /// Changes are not observed until the next
    /// [`on_scroll_offset_changed`](Self::on_scroll_offset_changed).
    pub fn collection_mut(&mut self) -> &mut C {
        &mut self.collection
    }

    /// Consume the controller and return its collection.
    ///
    /// Any attached [`Subscription`] is released. The handler is not notified.
    pub fn into_collection(self) -> C {
        self.collection
    }

    /// The current preheat set, closest to the viewport first.
    pub fn indices(&self) -> &[C::Index] {
        &self.indices
    }

    /// Returns `true` if the controller reacts to scroll changes.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The current configuration.
    pub const fn config(&self) -> &PreheatConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next recomputation.
    pub fn set_config(&mut self, config: PreheatConfig) {
        self.config = config;
    }

    /// Set the preheat window length as a multiple of the viewport length.
    pub fn set_size_ratio(&mut self, size_ratio: f64) {
        self.config.size_ratio = size_ratio;
    }

    /// Set the fraction of the viewport length to scroll before recomputing.
    pub fn set_update_ratio(&mut self, update_ratio: f64) {
        self.config.update_ratio = update_ratio;
    }

    /// Choose whether empty diffs reach the change handler.
    pub fn set_notify_empty(&mut self, notify_empty: bool) {
        self.config.notify_empty = notify_empty;
    }

    /// Install the change handler, replacing any previous one.
    ///
    /// The handler receives items that entered the preheat set (closest
    /// first) and items that left it.
    pub fn set_handler(&mut self, handler: impl FnMut(&PreheatDiff<C::Index>) + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// Remove the change handler.
    pub fn clear_handler(&mut self) {
        self.handler = None;
    }

    /// Hold the host's offset-change registration for as long as this
    /// controller lives. A previously attached registration is released.
    pub fn attach(&mut self, subscription: Subscription) {
        self.subscription = Some(subscription);
    }

    /// Release the offset-change registration, if any.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    /// Returns `true` while an active registration is attached.
    pub fn is_attached(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    /// Enable or disable the controller.
    ///
    /// - Setting the current value again does nothing and returns `None`.
    /// - Enabling forgets the last evaluated offset and recomputes the preheat
    ///   set from scratch, returning the resulting diff.
    /// - Disabling forgets the last evaluated offset, empties the preheat set
    ///   and returns a diff removing everything that was in it.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<PreheatDiff<C::Index>> {
        if enabled == self.enabled {
            return None;
        }
        self.enabled = enabled;
        self.previous_offset = None;
        if enabled {
            debug!("preheat enabled");
            self.evaluate()
        } else {
            debug!("preheat disabled, dropping {} indices", self.indices.len());
            let diff = PreheatDiff::removing_all(core::mem::take(&mut self.indices));
            self.notify(&diff);
            Some(diff)
        }
    }

    /// Forget the preheat set without notifying, then recompute from scratch
    /// if enabled.
    ///
    /// Use this after the collection's content changes wholesale. Since the
    /// old set is dropped silently, the returned diff (if any) only contains
    /// additions.
    pub fn reset(&mut self) -> Option<PreheatDiff<C::Index>> {
        debug!("preheat reset");
        self.indices.clear();
        self.previous_offset = None;
        if self.enabled { self.evaluate() } else { None }
    }

    /// React to a change of the collection's scroll offset.
    ///
    /// Returns `None` when disabled or when the offset has not moved past the
    /// update threshold since the last recomputation.
    pub fn on_scroll_offset_changed(&mut self) -> Option<PreheatDiff<C::Index>> {
        if self.enabled { self.evaluate() } else { None }
    }

    fn evaluate(&mut self) -> Option<PreheatDiff<C::Index>> {
        let axis = self.collection.axis();
        let viewport = self.collection.visible_bounds();
        let offset = viewport.origin();

        let margin = update_margin(
            axis,
            viewport.size(),
            self.config.effective_update_ratio(),
        );
        if !should_update(self.previous_offset, offset, margin) {
            trace!("preheat skipped at {offset:?}: within {margin} of last update");
            return None;
        }

        let forward = is_scrolling_forward(axis, self.previous_offset, offset);
        let window = preheat_rect(axis, viewport, forward, self.config.effective_size_ratio());

        let mut visible: HashSet<C::Index> = HashSet::new();
        self.collection.visit_visible_indices(|i| {
            visible.insert(i);
        });

        let mut seen: HashSet<C::Index> = HashSet::new();
        let mut next = Vec::new();
        self.collection.visit_indices_in(window, |i| {
            if !visible.contains(&i) && seen.insert(i) {
                next.push(i);
            }
        });
        sort_in_scroll_direction(&mut next, forward);

        let diff = PreheatDiff::between(&self.indices, &next);
        debug!(
            "preheat window {window:?} ({}): {} indices, +{} -{}",
            if forward { "forward" } else { "backward" },
            next.len(),
            diff.added.len(),
            diff.removed.len(),
        );
        self.indices = next;
        self.previous_offset = Some(offset);
        self.notify(&diff);
        Some(diff)
    }

    fn notify(&mut self, diff: &PreheatDiff<C::Index>) {
        if diff.is_empty() && !self.config.notify_empty {
            return;
        }
        if let Some(handler) = self.handler.as_mut() {
            handler(diff);
        }
    }
}
