// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped registration with a host's scroll-offset notifications.

use alloc::boxed::Box;
use core::fmt::Debug;

/// A live registration for scroll-offset change notifications.
///
/// The host creates one when it starts forwarding offset changes to a
/// [`PreheatController`][crate::PreheatController], passing the code that
/// undoes the registration. That code runs exactly once: either through
/// [`unsubscribe`](Self::unsubscribe) or when the guard is dropped.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use understory_preheat::Subscription;
///
/// let live = Rc::new(Cell::new(true));
/// let flag = live.clone();
/// let sub = Subscription::new(move || flag.set(false));
/// assert!(live.get());
/// drop(sub);
/// assert!(!live.get());
/// ```
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the host's unsubscribe action.
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A guard with nothing to release.
    pub const fn detached() -> Self {
        Self { unsubscribe: None }
    }

    /// Returns `true` until the registration has been released.
    pub const fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }

    /// Release the registration now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
