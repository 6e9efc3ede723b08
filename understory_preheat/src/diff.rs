// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental changes to the preheated index set.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

/// Change between two consecutive preheat sets.
///
/// Membership, not position, decides what is reported: an index that merely
/// moved within the ordered sequence appears in neither list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreheatDiff<I> {
    /// Indices that entered the preheat set, in the new set's order
    /// (closest to the viewport first).
    pub added: Vec<I>,
    /// Indices that left the preheat set, in the old set's order.
    pub removed: Vec<I>,
}

impl<I> Default for PreheatDiff<I> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<I> PreheatDiff<I> {
    /// Returns `true` if nothing was added or removed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl<I: Copy + Eq + Hash> PreheatDiff<I> {
    /// Diff two duplicate-free sequences.
    ///
    /// `added` is `new − old` in `new` order and `removed` is `old − new` in
    /// `old` order.
    pub fn between(old: &[I], new: &[I]) -> Self {
        let old_set: HashSet<I> = old.iter().copied().collect();
        let new_set: HashSet<I> = new.iter().copied().collect();
        let added = new
            .iter()
            .copied()
            .filter(|i| !old_set.contains(i))
            .collect();
        let removed = old
            .iter()
            .copied()
            .filter(|i| !new_set.contains(i))
            .collect();
        Self { added, removed }
    }

    /// Diff that removes everything in `old`.
    pub fn removing_all(old: Vec<I>) -> Self {
        Self {
            added: Vec::new(),
            removed: old,
        }
    }
}

/// Sort indices so the ones closest to becoming visible come first.
///
/// Scrolling forward favours lower indices (they sit nearer the viewport's
/// trailing edge); scrolling backward favours higher ones.
pub fn sort_in_scroll_direction<I: Ord>(indices: &mut [I], forward: bool) {
    if forward {
        indices.sort_unstable();
    } else {
        indices.sort_unstable_by(|a, b| b.cmp(a));
    }
}
