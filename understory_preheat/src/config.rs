// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs for [`PreheatController`][crate::PreheatController].

/// Configuration for a [`PreheatController`][crate::PreheatController].
///
/// Ratios are relative to the viewport's length along the scroll axis.
/// Negative or non-finite ratios are treated as zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PreheatConfig {
    /// Length of the preheat window as a multiple of the viewport length.
    ///
    /// Defaults to `1.0`: one screenful ahead (or behind) of the viewport.
    pub size_ratio: f64,
    /// Fraction of the viewport length the offset has to move before the
    /// window is recomputed.
    ///
    /// Defaults to `0.25`.
    pub update_ratio: f64,
    /// Deliver recomputations that added and removed nothing to the change
    /// handler.
    ///
    /// Defaults to `false`. The value returned from the triggering call is
    /// unaffected.
    pub notify_empty: bool,
}

impl PreheatConfig {
    /// Default window length ratio.
    pub const DEFAULT_SIZE_RATIO: f64 = 1.0;
    /// Default recomputation threshold ratio.
    pub const DEFAULT_UPDATE_RATIO: f64 = 0.25;

    /// Returns a copy with `size_ratio` replaced.
    #[must_use]
    pub const fn with_size_ratio(mut self, size_ratio: f64) -> Self {
        self.size_ratio = size_ratio;
        self
    }

    /// Returns a copy with `update_ratio` replaced.
    #[must_use]
    pub const fn with_update_ratio(mut self, update_ratio: f64) -> Self {
        self.update_ratio = update_ratio;
        self
    }

    /// Returns a copy with `notify_empty` replaced.
    #[must_use]
    pub const fn with_notify_empty(mut self, notify_empty: bool) -> Self {
        self.notify_empty = notify_empty;
        self
    }

    /// The window length ratio, with invalid values mapped to zero.
    #[inline]
    pub fn effective_size_ratio(&self) -> f64 {
        sanitize_ratio(self.size_ratio)
    }

    /// The recomputation threshold ratio, with invalid values mapped to zero.
    #[inline]
    pub fn effective_update_ratio(&self) -> f64 {
        sanitize_ratio(self.update_ratio)
    }
}

impl Default for PreheatConfig {
    fn default() -> Self {
        Self {
            size_ratio: Self::DEFAULT_SIZE_RATIO,
            update_ratio: Self::DEFAULT_UPDATE_RATIO,
            notify_empty: false,
        }
    }
}

fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::PreheatConfig;

    #[test]
    fn defaults() {
        let config = PreheatConfig::default();
        assert_eq!(config.size_ratio, 1.0);
        assert_eq!(config.update_ratio, 0.25);
        assert!(!config.notify_empty);
    }

    #[test]
    fn invalid_ratios_become_zero() {
        let config = PreheatConfig::default()
            .with_size_ratio(-2.0)
            .with_update_ratio(f64::NAN);
        assert_eq!(config.effective_size_ratio(), 0.0);
        assert_eq!(config.effective_update_ratio(), 0.0);

        let config = config.with_size_ratio(f64::INFINITY).with_update_ratio(0.5);
        assert_eq!(config.effective_size_ratio(), 0.0);
        assert_eq!(config.effective_update_ratio(), 0.5);
    }
}
