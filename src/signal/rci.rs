//! RCI buy-signal detectors.

use crate::{Bands, BandsConfig, Price, PriceBar};

/// Boolean RCI buy conditions over the RCI and close series.
///
/// Both slices are oldest-first with their last elements on the same
/// bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RciSignals {
    /// RCI recovered above −80 on the latest bar.
    pub crossover: bool,
    /// Two of the last four values sat below −80 before the recovery
    /// above −80.
    pub double_bottom: bool,
    /// RCI below −80 while the close sits under the lower
    /// statistical band.
    pub bollinger: bool,
    /// Three falling closes against three rising RCI values, still
    /// below −60.
    pub divergence: bool,
}

/// Lower Bollinger band over the trailing ten closes, 2σ.
fn lower_band(closes: &[f64]) -> Option<Price> {
    let mut bands = Bands::new(BandsConfig::close());

    let window = &closes[closes.len().saturating_sub(10)..];
    let mut last = None;
    for (i, &close) in window.iter().enumerate() {
        last = bands.compute(&PriceBar::from_close(i as u64 + 1, close));
    }

    last.map(|value| value.lower)
}

impl RciSignals {
    #[must_use]
    pub fn detect(rci: &[f64], closes: &[f64]) -> Self {
        let n = rci.len();

        let crossover = n >= 2 && rci[n - 2] < -80.0 && rci[n - 1] > -80.0;

        let double_bottom = n >= 4 && {
            let (three_back, two_back) = (rci[n - 4], rci[n - 3]);
            let (previous, current) = (rci[n - 2], rci[n - 1]);

            let has_double_bottom =
                (three_back < -80.0 && two_back < -80.0) || (two_back < -80.0 && previous < -80.0);
            let crosses_above = previous < -80.0 && current > -80.0;

            has_double_bottom && crosses_above
        };

        let bollinger = n >= 1
            && !closes.is_empty()
            && rci[n - 1] < -80.0
            && lower_band(closes)
                .is_some_and(|lower| closes[closes.len() - 1] < lower);

        let divergence = n >= 3 && closes.len() >= 3 && {
            let price_downtrend = closes[closes.len() - 1] < closes[closes.len() - 2]
                && closes[closes.len() - 2] < closes[closes.len() - 3];
            let rci_uptrend = rci[n - 1] > rci[n - 2] && rci[n - 2] > rci[n - 3];

            price_downtrend && rci_uptrend && rci[n - 1] < -60.0
        };

        Self {
            crossover,
            double_bottom,
            bollinger,
            divergence,
        }
    }

    /// Named flags, for rendering and counting.
    #[must_use]
    pub fn flags(&self) -> [(&'static str, bool); 4] {
        [
            ("crossover", self.crossover),
            ("double bottom", self.double_bottom),
            ("bollinger", self.bollinger),
            ("divergence", self.divergence),
        ]
    }

    /// Number of conditions currently true.
    #[must_use]
    pub fn signal_count(&self) -> usize {
        self.flags().iter().filter(|(_, on)| *on).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossover_on_recovery_above_minus_eighty() {
        let signals = RciSignals::detect(&[-90.0, -75.0], &[100.0, 101.0]);
        assert!(signals.crossover);
    }

    #[test]
    fn no_crossover_while_still_below() {
        let signals = RciSignals::detect(&[-90.0, -85.0], &[100.0, 101.0]);
        assert!(!signals.crossover);
    }

    #[test]
    fn double_bottom_needs_two_deep_values_then_recovery() {
        let signals = RciSignals::detect(&[-85.0, -90.0, -85.0, -70.0], &[100.0; 4]);
        assert!(signals.double_bottom);

        // Only the previous value was deep
        let single = RciSignals::detect(&[-50.0, -60.0, -85.0, -70.0], &[100.0; 4]);
        assert!(!single.double_bottom);
    }

    #[test]
    fn bollinger_needs_deep_rci_and_band_pierce() {
        // Nine stable closes then a collapse pierces the lower band.
        let mut closes = vec![100.0; 9];
        closes.push(80.0);
        let signals = RciSignals::detect(&[-90.0], &closes);
        assert!(signals.bollinger);

        // Same price action but RCI not deep enough
        let shallow = RciSignals::detect(&[-70.0], &closes);
        assert!(!shallow.bollinger);
    }

    #[test]
    fn bollinger_quiet_with_short_close_history() {
        // Fewer than ten closes: the band is undefined.
        let signals = RciSignals::detect(&[-90.0], &[100.0, 80.0]);
        assert!(!signals.bollinger);
    }

    #[test]
    fn divergence_on_falling_price_with_rising_rci() {
        let signals = RciSignals::detect(&[-80.0, -75.0, -70.0], &[100.0, 99.0, 98.0]);
        assert!(signals.divergence);
    }

    #[test]
    fn divergence_quiet_above_minus_sixty() {
        let signals = RciSignals::detect(&[-65.0, -60.0, -55.0], &[100.0, 99.0, 98.0]);
        assert!(!signals.divergence);
    }

    #[test]
    fn empty_series_is_all_quiet() {
        let signals = RciSignals::detect(&[], &[]);
        assert_eq!(signals.signal_count(), 0);
    }
}
