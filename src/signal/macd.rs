//! MACD buy-signal detectors.

/// Boolean MACD buy conditions over the MACD and signal-line series.
///
/// Both input slices are oldest-first; their last elements describe
/// the same bar, but the slices may differ in length (the signal line
/// starts later).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacdSignals {
    /// MACD line crossed above the signal line on the latest bar.
    pub golden_cross: bool,
    /// MACD line crossed above zero on the latest bar.
    pub cross_above_zero: bool,
    /// MACD sits more than 1.0 above the signal line.
    pub divergence_wide: bool,
    /// The last three histogram values are strictly increasing.
    pub histogram_increasing: bool,
}

fn last(values: &[f64], back: usize) -> Option<f64> {
    values.len().checked_sub(back).map(|i| values[i])
}

impl MacdSignals {
    #[must_use]
    pub fn detect(macd: &[f64], signal: &[f64]) -> Self {
        let golden_cross = match (last(macd, 1), last(signal, 1), last(macd, 2), last(signal, 2)) {
            (Some(m1), Some(s1), Some(m2), Some(s2)) => m1 > s1 && m2 <= s2,
            _ => false,
        };

        let cross_above_zero = match (last(macd, 1), last(macd, 2)) {
            (Some(m1), Some(m2)) => m1 > 0.0 && m2 <= 0.0,
            _ => false,
        };

        let divergence_wide = match (last(macd, 1), last(signal, 1)) {
            (Some(m1), Some(s1)) => m1 - s1 > 1.0,
            _ => false,
        };

        let histogram_increasing = (1..=3)
            .map(|back| match (last(macd, back), last(signal, back)) {
                (Some(m), Some(s)) => Some(m - s),
                _ => None,
            })
            .collect::<Option<Vec<f64>>>()
            .is_some_and(|h| h[0] > h[1] && h[1] > h[2]);

        Self {
            golden_cross,
            cross_above_zero,
            divergence_wide,
            histogram_increasing,
        }
    }

    /// Named flags, for rendering and counting.
    #[must_use]
    pub fn flags(&self) -> [(&'static str, bool); 4] {
        [
            ("golden cross", self.golden_cross),
            ("cross above zero", self.cross_above_zero),
            ("divergence wide", self.divergence_wide),
            ("histogram increasing", self.histogram_increasing),
        ]
    }

    /// Number of conditions currently true.
    #[must_use]
    pub fn signal_count(&self) -> usize {
        self.flags().iter().filter(|(_, on)| *on).count()
    }
}
