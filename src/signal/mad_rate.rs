//! Moving-average deviation rate buy-signal detectors.

/// Boolean MAD-rate buy conditions over the short and long deviation
/// series and the close series.
///
/// All slices are oldest-first with their last elements on the same
/// bar. The oversold-rebound check scans the trailing five short-MAD
/// values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MadRateSignals {
    /// Short deviation crossed above the long deviation on the latest
    /// bar.
    pub golden_cross: bool,
    /// A deeply negative deviation within the last five bars has
    /// snapped back positive.
    pub oversold_rebound: bool,
    /// Price made a five-bar low while the deviation did not.
    pub positive_divergence: bool,
}

fn tail(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

impl MadRateSignals {
    #[must_use]
    pub fn detect(short_mad: &[f64], long_mad: &[f64], closes: &[f64]) -> Self {
        let golden_cross = if short_mad.len() >= 2 && long_mad.len() >= 2 {
            let (s2, s1) = (short_mad[short_mad.len() - 2], short_mad[short_mad.len() - 1]);
            let (l2, l1) = (long_mad[long_mad.len() - 2], long_mad[long_mad.len() - 1]);
            s2 <= l2 && s1 > l1
        } else {
            false
        };

        let oversold_rebound = !short_mad.is_empty()
            && tail(short_mad, 5).iter().any(|&mad| mad < -3.0)
            && short_mad[short_mad.len() - 1] > 0.0;

        let positive_divergence = if short_mad.is_empty() || closes.is_empty() {
            false
        } else {
            let current_price = closes[closes.len() - 1];
            let current_mad = short_mad[short_mad.len() - 1];
            current_price <= min(tail(closes, 5)) && current_mad > min(tail(short_mad, 5))
        };

        Self {
            golden_cross,
            oversold_rebound,
            positive_divergence,
        }
    }

    /// Named flags, for rendering and counting.
    #[must_use]
    pub fn flags(&self) -> [(&'static str, bool); 3] {
        [
            ("golden cross", self.golden_cross),
            ("oversold rebound", self.oversold_rebound),
            ("positive divergence", self.positive_divergence),
        ]
    }

    /// Number of conditions currently true.
    #[must_use]
    pub fn signal_count(&self) -> usize {
        self.flags().iter().filter(|(_, on)| *on).count()
    }
}
