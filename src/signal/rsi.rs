//! RSI pattern detectors and the weighted-score aggregator.

use std::fmt::{self, Display};

use super::PatternSignal;

/// Mean over each trailing window of `period` values. Defined from
/// index `period − 1` of the input.
fn trailing_means(values: &[f64], period: usize) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let reciprocal = 1.0 / period as f64;

    values
        .windows(period)
        .map(|w| w.iter().sum::<f64>() * reciprocal)
        .collect()
}

/// Local minima below 30 within the last `lookback` values.
fn oversold_bottoms(rsi: &[f64], lookback: usize) -> Vec<f64> {
    let recent = &rsi[rsi.len().saturating_sub(lookback)..];

    recent
        .windows(3)
        .filter(|w| w[1] < w[0] && w[1] < w[2] && w[1] < 30.0)
        .map(|w| w[1])
        .collect()
}

fn detect_oversold_reversal(rsi: &[f64]) -> PatternSignal {
    let &[previous, latest] = &rsi[rsi.len().saturating_sub(2)..] else {
        return PatternSignal::NONE;
    };

    if previous <= 30.0 && latest > previous {
        return PatternSignal::hit((30.0 - previous.min(20.0)) / 30.0);
    }

    PatternSignal::NONE
}

fn detect_trendline_break(rsi: &[f64]) -> PatternSignal {
    if rsi.len() < 5 {
        return PatternSignal::NONE;
    }

    let recent = &rsi[rsi.len() - 5..];
    let slopes: Vec<f64> = recent.windows(2).map(|w| w[1] - w[0]).collect();

    let last_slope = slopes[slopes.len() - 1];
    let breaking_up =
        last_slope > 0.0 && slopes[..slopes.len() - 1].iter().all(|&slope| slope <= 0.0);

    if breaking_up && recent[recent.len() - 1] > 30.0 {
        return PatternSignal::hit((last_slope.abs() / 10.0).min(1.0));
    }

    PatternSignal::NONE
}

fn detect_bullish_divergence(rsi: &[f64], closes: &[f64]) -> PatternSignal {
    if rsi.len() < 5 || closes.len() < 5 {
        return PatternSignal::NONE;
    }

    let min = |slice: &[f64]| slice.iter().copied().fold(f64::INFINITY, f64::min);

    let recent_rsi = &rsi[rsi.len() - 5..];
    let recent_closes = &closes[closes.len() - 5..];

    // First vs second low: the two three-bar halves of the window.
    let rsi_low_1 = min(&recent_rsi[..3]);
    let rsi_low_2 = min(&recent_rsi[2..]);
    let price_low_1 = min(&recent_closes[..3]);
    let price_low_2 = min(&recent_closes[2..]);

    if price_low_2 < price_low_1 && rsi_low_2 > rsi_low_1 {
        return PatternSignal::hit(((rsi_low_2 - rsi_low_1) / 10.0).min(1.0));
    }

    PatternSignal::NONE
}

fn detect_double_bottom(rsi: &[f64]) -> PatternSignal {
    let bottoms = oversold_bottoms(rsi, 10);

    if bottoms.len() >= 2 && (bottoms[0] - bottoms[1]).abs() < 5.0 {
        let deepest = bottoms.iter().copied().fold(f64::INFINITY, f64::min);
        return PatternSignal::hit((30.0 - deepest) / 30.0);
    }

    PatternSignal::NONE
}

fn detect_support_bounce(rsi: &[f64]) -> PatternSignal {
    if rsi.len() < 4 {
        return PatternSignal::NONE;
    }

    // Support level from everything before the last three values.
    let support = rsi[..rsi.len() - 3]
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let latest = rsi[rsi.len() - 1];
    let previous = rsi[rsi.len() - 2];

    if previous <= support + 2.0 && latest > previous {
        return PatternSignal::hit(((latest - previous) / 5.0).min(1.0));
    }

    PatternSignal::NONE
}

fn detect_ma_cross(rsi: &[f64]) -> PatternSignal {
    // Two consecutive values of the 13-period mean need 14 samples.
    if rsi.len() < 14 {
        return PatternSignal::NONE;
    }

    let ma5 = trailing_means(rsi, 5);
    let ma13 = trailing_means(rsi, 13);

    let (previous_ma5, latest_ma5) = (ma5[ma5.len() - 2], ma5[ma5.len() - 1]);
    let (previous_ma13, latest_ma13) = (ma13[ma13.len() - 2], ma13[ma13.len() - 1]);

    if previous_ma5 <= previous_ma13 && latest_ma5 > latest_ma13 {
        return PatternSignal::hit(((latest_ma5 - latest_ma13) / 5.0).min(1.0));
    }

    PatternSignal::NONE
}

fn detect_w_bottom(rsi: &[f64]) -> PatternSignal {
    let bottoms = oversold_bottoms(rsi, 15);

    if bottoms.len() >= 2 && bottoms[1] > bottoms[0] && (bottoms[1] - bottoms[0]).abs() < 7.0 {
        let deepest = bottoms.iter().copied().fold(f64::INFINITY, f64::min);
        return PatternSignal::hit((30.0 - deepest) / 30.0);
    }

    PatternSignal::NONE
}

/// The RSI reversal patterns the weighted aggregator scores.
///
/// Each pattern carries its own aggregation weight, so the detector
/// set and the weight table cannot drift apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RsiPattern {
    OversoldReversal,
    TrendlineBreak,
    BullishDivergence,
    DoubleBottom,
    SupportBounce,
    MaCross,
    WBottom,
}

impl RsiPattern {
    pub const ALL: [Self; 7] = [
        Self::OversoldReversal,
        Self::TrendlineBreak,
        Self::BullishDivergence,
        Self::DoubleBottom,
        Self::SupportBounce,
        Self::MaCross,
        Self::WBottom,
    ];

    /// Contribution of this pattern's strength to the total score.
    #[must_use]
    pub fn weight(self) -> f64 {
        match self {
            Self::OversoldReversal => 0.25,
            Self::TrendlineBreak => 0.15,
            Self::BullishDivergence => 0.2,
            Self::DoubleBottom => 0.15,
            Self::SupportBounce => 0.1,
            Self::MaCross => 0.05,
            Self::WBottom => 0.1,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::OversoldReversal => "oversold reversal",
            Self::TrendlineBreak => "trendline break",
            Self::BullishDivergence => "bullish divergence",
            Self::DoubleBottom => "double bottom",
            Self::SupportBounce => "support bounce",
            Self::MaCross => "MA cross",
            Self::WBottom => "W bottom",
        }
    }

    fn detect(self, rsi: &[f64], closes: &[f64]) -> PatternSignal {
        match self {
            Self::OversoldReversal => detect_oversold_reversal(rsi),
            Self::TrendlineBreak => detect_trendline_break(rsi),
            Self::BullishDivergence => detect_bullish_divergence(rsi, closes),
            Self::DoubleBottom => detect_double_bottom(rsi),
            Self::SupportBounce => detect_support_bounce(rsi),
            Self::MaCross => detect_ma_cross(rsi),
            Self::WBottom => detect_w_bottom(rsi),
        }
    }
}

impl Display for RsiPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One pattern's detection outcome, tagged with the pattern.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedSignal {
    pub pattern: RsiPattern,
    pub is_signal: bool,
    pub strength: f64,
}

/// Weighted-score evaluation of all RSI patterns over one series.
///
/// Built by [`RsiReport::detect`]; the final verdict combines the
/// weighted total with a per-pattern strength override:
///
/// ```text
/// buy = (total_score ≥ 0.4 ∧ active ≥ 2) ∨ ∃ signal with strength ≥ 0.8
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RsiReport {
    signals: [WeightedSignal; 7],
}

impl RsiReport {
    /// Runs every pattern detector over the RSI series and its price
    /// series. Both slices are oldest-first and must cover the same
    /// bars at the tail.
    #[must_use]
    pub fn detect(rsi: &[f64], closes: &[f64]) -> Self {
        Self {
            signals: RsiPattern::ALL.map(|pattern| {
                let PatternSignal {
                    is_signal,
                    strength,
                } = pattern.detect(rsi, closes);

                WeightedSignal {
                    pattern,
                    is_signal,
                    strength,
                }
            }),
        }
    }

    /// Per-pattern outcomes, in [`RsiPattern::ALL`] order.
    #[must_use]
    pub fn signals(&self) -> &[WeightedSignal; 7] {
        &self.signals
    }

    /// Weighted sum of all strengths.
    #[must_use]
    pub fn total_score(&self) -> f64 {
        self.signals
            .iter()
            .map(|signal| signal.strength * signal.pattern.weight())
            .sum()
    }

    /// Number of patterns currently firing.
    #[must_use]
    pub fn active_signals(&self) -> usize {
        self.signals.iter().filter(|signal| signal.is_signal).count()
    }

    /// The combined buy verdict.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        let strong_individual = self
            .signals
            .iter()
            .any(|signal| signal.is_signal && signal.strength >= 0.8);

        (self.total_score() >= 0.4 && self.active_signals() >= 2) || strong_individual
    }
}
