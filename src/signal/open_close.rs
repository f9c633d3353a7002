//! Plain price-action buy-signal detectors.

const CONSECUTIVE_RISE_PERIOD: usize = 3;
const MA_CROSS_PERIOD: usize = 5;
const RANGE_BREAK_PERIOD: usize = 5;

/// Boolean price-action buy conditions over the close series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenCloseSignals {
    /// Closes rose on each of the last two steps (three-bar run-up).
    pub consecutive_rise: bool,
    /// Latest close sits above its own five-bar mean.
    pub ma_cross: bool,
    /// Latest close strictly exceeds the previous four closes.
    pub range_break: bool,
}

impl OpenCloseSignals {
    #[must_use]
    pub fn detect(closes: &[f64]) -> Self {
        Self {
            consecutive_rise: consecutive_rise(closes, CONSECUTIVE_RISE_PERIOD),
            ma_cross: ma_cross(closes, MA_CROSS_PERIOD),
            range_break: range_break(closes, RANGE_BREAK_PERIOD),
        }
    }

    /// Named flags, for rendering and counting.
    #[must_use]
    pub fn flags(&self) -> [(&'static str, bool); 3] {
        [
            ("consecutive rise", self.consecutive_rise),
            ("MA cross", self.ma_cross),
            ("range break", self.range_break),
        ]
    }

    /// Number of conditions currently true.
    #[must_use]
    pub fn signal_count(&self) -> usize {
        self.flags().iter().filter(|(_, on)| *on).count()
    }
}

fn consecutive_rise(closes: &[f64], period: usize) -> bool {
    if closes.len() < period {
        return false;
    }

    let recent = &closes[closes.len() - period..];
    let up_steps = recent.windows(2).filter(|w| w[1] > w[0]).count();

    up_steps >= period - 1
}

fn ma_cross(closes: &[f64], period: usize) -> bool {
    if closes.len() < period {
        return false;
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = closes[closes.len() - period..].iter().sum::<f64>() / period as f64;

    closes[closes.len() - 1] > mean
}

fn range_break(closes: &[f64], period: usize) -> bool {
    if closes.len() < period {
        return false;
    }

    let recent = &closes[closes.len() - period..];
    let prior_high = recent[..period - 1]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    recent[period - 1] > prior_high
}
