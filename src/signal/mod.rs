//! Buy-signal pattern detection over indicator series.
//!
//! Detectors are pure functions over trailing slices of defined
//! indicator values, grouped into one module per indicator family.
//! Each family exposes a small report type; [`SignalReport`] runs
//! every family over a validated bar sequence in one pass.
//!
//! A detector handed fewer points than its pattern needs reports "no
//! signal" rather than guessing.

mod macd;
mod mad_rate;
mod open_close;
mod rci;
mod report;
mod rsi;

pub use macd::MacdSignals;
pub use mad_rate::MadRateSignals;
pub use open_close::OpenCloseSignals;
pub use rci::RciSignals;
pub use report::SignalReport;
pub use rsi::{RsiPattern, RsiReport, WeightedSignal};

/// Outcome of a single pattern detector.
///
/// `strength` grades how pronounced the pattern is on a 0..=1 scale;
/// it is 0 whenever `is_signal` is false.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternSignal {
    pub is_signal: bool,
    pub strength: f64,
}

impl PatternSignal {
    pub(crate) const NONE: Self = Self {
        is_signal: false,
        strength: 0.0,
    };

    pub(crate) fn hit(strength: f64) -> Self {
        Self {
            is_signal: true,
            strength,
        }
    }
}
