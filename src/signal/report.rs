//! One-pass signal evaluation over a bar sequence.

use std::num::NonZero;

use crate::{
    InputError, Macd, MacdConfig, MadRate, MadRateConfig, PriceBar, Rci, RciConfig, Rsi,
    RsiConfig, validate_bars,
};

use super::{MacdSignals, MadRateSignals, OpenCloseSignals, RciSignals, RsiReport};

const RSI_LENGTH: NonZero<usize> = NonZero::new(14).unwrap();
const SHORT_MAD_LENGTH: NonZero<usize> = NonZero::new(5).unwrap();
const LONG_MAD_LENGTH: NonZero<usize> = NonZero::new(25).unwrap();
const RCI_LENGTH: NonZero<usize> = NonZero::new(9).unwrap();

/// Every signal family evaluated over one bar sequence.
///
/// Built by [`SignalReport::from_bars`], which validates the input,
/// drops gap bars, and streams each indicator exactly once: RSI 14,
/// MACD 12/26/9, MAD 5/25, RCI 9, plus the raw close series.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalReport {
    pub rsi: RsiReport,
    pub macd: MacdSignals,
    pub mad_rate: MadRateSignals,
    pub rci: RciSignals,
    pub open_close: OpenCloseSignals,
}

impl SignalReport {
    /// Instruments with more raw signals than this are worth a look.
    pub const DEFAULT_BUY_THRESHOLD: usize = 5;

    /// Evaluates all five signal families over `bars`.
    ///
    /// # Errors
    ///
    /// [`InputError::NonMonotonicTimestamps`] when the timestamps are
    /// not strictly ascending.
    pub fn from_bars(bars: &[PriceBar]) -> Result<Self, InputError> {
        validate_bars(bars)?;

        let mut rsi_indicator = Rsi::new(RsiConfig::close(RSI_LENGTH));
        let mut macd_indicator = Macd::new(MacdConfig::close());
        let mut short_mad_indicator = MadRate::new(MadRateConfig::close(SHORT_MAD_LENGTH));
        let mut long_mad_indicator = MadRate::new(MadRateConfig::close(LONG_MAD_LENGTH));
        let mut rci_indicator = Rci::new(RciConfig::close(RCI_LENGTH));

        let mut closes = Vec::new();
        let mut rsi = Vec::new();
        let mut macd_line = Vec::new();
        let mut signal_line = Vec::new();
        let mut short_mad = Vec::new();
        let mut long_mad = Vec::new();
        let mut rci = Vec::new();

        for bar in bars.iter().filter(|bar| !bar.is_gap()) {
            closes.push(bar.close);

            if let Some(value) = rsi_indicator.compute(bar) {
                rsi.push(value);
            }
            if let Some(value) = macd_indicator.compute(bar) {
                macd_line.push(value.macd);
                if let Some(signal) = value.signal {
                    signal_line.push(signal);
                }
            }
            if let Some(value) = short_mad_indicator.compute(bar) {
                short_mad.push(value);
            }
            if let Some(value) = long_mad_indicator.compute(bar) {
                long_mad.push(value);
            }
            if let Some(value) = rci_indicator.compute(bar) {
                rci.push(value);
            }
        }

        Ok(Self {
            rsi: RsiReport::detect(&rsi, &closes),
            macd: MacdSignals::detect(&macd_line, &signal_line),
            mad_rate: MadRateSignals::detect(&short_mad, &long_mad, &closes),
            rci: RciSignals::detect(&rci, &closes),
            open_close: OpenCloseSignals::detect(&closes),
        })
    }

    /// Raw signal count across all families: every boolean flag plus
    /// the RSI weighted-score verdict.
    #[must_use]
    pub fn signal_count(&self) -> usize {
        usize::from(self.rsi.is_buy())
            + self.macd.signal_count()
            + self.mad_rate.signal_count()
            + self.rci.signal_count()
            + self.open_close.signal_count()
    }

    /// Count-threshold buy policy: strictly more than `threshold` raw
    /// signals.
    #[must_use]
    pub fn is_ranked_buy(&self, threshold: usize) -> bool {
        self.signal_count() > threshold
    }
}
