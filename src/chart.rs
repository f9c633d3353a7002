//! Chart-ready series built from a validated bar sequence.
//!
//! Each builder walks the bars once, skips gap bars, and zips every
//! remaining bar with a caller-formatted label and the indicator
//! values defined at that bar. Values that have not converged yet are
//! `None`; truncating or windowing the result for presentation is the
//! caller's business.

use std::num::NonZero;

use crate::{
    InputError, Macd, MacdConfig, MacdValue, MadRate, MadRateConfig, Price, PriceBar, Rci,
    RciConfig, Rsi, RsiConfig, Sma, SmaConfig, Stochastic, StochasticConfig, StochasticValue,
    Timestamp, validate_bars,
};

/// One labelled sample of a chart series.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesPoint<T> {
    pub timestamp: Timestamp,
    pub label: String,
    pub value: T,
}

/// OHLC values with the standard moving-average overlays.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePoint {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub sma5: Option<Price>,
    pub sma10: Option<Price>,
    pub sma20: Option<Price>,
    pub sma25: Option<Price>,
    pub sma75: Option<Price>,
}

/// Short and long moving-average deviation rates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MadRatePoint {
    pub short: Option<Price>,
    pub long: Option<Price>,
}

/// RCI at the three charted lookbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RciPoint {
    pub short: Option<Price>,
    pub medium: Option<Price>,
    pub long: Option<Price>,
}

const fn nz(n: usize) -> NonZero<usize> {
    match NonZero::new(n) {
        Some(length) => length,
        None => panic!("chart lookbacks are non-zero"),
    }
}

fn build_series<T>(
    bars: &[PriceBar],
    label: impl Fn(Timestamp) -> String,
    mut point: impl FnMut(&PriceBar) -> T,
) -> Result<Vec<SeriesPoint<T>>, InputError> {
    validate_bars(bars)?;

    Ok(bars
        .iter()
        .filter(|bar| !bar.is_gap())
        .map(|bar| SeriesPoint {
            timestamp: bar.timestamp,
            label: label(bar.timestamp),
            value: point(bar),
        })
        .collect())
}

/// OHLC series with SMA 5/10/20/25/75 overlays.
///
/// # Errors
///
/// [`InputError::NonMonotonicTimestamps`] when the timestamps are not
/// strictly ascending.
pub fn price_series(
    bars: &[PriceBar],
    label: impl Fn(Timestamp) -> String,
) -> Result<Vec<SeriesPoint<PricePoint>>, InputError> {
    let mut smas = [5, 10, 20, 25, 75].map(|length| Sma::new(SmaConfig::close(nz(length))));

    build_series(bars, label, |bar| {
        let [sma5, sma10, sma20, sma25, sma75] =
            smas.each_mut().map(|sma| sma.compute(bar));

        PricePoint {
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            sma5,
            sma10,
            sma20,
            sma25,
            sma75,
        }
    })
}

/// RSI(14) series.
///
/// # Errors
///
/// [`InputError::NonMonotonicTimestamps`] when the timestamps are not
/// strictly ascending.
pub fn rsi_series(
    bars: &[PriceBar],
    label: impl Fn(Timestamp) -> String,
) -> Result<Vec<SeriesPoint<Option<Price>>>, InputError> {
    let mut rsi = Rsi::new(RsiConfig::close(nz(14)));
    build_series(bars, label, |bar| rsi.compute(bar))
}

/// MACD(12, 26, 9) series.
///
/// # Errors
///
/// [`InputError::NonMonotonicTimestamps`] when the timestamps are not
/// strictly ascending.
pub fn macd_series(
    bars: &[PriceBar],
    label: impl Fn(Timestamp) -> String,
) -> Result<Vec<SeriesPoint<Option<MacdValue>>>, InputError> {
    let mut macd = Macd::new(MacdConfig::close());
    build_series(bars, label, |bar| macd.compute(bar))
}

/// Deviation-rate series at the short (5) and long (25) lookbacks.
///
/// # Errors
///
/// [`InputError::NonMonotonicTimestamps`] when the timestamps are not
/// strictly ascending.
pub fn mad_rate_series(
    bars: &[PriceBar],
    label: impl Fn(Timestamp) -> String,
) -> Result<Vec<SeriesPoint<MadRatePoint>>, InputError> {
    let mut short = MadRate::new(MadRateConfig::close(nz(5)));
    let mut long = MadRate::new(MadRateConfig::close(nz(25)));

    build_series(bars, label, |bar| MadRatePoint {
        short: short.compute(bar),
        long: long.compute(bar),
    })
}

/// RCI series at the 9/14/25 lookbacks.
///
/// # Errors
///
/// [`InputError::NonMonotonicTimestamps`] when the timestamps are not
/// strictly ascending.
pub fn rci_series(
    bars: &[PriceBar],
    label: impl Fn(Timestamp) -> String,
) -> Result<Vec<SeriesPoint<RciPoint>>, InputError> {
    let mut short = Rci::new(RciConfig::close(nz(9)));
    let mut medium = Rci::new(RciConfig::close(nz(14)));
    let mut long = Rci::new(RciConfig::close(nz(25)));

    build_series(bars, label, |bar| RciPoint {
        short: short.compute(bar),
        medium: medium.compute(bar),
        long: long.compute(bar),
    })
}

/// Stochastic(5, 3) series.
///
/// # Errors
///
/// [`InputError::NonMonotonicTimestamps`] when the timestamps are not
/// strictly ascending.
pub fn stochastic_series(
    bars: &[PriceBar],
    label: impl Fn(Timestamp) -> String,
) -> Result<Vec<SeriesPoint<Option<StochasticValue>>>, InputError> {
    let mut stochastic = Stochastic::new(StochasticConfig::close());
    build_series(bars, label, |bar| stochastic.compute(bar))
}

/// Traded-volume series; bars without volume data are `None`.
///
/// # Errors
///
/// [`InputError::NonMonotonicTimestamps`] when the timestamps are not
/// strictly ascending.
pub fn volume_series(
    bars: &[PriceBar],
    label: impl Fn(Timestamp) -> String,
) -> Result<Vec<SeriesPoint<Option<f64>>>, InputError> {
    build_series(bars, label, |bar| bar.volume)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar::from_close(i as u64 + 1, close))
            .collect()
    }

    fn label(timestamp: Timestamp) -> String {
        format!("t{timestamp}")
    }

    mod price {
        use super::*;

        #[test]
        fn overlays_converge_in_order() {
            let closes: Vec<f64> = (0..80).map(|i| 100.0 + f64::from(i)).collect();
            let series = price_series(&bars_from_closes(&closes), label).unwrap();

            assert_eq!(series.len(), 80);
            assert!(series[3].value.sma5.is_none());
            assert!(series[4].value.sma5.is_some());
            assert!(series[73].value.sma75.is_none());
            assert!(series[74].value.sma75.is_some());
        }

        #[test]
        fn carries_labels_and_ohlc() {
            let series = price_series(&bars_from_closes(&[100.0, 101.0]), label).unwrap();
            assert_eq!(series[1].label, "t2");
            assert_eq!(series[1].value.close, 101.0);
        }
    }

    mod gaps {
        use super::*;

        #[test]
        fn gap_bars_yield_no_points() {
            let mut bars = bars_from_closes(&[100.0, 101.0, 102.0]);
            bars[1].close = 0.0;
            let series = rsi_series(&bars, label).unwrap();

            assert_eq!(series.len(), 2);
            assert_eq!(series[1].timestamp, 3);
        }
    }

    mod convergence {
        use super::*;

        #[test]
        fn rsi_defined_from_bar_fifteen() {
            let closes: Vec<f64> = (0..20).map(|i| 100.0 + f64::from(i % 4)).collect();
            let series = rsi_series(&bars_from_closes(&closes), label).unwrap();

            assert!(series[13].value.is_none());
            assert!(series[14].value.is_some());
        }

        #[test]
        fn macd_signal_lags_the_macd_line() {
            let closes: Vec<f64> = (0..40).map(|i| 100.0 + f64::from(i % 7)).collect();
            let series = macd_series(&bars_from_closes(&closes), label).unwrap();

            // MACD line at bar 26, signal at bar 26 + 9 − 1 = 34
            assert!(series[24].value.is_none());
            assert!(series[25].value.is_some_and(|v| v.signal.is_none()));
            assert!(
                series[33]
                    .value
                    .is_some_and(|v| v.signal.is_some())
            );
        }

        #[test]
        fn rci_lookbacks_converge_independently() {
            let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i % 5)).collect();
            let series = rci_series(&bars_from_closes(&closes), label).unwrap();

            let point = series[13].value;
            assert!(point.short.is_some());
            assert!(point.medium.is_some());
            assert!(point.long.is_none());
        }

        #[test]
        fn mad_rate_short_before_long() {
            let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i % 3)).collect();
            let series = mad_rate_series(&bars_from_closes(&closes), label).unwrap();

            let point = series[10].value;
            assert!(point.short.is_some());
            assert!(point.long.is_none());
            assert!(series[24].value.long.is_some());
        }

        #[test]
        fn stochastic_d_lags_k() {
            let closes: Vec<f64> = (0..10).map(|i| 100.0 + f64::from(i % 3)).collect();
            let series = stochastic_series(&bars_from_closes(&closes), label).unwrap();

            assert!(series[4].value.is_some_and(|v| v.d.is_none()));
            assert!(series[6].value.is_some_and(|v| v.d.is_some()));
        }
    }

    mod volume {
        use super::*;

        #[test]
        fn passes_volume_through() {
            let mut bars = bars_from_closes(&[100.0, 101.0]);
            bars[0].volume = Some(5000.0);
            let series = volume_series(&bars, label).unwrap();

            assert_eq!(series[0].value, Some(5000.0));
            assert_eq!(series[1].value, None);
        }
    }

    #[cfg(feature = "serde")]
    mod serialization {
        use super::*;

        fn assert_round_trips<T>()
        where
            T: serde::Serialize + serde::de::DeserializeOwned,
        {
        }

        #[test]
        fn every_series_point_type_round_trips() {
            assert_round_trips::<SeriesPoint<PricePoint>>();
            assert_round_trips::<SeriesPoint<Option<Price>>>();
            assert_round_trips::<SeriesPoint<Option<MacdValue>>>();
            assert_round_trips::<SeriesPoint<MadRatePoint>>();
            assert_round_trips::<SeriesPoint<RciPoint>>();
            assert_round_trips::<SeriesPoint<Option<StochasticValue>>>();
            assert_round_trips::<SeriesPoint<Option<crate::BandsValue>>>();
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn rejects_unordered_bars() {
            let mut bars = bars_from_closes(&[100.0, 101.0]);
            bars[1].timestamp = bars[0].timestamp;
            assert!(matches!(
                price_series(&bars, label),
                Err(InputError::NonMonotonicTimestamps { .. })
            ));
        }
    }
}
