use crate::{Ohlcv, Price, Timestamp};

use thiserror::Error;

/// Malformed input detected at the adapter boundary.
///
/// Ordinary insufficient history is never an error — indicators report it as
/// `None`. These variants cover input the engine refuses to compute on at
/// all, rejected eagerly before any indicator state is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Bar timestamps must be strictly ascending and deduplicated.
    #[error("non-monotonic timestamp at bar {index}: {prev} followed by {next}")]
    NonMonotonicTimestamps {
        index: usize,
        prev: Timestamp,
        next: Timestamp,
    },

    /// Parallel columns fed to [`bars_from_columns`] disagree in length.
    #[error("column `{column}` has {actual} entries, expected {expected}")]
    MismatchedColumns {
        column: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// One OHLCV sample of price history.
///
/// `close == 0.0` or a non-finite close is the "no trade / missing data"
/// sentinel ([`is_gap`](PriceBar::is_gap)); the engine treats such bars as
/// gaps and excludes them from all indicator accumulation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceBar {
    pub timestamp: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Option<f64>,
}

impl PriceBar {
    /// Bar carrying only a close price (OHLC all equal, no volume).
    /// Handy for feeding derived scalar series through bar-shaped seams.
    #[must_use]
    pub fn from_close(timestamp: Timestamp, close: Price) -> Self {
        Self {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: None,
        }
    }

    /// True when this bar is the "no trade / missing data" sentinel.
    #[must_use]
    pub fn is_gap(&self) -> bool {
        self.close == 0.0 || !self.close.is_finite()
    }
}

impl Ohlcv for PriceBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn open_time(&self) -> Timestamp {
        self.timestamp
    }

    fn volume(&self) -> f64 {
        self.volume.unwrap_or(0.0)
    }
}

/// Checks that bar timestamps are strictly ascending.
///
/// Gap bars participate in the ordering check; only indicator accumulation
/// skips them.
///
/// # Errors
///
/// [`InputError::NonMonotonicTimestamps`] at the first out-of-order pair.
pub fn validate_bars(bars: &[PriceBar]) -> Result<(), InputError> {
    for (index, pair) in bars.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(InputError::NonMonotonicTimestamps {
                index: index + 1,
                prev: pair[0].timestamp,
                next: pair[1].timestamp,
            });
        }
    }

    Ok(())
}

/// Assembles bars from provider-shaped parallel columns.
///
/// Market-data providers commonly deliver a timestamp array alongside
/// per-field quote arrays. All columns must match the timestamp column's
/// length; `volumes` may be omitted entirely.
///
/// # Errors
///
/// [`InputError::MismatchedColumns`] naming the first offending column, or
/// [`InputError::NonMonotonicTimestamps`] when the assembled sequence is out
/// of order.
pub fn bars_from_columns(
    timestamps: &[Timestamp],
    opens: &[f64],
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    volumes: Option<&[f64]>,
) -> Result<Vec<PriceBar>, InputError> {
    let expected = timestamps.len();

    for (column, actual) in [
        ("open", opens.len()),
        ("high", highs.len()),
        ("low", lows.len()),
        ("close", closes.len()),
    ] {
        if actual != expected {
            return Err(InputError::MismatchedColumns {
                column,
                expected,
                actual,
            });
        }
    }

    if let Some(volumes) = volumes
        && volumes.len() != expected
    {
        return Err(InputError::MismatchedColumns {
            column: "volume",
            expected,
            actual: volumes.len(),
        });
    }

    let bars: Vec<PriceBar> = (0..expected)
        .map(|i| PriceBar {
            timestamp: timestamps[i],
            open: opens[i],
            high: highs[i],
            low: lows[i],
            close: closes[i],
            volume: volumes.map(|v| v[i]),
        })
        .collect();

    validate_bars(&bars)?;

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(close: f64, timestamp: u64) -> PriceBar {
        PriceBar {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: Some(100.0),
        }
    }

    mod gaps {
        use super::*;

        #[test]
        fn zero_close_is_gap() {
            assert!(bar(0.0, 1).is_gap());
        }

        #[test]
        fn nan_close_is_gap() {
            assert!(bar(f64::NAN, 1).is_gap());
        }

        #[test]
        fn traded_bar_is_not_gap() {
            assert!(!bar(100.0, 1).is_gap());
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn accepts_ascending_timestamps() {
            let bars = [bar(1.0, 1), bar(2.0, 2), bar(3.0, 5)];
            assert_eq!(validate_bars(&bars), Ok(()));
        }

        #[test]
        fn accepts_empty_and_single() {
            assert_eq!(validate_bars(&[]), Ok(()));
            assert_eq!(validate_bars(&[bar(1.0, 1)]), Ok(()));
        }

        #[test]
        fn rejects_decreasing_timestamps() {
            let bars = [bar(1.0, 2), bar(2.0, 1)];
            assert_eq!(
                validate_bars(&bars),
                Err(InputError::NonMonotonicTimestamps {
                    index: 1,
                    prev: 2,
                    next: 1,
                })
            );
        }

        #[test]
        fn rejects_duplicate_timestamps() {
            let bars = [bar(1.0, 1), bar(2.0, 1)];
            assert!(matches!(
                validate_bars(&bars),
                Err(InputError::NonMonotonicTimestamps { index: 1, .. })
            ));
        }
    }

    mod columns {
        use super::*;

        #[test]
        fn assembles_matching_columns() {
            let bars = bars_from_columns(
                &[1, 2],
                &[10.0, 11.0],
                &[12.0, 13.0],
                &[9.0, 10.0],
                &[11.0, 12.0],
                Some(&[500.0, 600.0]),
            )
            .unwrap();

            assert_eq!(bars.len(), 2);
            assert_eq!(bars[1].close, 12.0);
            assert_eq!(bars[1].volume, Some(600.0));
        }

        #[test]
        fn volume_column_is_optional() {
            let bars =
                bars_from_columns(&[1], &[10.0], &[12.0], &[9.0], &[11.0], None).unwrap();
            assert_eq!(bars[0].volume, None);
        }

        #[test]
        fn rejects_short_column() {
            let result = bars_from_columns(&[1, 2], &[10.0], &[1.0, 2.0], &[1.0, 2.0], &[1.0, 2.0], None);
            assert_eq!(
                result,
                Err(InputError::MismatchedColumns {
                    column: "open",
                    expected: 2,
                    actual: 1,
                })
            );
        }

        #[test]
        fn rejects_unordered_timestamps() {
            let result = bars_from_columns(
                &[2, 1],
                &[1.0, 2.0],
                &[1.0, 2.0],
                &[1.0, 2.0],
                &[1.0, 2.0],
                None,
            );
            assert!(matches!(
                result,
                Err(InputError::NonMonotonicTimestamps { .. })
            ));
        }
    }
}
