use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Timestamp,
    ring_buffer::RingBuffer,
};

/// Configuration for the Relative Strength Index ([`Rsi`]) indicator.
///
/// # Example
///
/// ```
/// use tenkan_ta::{RsiConfig, IndicatorConfig};
/// use std::num::NonZero;
///
/// let config = RsiConfig::close(NonZero::new(14).unwrap());
/// assert_eq!(config.length(), 14);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for RsiConfig {
    type Builder = RsiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        RsiConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl RsiConfig {
    /// RSI on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Display for RsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsiConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`RsiConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct RsiConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl RsiConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
        }
    }
}

impl IndicatorConfigBuilder<RsiConfig> for RsiConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length.get());
        self
    }

    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> RsiConfig {
        RsiConfig {
            length: self.length.expect("length is required"),
            source: self.source,
        }
    }
}

/// Relative Strength Index (RSI).
///
/// Measures the magnitude of recent gains against recent losses on a
/// 0–100 scale. This is the simple-average (Cutler) variant: gains
/// and losses are plain means over the last `length` price changes,
/// not Wilder-smoothed, so the value depends only on the trailing
/// window and never on history before it.
///
/// ```text
/// RS  = avg_gain / avg_loss
/// RSI = 100 − 100 / (1 + RS)
/// ```
///
/// Edge cases: a flat window (no gains, no losses) yields the neutral
/// 50; a window with gains and no losses yields 100.
///
/// The first `length` price changes need `length + 1` bars, so the
/// first defined output appears at bar `length + 1`.
///
/// # Example
///
/// ```
/// use tenkan_ta::{Rsi, RsiConfig};
/// use std::num::NonZero;
/// # use tenkan_ta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.0 }
/// #     fn close(&self) -> Price { self.0 }
/// #     fn open_time(&self) -> Timestamp { self.1 }
/// # }
///
/// let mut rsi = Rsi::new(RsiConfig::close(NonZero::new(2).unwrap()));
///
/// assert_eq!(rsi.compute(&Bar(10.0, 1)), None);
/// assert_eq!(rsi.compute(&Bar(11.0, 2)), None);
///
/// // Two straight gains → RSI 100
/// assert_eq!(rsi.compute(&Bar(12.0, 3)), Some(100.0));
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
    changes: RingBuffer<Price>,
    prev_price: Option<Price>,
    last_open_time: Option<Timestamp>,
    current: Option<Price>,
}

impl Rsi {
    fn rsi_from_changes(&self) -> Price {
        let mut gain_sum = 0.0;
        let mut loss_sum = 0.0;

        for &change in self.changes.iter() {
            if change > 0.0 {
                gain_sum += change;
            } else {
                loss_sum -= change;
            }
        }

        if gain_sum == 0.0 && loss_sum == 0.0 {
            return 50.0;
        }
        if loss_sum == 0.0 {
            return 100.0;
        }

        // Window lengths cancel in the ratio, sums suffice.
        100.0 - 100.0 / (1.0 + gain_sum / loss_sum)
    }
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            changes: RingBuffer::new(config.length),
            prev_price: None,
            last_open_time: None,
            current: None,
        }
    }

    fn compute(&mut self, kline: &impl Ohlcv) -> Option<Price> {
        debug_assert!(
            self.last_open_time.is_none_or(|t| t < kline.open_time()),
            "open_time must be strictly increasing: last={}, got={}",
            self.last_open_time.unwrap_or(0),
            kline.open_time(),
        );
        self.last_open_time = Some(kline.open_time());

        let price = self.config.source.extract(kline);

        if let Some(prev) = self.prev_price.replace(price) {
            self.changes.push(price - prev);
        }

        self.current = self.changes.is_full().then(|| self.rsi_from_changes());

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, {})", self.config.length, self.config.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, bar, nz};

    fn rsi(length: usize) -> Rsi {
        Rsi::new(RsiConfig::close(nz(length)))
    }

    fn feed(rsi: &mut Rsi, closes: &[f64]) -> Option<f64> {
        let mut last = None;
        for (t, close) in closes.iter().enumerate() {
            last = rsi.compute(&bar(*close, t as u64 + 1));
        }
        last
    }

    mod filling {
        use super::*;

        #[test]
        fn needs_length_plus_one_bars() {
            let mut rsi = rsi(3);
            assert_eq!(feed(&mut rsi, &[1.0, 2.0, 3.0]), None);
            assert!(rsi.compute(&bar(4.0, 4)).is_some());
        }
    }

    mod formula {
        use super::*;

        #[test]
        fn all_gains_is_one_hundred() {
            let mut rsi = rsi(3);
            assert_eq!(feed(&mut rsi, &[1.0, 2.0, 3.0, 4.0]), Some(100.0));
        }

        #[test]
        fn all_losses_is_zero() {
            let mut rsi = rsi(3);
            assert_eq!(feed(&mut rsi, &[4.0, 3.0, 2.0, 1.0]), Some(0.0));
        }

        #[test]
        fn flat_window_is_neutral_fifty() {
            let mut rsi = rsi(3);
            assert_eq!(feed(&mut rsi, &[5.0, 5.0, 5.0, 5.0]), Some(50.0));
        }

        #[test]
        fn balanced_gains_and_losses() {
            // Changes: +1, −1, +1, −1 over length 4 → RS = 1 → RSI = 50
            let mut rsi = rsi(4);
            let result = feed(&mut rsi, &[10.0, 11.0, 10.0, 11.0, 10.0]).unwrap();
            assert_approx!(result, 50.0);
        }

        #[test]
        fn weighted_toward_gains() {
            // Changes: +3, −1 → RS = 3 → RSI = 75
            let mut rsi = rsi(2);
            let result = feed(&mut rsi, &[10.0, 13.0, 12.0]).unwrap();
            assert_approx!(result, 75.0);
        }
    }

    mod sliding {
        use super::*;

        #[test]
        fn window_forgets_old_changes() {
            // After the big drop scrolls out, only gains remain.
            let mut rsi = rsi(2);
            feed(&mut rsi, &[10.0, 5.0, 6.0, 7.0]);
            assert_eq!(rsi.value(), Some(100.0));
        }

        #[test]
        fn depends_only_on_trailing_window() {
            // Same final 3 changes, different prefixes → same RSI.
            let mut long = rsi(3);
            let mut short = rsi(3);
            feed(&mut long, &[50.0, 20.0, 80.0, 10.0, 11.0, 13.0, 12.0]);
            feed(&mut short, &[10.0, 11.0, 13.0, 12.0]);
            assert_approx!(long.value().unwrap(), short.value().unwrap());
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_correctly() {
            assert_eq!(rsi(14).to_string(), "RSI(14, Close)");
        }
    }

    mod clone {
        use super::*;

        #[test]
        fn produces_independent_state() {
            let mut rsi = rsi(2);
            feed(&mut rsi, &[10.0, 11.0]);

            let mut cloned = rsi.clone();
            assert_eq!(rsi.compute(&bar(12.0, 3)), Some(100.0));
            // Changes +1, −2 → RS = 0.5 → RSI = 100/3
            assert_approx!(cloned.compute(&bar(9.0, 3)).unwrap(), 100.0 / 3.0);
        }
    }

    mod config {
        use super::*;

        #[test]
        #[should_panic(expected = "length is required")]
        fn panics_without_length() {
            let _ = RsiConfig::builder().build();
        }
    }

    mod value_accessor {
        use super::*;

        #[test]
        fn none_before_convergence() {
            assert_eq!(rsi(14).value(), None);
        }

        #[test]
        fn matches_last_compute() {
            let mut rsi = rsi(2);
            let computed = feed(&mut rsi, &[10.0, 11.0, 12.0]);
            assert_eq!(rsi.value(), computed);
        }
    }
}
