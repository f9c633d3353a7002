use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Timestamp,
    ema::EmaCore,
};

/// Configuration for the Moving Average Convergence Divergence
/// ([`Macd`]) indicator.
///
/// # Example
///
/// ```
/// use tenkan_ta::{MacdConfig, IndicatorConfig};
///
/// // Standard 12/26/9 on closing price
/// let config = MacdConfig::close();
/// assert_eq!(config.length(), 26);
/// assert_eq!(config.fast(), 12);
/// assert_eq!(config.signal_length(), 9);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    fast: usize,
    slow: usize,
    signal_length: usize,
    source: PriceSource,
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }

    /// The longest price window: the slow EMA length.
    #[inline]
    fn length(&self) -> usize {
        self.slow
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl MacdConfig {
    /// Standard MACD(12, 26, 9) on closing price.
    #[must_use]
    pub fn close() -> Self {
        Self::builder().build()
    }

    /// Fast EMA length.
    #[must_use]
    pub fn fast(&self) -> usize {
        self.fast
    }

    /// Slow EMA length.
    #[must_use]
    pub fn slow(&self) -> usize {
        self.slow
    }

    /// Signal-line EMA length.
    #[must_use]
    pub fn signal_length(&self) -> usize {
        self.signal_length
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {}, {})",
            self.fast, self.slow, self.signal_length, self.source
        )
    }
}

/// Builder for [`MacdConfig`].
///
/// Defaults: fast = 12, slow = 26, signal = 9,
/// source = [`PriceSource::Close`]. Setting
/// [`length`](IndicatorConfigBuilder::length) adjusts the slow EMA.
/// The fast length must stay below the slow length.
pub struct MacdConfigBuilder {
    fast: usize,
    slow: usize,
    signal_length: usize,
    source: PriceSource,
}

impl MacdConfigBuilder {
    fn new() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal_length: 9,
            source: PriceSource::Close,
        }
    }

    /// Fast EMA length.
    #[must_use]
    pub fn fast(mut self, fast: NonZero<usize>) -> Self {
        self.fast = fast.get();
        self
    }

    /// Slow EMA length. Alias of [`length`](IndicatorConfigBuilder::length).
    #[must_use]
    pub fn slow(mut self, slow: NonZero<usize>) -> Self {
        self.slow = slow.get();
        self
    }

    /// Signal-line EMA length.
    #[must_use]
    pub fn signal_length(mut self, signal_length: NonZero<usize>) -> Self {
        self.signal_length = signal_length.get();
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    #[inline]
    fn length(self, length: NonZero<usize>) -> Self {
        self.slow(length)
    }

    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> MacdConfig {
        assert!(
            self.fast < self.slow,
            "MACD fast length must be less than slow length"
        );

        MacdConfig {
            fast: self.fast,
            slow: self.slow,
            signal_length: self.signal_length,
            source: self.source,
        }
    }
}

/// One MACD output sample.
///
/// `signal` and `histogram` stay `None` while the signal-line EMA is
/// still seeding; `histogram` is always `macd − signal` once both are
/// defined.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacdValue {
    pub macd: Price,
    pub signal: Option<Price>,
    pub histogram: Option<Price>,
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.signal, self.histogram) {
            (Some(signal), Some(histogram)) => write!(
                f,
                "MacdValue(macd: {}, signal: {signal}, histogram: {histogram})",
                self.macd
            ),
            _ => write!(f, "MacdValue(macd: {}, signal: seeding)", self.macd),
        }
    }
}

/// Moving Average Convergence Divergence (MACD).
///
/// The MACD line is the spread between a fast and a slow EMA of the
/// price; the signal line is an EMA of the MACD line itself, and the
/// histogram is their difference:
///
/// ```text
/// MACD      = EMA(price, fast) − EMA(price, slow)
/// signal    = EMA(MACD, signal_length)
/// histogram = MACD − signal
/// ```
///
/// The MACD line first appears at bar `slow` (once the slow EMA has
/// seeded); the signal and histogram follow at bar
/// `slow + signal_length − 1`.
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    fast: EmaCore,
    slow: EmaCore,
    signal: EmaCore,
    last_open_time: Option<Timestamp>,
    current: Option<MacdValue>,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = MacdValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            fast: EmaCore::new(config.fast),
            slow: EmaCore::new(config.slow),
            signal: EmaCore::new(config.signal_length),
            last_open_time: None,
            current: None,
        }
    }

    fn compute(&mut self, kline: &impl Ohlcv) -> Option<MacdValue> {
        debug_assert!(
            self.last_open_time.is_none_or(|t| t < kline.open_time()),
            "open_time must be strictly increasing: last={}, got={}",
            self.last_open_time.unwrap_or(0),
            kline.open_time(),
        );
        self.last_open_time = Some(kline.open_time());

        let price = self.config.source.extract(kline);

        let fast = self.fast.push(price);
        let slow = self.slow.push(price);

        self.current = match (fast, slow) {
            (Some(fast), Some(slow)) => {
                let macd = fast - slow;
                let signal = self.signal.push(macd);

                Some(MacdValue {
                    macd,
                    signal,
                    histogram: signal.map(|signal| macd - signal),
                })
            }
            _ => None,
        };

        self.current
    }

    #[inline]
    fn value(&self) -> Option<MacdValue> {
        self.current
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {}, {})",
            self.config.fast, self.config.slow, self.config.signal_length, self.config.source
        )
    }
}
