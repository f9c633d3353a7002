use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
    price_window::PriceWindow, ring_buffer::RingBuffer,
};

/// Configuration for the Stochastic oscillator ([`Stochastic`]).
///
/// # Example
///
/// ```
/// use tenkan_ta::{StochasticConfig, IndicatorConfig};
///
/// // Standard fast stochastic: %K over 5 bars, %D over 3 %K values
/// let config = StochasticConfig::close();
/// assert_eq!(config.length(), 5);
/// assert_eq!(config.d(), 3);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct StochasticConfig {
    k: usize,
    d: usize,
    source: PriceSource,
}

impl IndicatorConfig for StochasticConfig {
    type Builder = StochasticConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        StochasticConfigBuilder::new()
    }

    /// The %K lookback window.
    #[inline]
    fn length(&self) -> usize {
        self.k
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl StochasticConfig {
    /// Standard Stochastic(5, 3) with %K measured on the closing price.
    #[must_use]
    pub fn close() -> Self {
        Self::builder().build()
    }

    /// %K lookback window.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// %D smoothing window, in %K samples.
    #[must_use]
    pub fn d(&self) -> usize {
        self.d
    }
}

impl Display for StochasticConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StochasticConfig({}, {}, {})", self.k, self.d, self.source)
    }
}

/// Builder for [`StochasticConfig`].
///
/// Defaults: k = 5, d = 3, source = [`PriceSource::Close`]. Setting
/// [`length`](IndicatorConfigBuilder::length) adjusts the %K window.
pub struct StochasticConfigBuilder {
    k: usize,
    d: usize,
    source: PriceSource,
}

impl StochasticConfigBuilder {
    fn new() -> Self {
        Self {
            k: 5,
            d: 3,
            source: PriceSource::Close,
        }
    }

    /// %K lookback window. Alias of
    /// [`length`](IndicatorConfigBuilder::length).
    #[must_use]
    pub fn k(mut self, k: NonZero<usize>) -> Self {
        self.k = k.get();
        self
    }

    /// %D smoothing window, in %K samples.
    #[must_use]
    pub fn d(mut self, d: NonZero<usize>) -> Self {
        self.d = d.get();
        self
    }
}

impl IndicatorConfigBuilder<StochasticConfig> for StochasticConfigBuilder {
    #[inline]
    fn length(self, length: NonZero<usize>) -> Self {
        self.k(length)
    }

    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> StochasticConfig {
        StochasticConfig {
            k: self.k,
            d: self.d,
            source: self.source,
        }
    }
}

/// One Stochastic output sample.
///
/// `d` stays `None` until enough %K samples exist to smooth.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochasticValue {
    pub k: Price,
    pub d: Option<Price>,
}

impl Display for StochasticValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.d {
            Some(d) => write!(f, "StochasticValue(%K: {}, %D: {d})", self.k),
            None => write!(f, "StochasticValue(%K: {}, %D: smoothing)", self.k),
        }
    }
}

/// Stochastic oscillator (%K / %D).
///
/// %K locates the current price within the trailing high-low range on
/// a 0–100 scale; %D is the simple mean of the last `d` %K values:
///
/// ```text
/// %K = (price − lowest_low) / (highest_high − lowest_low) × 100
/// %D = SMA(%K, d)
/// ```
///
/// A zero-width range (all highs equal all lows) yields %K = 0. %K
/// first appears at bar `k`; %D follows at bar `k + d − 1`.
#[derive(Clone, Debug)]
pub struct Stochastic {
    config: StochasticConfig,
    highs: PriceWindow,
    lows: PriceWindow,
    k_values: RingBuffer<Price>,
    d_reciprocal: f64,
    current: Option<StochasticValue>,
}

impl Indicator for Stochastic {
    type Config = StochasticConfig;
    type Output = StochasticValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            highs: PriceWindow::new(config.k, PriceSource::High),
            lows: PriceWindow::new(config.k, PriceSource::Low),
            k_values: RingBuffer::new(config.d),
            #[allow(clippy::cast_precision_loss)]
            d_reciprocal: 1.0 / config.d as f64,
            current: None,
        }
    }

    fn compute(&mut self, kline: &impl Ohlcv) -> Option<StochasticValue> {
        self.highs.add(kline);
        self.lows.add(kline);

        let (Some(highest), Some(lowest)) = (self.highs.max(), self.lows.min()) else {
            return None;
        };
        let range = highest - lowest;

        let price = self.config.source.extract(kline);
        let k = if range == 0.0 {
            0.0
        } else {
            (price - lowest) / range * 100.0
        };

        self.k_values.push(k);
        let d = self
            .k_values
            .is_full()
            .then(|| self.k_values.iter().sum::<f64>() * self.d_reciprocal);

        self.current = Some(StochasticValue { k, d });

        self.current
    }

    #[inline]
    fn value(&self) -> Option<StochasticValue> {
        self.current
    }
}

impl Display for Stochastic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stochastic({}, {}, {})",
            self.config.k, self.config.d, self.config.source
        )
    }
}
