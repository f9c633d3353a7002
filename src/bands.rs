use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
    price_window::PriceWindowWithSumOfSquares,
};

/// Standard-deviation multiplier for the band half-width.
///
/// Wraps a positive, non-NaN `f64`; the constructor panics otherwise.
/// Defaults to `2.0`. Implements `Eq` and `Hash` via bit-level
/// comparison, which is safe because NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
pub struct StdDev(f64);

impl StdDev {
    /// Creates a new standard-deviation multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `value` is zero, negative, or NaN.
    #[must_use]
    pub fn new(value: f64) -> Self {
        assert!(!value.is_nan(), "multiplier must not be NaN");
        assert!(value > 0.0, "multiplier must be positive");
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for StdDev {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for StdDev {}

impl Hash for StdDev {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for StdDev {
    fn default() -> Self {
        Self(2.0)
    }
}

/// Configuration for the Bollinger Bands ([`Bands`]) indicator.
///
/// # Example
///
/// ```
/// use tenkan_ta::{BandsConfig, IndicatorConfig};
///
/// // Default 10-bar bands at 2 standard deviations
/// let config = BandsConfig::close();
/// assert_eq!(config.length(), 10);
/// assert_eq!(config.multiplier(), 2.0);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct BandsConfig {
    length: usize,
    multiplier: StdDev,
    source: PriceSource,
}

impl IndicatorConfig for BandsConfig {
    type Builder = BandsConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        BandsConfigBuilder::new()
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

impl BandsConfig {
    /// Bands(10, 2σ) on closing price.
    #[must_use]
    pub fn close() -> Self {
        Self::builder().build()
    }

    /// Standard-deviation multiplier for the band half-width.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.multiplier.value()
    }
}

impl Display for BandsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BandsConfig({}, {}, {})",
            self.length,
            self.multiplier.value(),
            self.source
        )
    }
}

/// Builder for [`BandsConfig`].
///
/// Defaults: length = 10, multiplier = 2.0,
/// source = [`PriceSource::Close`].
pub struct BandsConfigBuilder {
    length: usize,
    multiplier: StdDev,
    source: PriceSource,
}

impl BandsConfigBuilder {
    fn new() -> Self {
        Self {
            length: 10,
            multiplier: StdDev::default(),
            source: PriceSource::Close,
        }
    }

    /// Standard-deviation multiplier for the band half-width.
    ///
    /// # Panics
    ///
    /// Panics if `multiplier` is zero, negative, or NaN.
    #[must_use]
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = StdDev::new(multiplier);
        self
    }
}

impl IndicatorConfigBuilder<BandsConfig> for BandsConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length.get();
        self
    }

    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> BandsConfig {
        BandsConfig {
            length: self.length,
            multiplier: self.multiplier,
            source: self.source,
        }
    }
}

/// One Bollinger Bands output sample.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BandsValue {
    pub upper: Price,
    pub middle: Price,
    pub lower: Price,
    /// Full band width: `upper − lower`.
    pub width: Price,
}

impl Display for BandsValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BandsValue(upper: {}, middle: {}, lower: {})",
            self.upper, self.middle, self.lower
        )
    }
}

/// Bollinger Bands.
///
/// A moving-average centre line with bands offset by a multiple of
/// the window's population standard deviation:
///
/// ```text
/// middle = SMA(price, length)
/// upper  = middle + multiplier × σ
/// lower  = middle − multiplier × σ
/// ```
///
/// The variance comes from running sums (`Σx² / n − mean²`), so each
/// bar is O(1) regardless of window length.
#[derive(Clone, Debug)]
pub struct Bands {
    config: BandsConfig,
    window: PriceWindowWithSumOfSquares,
    length_reciprocal: f64,
    multiplier: f64,
    current: Option<BandsValue>,
}

impl Indicator for Bands {
    type Config = BandsConfig;
    type Output = BandsValue;

    fn new(config: Self::Config) -> Self {
        let window = PriceWindowWithSumOfSquares::with_sum_of_squares(config.length, config.source);

        Self {
            config,
            window,
            #[allow(clippy::cast_precision_loss)]
            length_reciprocal: 1.0 / config.length as f64,
            multiplier: config.multiplier.value(),
            current: None,
        }
    }

    fn compute(&mut self, kline: &impl Ohlcv) -> Option<BandsValue> {
        self.window.add(kline);

        self.current = match (self.window.sum(), self.window.sum_of_squares()) {
            (Some(sum), Some(sum_of_squares)) => {
                let middle = sum * self.length_reciprocal;
                // Rounding can push the variance of a near-flat window
                // fractionally below zero.
                let variance =
                    (sum_of_squares * self.length_reciprocal - middle * middle).max(0.0);
                let offset = self.multiplier * variance.sqrt();

                Some(BandsValue {
                    upper: middle + offset,
                    middle,
                    lower: middle - offset,
                    width: 2.0 * offset,
                })
            }
            _ => None,
        };

        self.current
    }

    #[inline]
    fn value(&self) -> Option<BandsValue> {
        self.current
    }
}

impl Display for Bands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bands({}, {}, {})",
            self.config.length, self.multiplier, self.config.source
        )
    }
}
