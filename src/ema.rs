use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Timestamp,
};

/// EMA recurrence over a plain scalar stream.
///
/// Seeds with the simple mean of the first `length` values, then applies
/// `ema = (value − ema) × α + ema` with `α = 2 / (length + 1)`. Shared by
/// [`Ema`] (price stream) and [`Macd`](crate::Macd) (signal line over the
/// MACD stream).
#[derive(Clone, Debug)]
pub(crate) struct EmaCore {
    length: usize,
    length_reciprocal: f64,
    alpha: f64,
    seed_sum: f64,
    seen: usize,
    current: Option<f64>,
}

impl EmaCore {
    pub(crate) fn new(length: usize) -> Self {
        Self {
            length,
            #[allow(clippy::cast_precision_loss)]
            length_reciprocal: 1.0 / length as f64,
            #[allow(clippy::cast_precision_loss)]
            alpha: 2.0 / (length as f64 + 1.0),
            seed_sum: 0.0,
            seen: 0,
            current: None,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, value: f64) -> Option<f64> {
        match self.current {
            Some(ema) => {
                self.current = Some((value - ema) * self.alpha + ema);
            }
            None => {
                self.seed_sum += value;
                self.seen += 1;

                if self.seen == self.length {
                    self.current = Some(self.seed_sum * self.length_reciprocal);
                }
            }
        }

        self.current
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<f64> {
        self.current
    }
}

/// Configuration for the Exponential Moving Average ([`Ema`])
/// indicator.
///
/// # Example
///
/// ```
/// use tenkan_ta::{EmaConfig, IndicatorConfig};
/// use std::num::NonZero;
///
/// let config = EmaConfig::close(NonZero::new(12).unwrap());
/// assert_eq!(config.length(), 12);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for EmaConfig {
    type Builder = EmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        EmaConfigBuilder::new()
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

impl EmaConfig {
    /// EMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Display for EmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`EmaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct EmaConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl EmaConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
        }
    }
}

impl IndicatorConfigBuilder<EmaConfig> for EmaConfigBuilder {
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
    fn build(self) -> EmaConfig {
        EmaConfig {
            length: self.length.expect("length is required"),
            source: self.source,
        }
    }
}

/// Exponential Moving Average (EMA).
///
/// A weighted moving average that gives more weight to recent
/// prices. Uses the standard smoothing factor `α = 2 / (length + 1)`:
///
/// ```text
/// EMA = (price − prev_EMA) × α + prev_EMA
/// ```
///
/// The first `length` bars are averaged into an SMA seed, which is
/// also the first defined output — an input of exactly `length`
/// values yields the same result as [`Sma`](crate::Sma). After
/// seeding, the EMA runs with O(1) constant memory per bar.
///
/// # Example
///
/// ```
/// use tenkan_ta::{Ema, EmaConfig};
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
/// let mut ema = Ema::new(EmaConfig::close(NonZero::new(3).unwrap()));
///
/// // Seeding phase: collecting SMA
/// assert_eq!(ema.compute(&Bar(2.0, 1)), None);
/// assert_eq!(ema.compute(&Bar(4.0, 2)), None);
///
/// // SMA seed = (2 + 4 + 6) / 3 = 4.0
/// assert_eq!(ema.compute(&Bar(6.0, 3)), Some(4.0));
///
/// // EMA(3) α = 0.5: (8 − 4) × 0.5 + 4 = 6.0
/// assert_eq!(ema.compute(&Bar(8.0, 4)), Some(6.0));
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    core: EmaCore,
    last_open_time: Option<Timestamp>,
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            core: EmaCore::new(config.length),
            last_open_time: None,
        }
    }

    #[inline]
    fn compute(&mut self, kline: &impl Ohlcv) -> Option<Price> {
        debug_assert!(
            self.last_open_time.is_none_or(|t| t < kline.open_time()),
            "open_time must be strictly increasing: last={}, got={}",
            self.last_open_time.unwrap_or(0),
            kline.open_time(),
        );
        self.last_open_time = Some(kline.open_time());

        self.core.push(self.config.source.extract(kline))
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.core.value()
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.config.length, self.config.source)
    }
}
