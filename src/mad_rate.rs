use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Sma, SmaConfig,
};

/// Configuration for the moving-average deviation rate ([`MadRate`])
/// indicator.
///
/// # Example
///
/// ```
/// use tenkan_ta::{MadRateConfig, IndicatorConfig};
/// use std::num::NonZero;
///
/// let config = MadRateConfig::close(NonZero::new(25).unwrap());
/// assert_eq!(config.length(), 25);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MadRateConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for MadRateConfig {
    type Builder = MadRateConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MadRateConfigBuilder::new()
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

impl MadRateConfig {
    /// Deviation rate from the SMA of closing prices.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Display for MadRateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MadRateConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`MadRateConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct MadRateConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl MadRateConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
        }
    }
}

impl IndicatorConfigBuilder<MadRateConfig> for MadRateConfigBuilder {
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
    fn build(self) -> MadRateConfig {
        MadRateConfig {
            length: self.length.expect("length is required"),
            source: self.source,
        }
    }
}

/// Moving-average deviation rate (MAD rate, 乖離率).
///
/// How far the current price sits from its own simple moving average,
/// as a signed percentage:
///
/// ```text
/// MAD = (price − SMA(price, length)) / SMA(price, length) × 100
/// ```
///
/// Positive values mean price above the average, negative below.
/// First defined output appears at bar `length`, with the underlying
/// [`Sma`].
///
/// # Example
///
/// ```
/// use tenkan_ta::{MadRate, MadRateConfig};
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
/// let mut mad = MadRate::new(MadRateConfig::close(NonZero::new(2).unwrap()));
///
/// assert_eq!(mad.compute(&Bar(90.0, 1)), None);
///
/// // SMA = 100, price 110 → +10%
/// assert_eq!(mad.compute(&Bar(110.0, 2)), Some(10.0));
/// ```
#[derive(Clone, Debug)]
pub struct MadRate {
    config: MadRateConfig,
    sma: Sma,
    current: Option<Price>,
}

impl Indicator for MadRate {
    type Config = MadRateConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        let sma = Sma::new(
            SmaConfig::builder()
                .length(NonZero::new(config.length).expect("length is non-zero"))
                .source(config.source)
                .build(),
        );

        Self {
            config,
            sma,
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, kline: &impl Ohlcv) -> Option<Price> {
        let price = self.config.source.extract(kline);

        self.current = self
            .sma
            .compute(kline)
            .map(|sma| (price - sma) / sma * 100.0);

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for MadRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MAD({}, {})", self.config.length, self.config.source)
    }
}
