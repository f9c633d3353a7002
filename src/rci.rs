use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Timestamp,
    rank::descending_ranks, ring_buffer::RingBuffer,
};

/// Configuration for the Rank Correlation Index ([`Rci`]) indicator.
///
/// # Example
///
/// ```
/// use tenkan_ta::{RciConfig, IndicatorConfig};
/// use std::num::NonZero;
///
/// let config = RciConfig::close(NonZero::new(9).unwrap());
/// assert_eq!(config.length(), 9);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RciConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for RciConfig {
    type Builder = RciConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        RciConfigBuilder::new()
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

impl RciConfig {
    /// RCI on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }
}

impl Display for RciConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RciConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`RciConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set and at least 2 before calling
/// [`build`](IndicatorConfigBuilder::build) — the rank correlation is
/// undefined for a single sample.
pub struct RciConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl RciConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
        }
    }
}

impl IndicatorConfigBuilder<RciConfig> for RciConfigBuilder {
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
    fn build(self) -> RciConfig {
        let length = self.length.expect("length is required");
        assert!(length >= 2, "RCI length must be at least 2");

        RciConfig {
            length,
            source: self.source,
        }
    }
}

/// Rank Correlation Index (RCI).
///
/// Spearman rank correlation between time order and price order over
/// the trailing window, scaled to −100..=100:
///
/// ```text
/// RCI = (1 − 6 Σd² / (n (n² − 1))) × 100
/// ```
///
/// where `d` is the per-bar difference between the time rank (most
/// recent bar = 1) and the price rank (highest price = 1). A strictly
/// rising window scores 100, strictly falling −100. Tied prices share
/// the average of the ranks they span, so a perfectly flat window
/// scores the neutral 50.
///
/// # Example
///
/// ```
/// use tenkan_ta::{Rci, RciConfig};
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
/// let mut rci = Rci::new(RciConfig::close(NonZero::new(3).unwrap()));
///
/// assert_eq!(rci.compute(&Bar(10.0, 1)), None);
/// assert_eq!(rci.compute(&Bar(11.0, 2)), None);
///
/// // Strictly rising window → perfect positive correlation
/// assert_eq!(rci.compute(&Bar(12.0, 3)), Some(100.0));
/// ```
#[derive(Clone, Debug)]
pub struct Rci {
    config: RciConfig,
    prices: RingBuffer<Price>,
    last_open_time: Option<Timestamp>,
    current: Option<Price>,
}

impl Rci {
    fn rci_from_window(&self) -> Price {
        let values: Vec<Price> = self.prices.iter().copied().collect();
        let price_ranks = descending_ranks(&values);
        let n = values.len();

        // Time rank: newest bar is 1, the oldest is n. Window iterates
        // oldest first, so position i carries time rank n − i.
        let mut d_squared_sum = 0.0;
        for (i, price_rank) in price_ranks.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let time_rank = (n - i) as f64;
            let d = time_rank - price_rank;
            d_squared_sum += d * d;
        }

        #[allow(clippy::cast_precision_loss)]
        let n = n as f64;
        (1.0 - 6.0 * d_squared_sum / (n * (n * n - 1.0))) * 100.0
    }
}

impl Indicator for Rci {
    type Config = RciConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            prices: RingBuffer::new(config.length),
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

        self.prices.push(self.config.source.extract(kline));

        self.current = self.prices.is_full().then(|| self.rci_from_window());

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Rci {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RCI({}, {})", self.config.length, self.config.source)
    }
}
