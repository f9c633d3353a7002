//! Streaming technical analysis indicators and buy-signal detection.
//!
//! Indicators accept any type implementing [`Ohlcv`] and return
//! typed results. Values are `None` until enough data has been
//! received for convergence.
//!
//! Each indicator type ([`Sma`], [`Ema`], [`Rsi`], [`Rci`], [`Macd`],
//! [`Stochastic`], [`MadRate`], [`Bands`]) exposes
//! [`new`](Sma::new), [`compute`](Sma::compute), and
//! [`value`](Sma::value) as inherent methods, no trait import
//! needed. Import [`Indicator`] only for generic code.
//!
//! On top of the indicators, the [`signal`] module detects buy
//! patterns over indicator series and aggregates them into per-family
//! reports plus a combined [`signal::SignalReport`], and the [`chart`]
//! module builds labelled chart-ready series from a bar sequence.

mod bands;
mod bar;
pub mod chart;
mod ema;
mod indicator;
mod macd;
mod mad_rate;
mod ohlcv;
mod price_source;
mod price_window;
mod rank;
mod rci;
mod ring_buffer;
mod rsi;
pub mod signal;
mod sma;
mod stochastic;

pub use crate::bar::{InputError, PriceBar, bars_from_columns, validate_bars};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::ohlcv::{Ohlcv, Price, Timestamp};
pub use crate::price_source::PriceSource;

pub use crate::bands::{Bands, BandsConfig, BandsConfigBuilder, BandsValue, StdDev};
pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder, MacdValue};
pub use crate::mad_rate::{MadRate, MadRateConfig, MadRateConfigBuilder};
pub use crate::rci::{Rci, RciConfig, RciConfigBuilder};
pub use crate::rsi::{Rsi, RsiConfig, RsiConfigBuilder};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder};
pub use crate::stochastic::{
    Stochastic, StochasticConfig, StochasticConfigBuilder, StochasticValue,
};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, kline: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, kline)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, Price);
impl_indicator_methods!(Ema, EmaConfig, Price);
impl_indicator_methods!(Rsi, RsiConfig, Price);
impl_indicator_methods!(Rci, RciConfig, Price);
impl_indicator_methods!(Macd, MacdConfig, MacdValue);
impl_indicator_methods!(Stochastic, StochasticConfig, StochasticValue);
impl_indicator_methods!(MadRate, MadRateConfig, Price);
impl_indicator_methods!(Bands, BandsConfig, BandsValue);

#[cfg(test)]
mod test_util;
