/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar timestamp (epoch, unit consistent across a run) or sequence number.
pub type Timestamp = u64;

/// OHLCV bar data used as input to all indicators.
///
/// Implement this on your own kline/candle type to avoid per-bar
/// conversion. Indicators accept `&impl Ohlcv` and extract the
/// configured [`PriceSource`](crate::PriceSource) internally.
///
/// # Ordering
///
/// Bars must arrive in strictly ascending [`open_time`](Ohlcv::open_time)
/// order, already deduplicated. Indicators assert this in debug builds;
/// the [`PriceBar`](crate::PriceBar) adapter rejects violations eagerly
/// with [`InputError`](crate::InputError).
///
/// # Example
///
/// ```
/// use tenkan_ta::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn open_time(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Bar timestamp or sequence number.
    ///
    /// Must be strictly increasing between calls to
    /// [`Indicator::compute`](crate::Indicator::compute).
    fn open_time(&self) -> Timestamp;

    /// Trade volume during the bar. Defaults to `0.0`.
    ///
    /// No built-in indicator reads volume; it is carried for
    /// presentation series only.
    fn volume(&self) -> f64 {
        0.0
    }
}
