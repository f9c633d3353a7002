use crate::{Ohlcv, Price, PriceSource, Timestamp, ring_buffer::RingBuffer};

#[derive(Clone, Debug)]
pub(crate) struct PriceWindow<const SUM_OF_SQUARES: bool = false> {
    window: RingBuffer<Price>,
    /// Running sum of values in the window. Maintained incrementally via
    /// add/subtract, may accumulate FP rounding drift over very long runs,
    /// but negligible for typical window sizes on financial data.
    sum: Price,
    sum_of_squares: f64,
    source: PriceSource,
    last_open_time: Option<Timestamp>,
}

pub(crate) type PriceWindowWithSumOfSquares = PriceWindow<true>;

impl PriceWindow {
    pub fn new(size: usize, source: PriceSource) -> Self {
        Self {
            window: RingBuffer::new(size),
            sum: 0.0,
            sum_of_squares: 0.0,
            source,
            last_open_time: None,
        }
    }
}

impl PriceWindow<true> {
    pub fn with_sum_of_squares(size: usize, source: PriceSource) -> Self {
        Self {
            window: RingBuffer::new(size),
            sum: 0.0,
            sum_of_squares: 0.0,
            source,
            last_open_time: None,
        }
    }
}

impl<const SUM_OF_SQUARES: bool> PriceWindow<SUM_OF_SQUARES> {
    #[inline]
    pub fn add(&mut self, ohlcv: &impl Ohlcv) {
        debug_assert!(
            self.last_open_time.is_none_or(|t| t < ohlcv.open_time()),
            "open_time must be strictly increasing: last={}, got={}",
            self.last_open_time.unwrap_or(0),
            ohlcv.open_time(),
        );
        self.last_open_time = Some(ohlcv.open_time());

        let price = self.source.extract(ohlcv);

        if let Some(old_price) = self.window.push(price) {
            self.sum -= old_price;
            if SUM_OF_SQUARES {
                self.sum_of_squares -= old_price * old_price;
            }
        }

        self.sum += price;
        if SUM_OF_SQUARES {
            self.sum_of_squares += price * price;
        }
    }

    #[inline]
    pub fn sum(&self) -> Option<Price> {
        self.is_ready().then_some(self.sum)
    }

    #[inline]
    pub fn sum_of_squares(&self) -> Option<Price> {
        assert!(SUM_OF_SQUARES, "sum_of_squares requires PriceWindow<true>");
        self.is_ready().then_some(self.sum_of_squares)
    }

    /// Minimum over the current buffer, `None` until the window is full.
    #[inline]
    pub fn min(&self) -> Option<Price> {
        self.is_ready()
            .then(|| self.window.iter().copied().fold(f64::INFINITY, f64::min))
    }

    /// Maximum over the current buffer, `None` until the window is full.
    #[inline]
    pub fn max(&self) -> Option<Price> {
        self.is_ready()
            .then(|| self.window.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.window.is_full()
    }
}
