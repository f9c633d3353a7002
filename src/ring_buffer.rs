use std::collections::VecDeque;

/// Fixed-capacity FIFO queue. Pushing beyond capacity evicts and returns
/// the oldest element.
///
/// Owned exclusively by the indicator that uses it; windows are never
/// shared across indicators.
#[derive(Clone, Debug)]
pub(crate) struct RingBuffer<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    #[must_use]
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity
    }

    /// Appends `value`, evicting and returning the oldest element when the
    /// buffer is at capacity.
    #[inline]
    pub(crate) fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.is_full() {
            self.buffer.pop_front()
        } else {
            None
        };

        self.buffer.push_back(value);
        evicted
    }

    /// Iterates from oldest to newest.
    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }
}
