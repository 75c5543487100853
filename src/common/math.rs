//! Small numeric building blocks for indicator calculations

use std::collections::VecDeque;

/// Simple moving average of the first `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let sum: f64 = values[..period].iter().sum();
    Some(sum / period as f64)
}

pub fn midpoint(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// Which extremum a [`SlidingExtremum`] tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

/// Running max or min over a trailing window of fixed size.
///
/// Backed by a monotonic deque of `(index, value)` pairs: each value is pushed
/// and popped at most once, so a full pass over `n` values costs O(n).
#[derive(Debug, Clone)]
pub struct SlidingExtremum {
    kind: Extremum,
    window: usize,
    deque: VecDeque<(usize, f64)>,
}

impl SlidingExtremum {
    pub fn new(kind: Extremum, window: usize) -> Self {
        Self {
            kind,
            window,
            deque: VecDeque::with_capacity(window),
        }
    }

    pub fn max(window: usize) -> Self {
        Self::new(Extremum::Max, window)
    }

    pub fn min(window: usize) -> Self {
        Self::new(Extremum::Min, window)
    }

    /// Push the value at `index` and return the extremum of the window ending there.
    ///
    /// Indices must be pushed in increasing order.
    pub fn push(&mut self, index: usize, value: f64) -> Option<f64> {
        while let Some(&(_, back)) = self.deque.back() {
            let dominated = match self.kind {
                Extremum::Max => back <= value,
                Extremum::Min => back >= value,
            };
            if !dominated {
                break;
            }
            self.deque.pop_back();
        }
        self.deque.push_back((index, value));

        // Evict entries that fell out of [index - window + 1, index]
        while let Some(&(front, _)) = self.deque.front() {
            if front + self.window <= index {
                self.deque.pop_front();
            } else {
                break;
            }
        }

        self.deque.front().map(|&(_, v)| v)
    }
}
