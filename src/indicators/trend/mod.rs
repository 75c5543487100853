//! Trend indicators: EMA, Kijun-sen

pub mod ema;
pub mod kijun;

pub use ema::*;
pub use kijun::*;
