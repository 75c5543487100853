//! Shared data models spanning the engine layers.

pub mod bar;
pub mod indicators;
pub mod instrument;
pub mod signal;
pub mod timeframe;

pub use bar::PriceBar;
pub use indicators::{IndicatorParams, IndicatorSeries, IndicatorSnapshot};
pub use instrument::Instrument;
pub use signal::{Condition, Verdict};
pub use timeframe::{Timeframe, TimeframeError};
