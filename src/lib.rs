//! Signal bot: polls price history for a set of instruments, evaluates an
//! EMA / Kijun-sen agreement rule across timeframes and notifies a single
//! authorized chat user when every timeframe agrees.

pub mod bot;
pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
