//! External collaborators: market data and chat transport.

pub mod market_data;
pub mod notifier;
pub mod telegram;
pub mod yahoo;

pub use market_data::{MarketDataGateway, MarketDataProvider, ProviderError};
pub use notifier::Notifier;
