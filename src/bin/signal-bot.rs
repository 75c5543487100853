//! Signal Bot
//!
//! Polls price history on a cron schedule, evaluates the EMA / Kijun-sen
//! agreement rule across timeframes and notifies the authorized Telegram
//! user. Optionally serves /health and /metrics.

use dotenvy::dotenv;
use signalbot::bot::Session;
use signalbot::config::Config;
use signalbot::core::http::{start_server, AppState};
use signalbot::core::runtime::{BotRuntime, RuntimeConfig};
use signalbot::core::scheduler::{CycleGuard, JobScheduler};
use signalbot::core::CycleRunner;
use signalbot::logging;
use signalbot::metrics::Metrics;
use signalbot::services::market_data::MarketDataGateway;
use signalbot::services::telegram::TelegramClient;
use signalbot::services::yahoo::YahooFinanceProvider;
use signalbot::signals::Aggregator;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration error");
            eprintln!("signal-bot: {}", e);
            std::process::exit(1);
        }
    };

    let env = signalbot::config::get_environment();
    info!(environment = %env, "BOT IS RUNNING");
    let instrument_names: Vec<&str> = config.instruments.iter().map(|i| i.name.as_str()).collect();
    let timeframe_codes: Vec<&str> = config.timeframes.iter().map(|t| t.code()).collect();
    info!(
        instruments = ?instrument_names,
        timeframes = ?timeframe_codes,
        ema_period = config.indicator_params.ema_period,
        ichimoku_period = config.indicator_params.kijun_period,
        check_interval = %config.check_interval,
        "configuration loaded"
    );

    let metrics = Arc::new(Metrics::new()?);
    let session = Arc::new(Session::new());

    let provider = Arc::new(YahooFinanceProvider::new(
        config.market_data_url.clone(),
        config.request_timeout,
    )?);
    let gateway = MarketDataGateway::new(provider).with_metrics(metrics.clone());
    let aggregator = Arc::new(
        Aggregator::new(gateway, config.timeframes.clone(), config.indicator_params)
            .with_metrics(metrics.clone()),
    );

    let telegram = Arc::new(TelegramClient::new(
        config.telegram_api_url.clone(),
        config.bot_token,
        config.request_timeout,
    )?);

    let runner = Arc::new(
        CycleRunner::new(
            aggregator,
            config.instruments.clone(),
            session.clone(),
            telegram.clone(),
            config.allowed_user_id,
        )
        .with_instrument_timeout(config.instrument_timeout)
        .with_metrics(metrics.clone()),
    );
    let guard = CycleGuard::new(runner).with_metrics(metrics.clone());

    let scheduler = JobScheduler::new(guard.clone(), config.schedule.clone());
    scheduler.start().await;

    let bot = Arc::new(
        BotRuntime::new(
            RuntimeConfig::new(config.allowed_user_id),
            telegram,
            session.clone(),
            guard,
        )
        .with_metrics(metrics.clone()),
    );
    let bot_handle = bot.start();

    let server_handle = config.http_port.map(|port| {
        let state = AppState::new(session.clone(), metrics.clone());
        tokio::spawn(async move {
            if let Err(e) = start_server(port, state).await {
                error!(error = %e, "HTTP server error");
            }
        })
    });

    info!("Signal bot started, waiting for shutdown signal...");
    signal::ctrl_c().await?;

    info!("Shutting down signal bot...");
    scheduler.stop().await;
    bot_handle.abort();
    if let Some(handle) = server_handle {
        handle.abort();
    }
    info!("Signal bot stopped");

    Ok(())
}
