//! Process configuration loaded from the environment

use cron::Schedule;
use secrecy::SecretString;
use std::env;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::core::scheduler::parse_schedule;
use crate::models::{IndicatorParams, Instrument, Timeframe};
use crate::services::telegram::DEFAULT_API_URL;
use crate::services::yahoo::DEFAULT_BASE_URL;

pub const DEFAULT_INSTRUMENTS: &str =
    "EURUSD:EURUSD=X,GBPUSD:GBPUSD=X,USDJPY:JPY=X,XAUUSD:GC=F,BTCUSD:BTC-USD";
pub const DEFAULT_TIMEFRAMES: &str = "1h,1d,5d";
pub const DEFAULT_CHECK_INTERVAL: &str = "0 0 * * * *";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable the process cannot run without is unset or empty.
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {name} ('{value}'): {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Deployment environment name (`production`, `sandbox`, ...)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug)]
pub struct Config {
    pub bot_token: SecretString,
    pub allowed_user_id: i64,
    pub instruments: Vec<Instrument>,
    pub indicator_params: IndicatorParams,
    pub timeframes: Vec<Timeframe>,
    pub check_interval: String,
    pub schedule: Schedule,
    pub request_timeout: Duration,
    pub instrument_timeout: Duration,
    pub market_data_url: Url,
    pub telegram_api_url: Url,
    pub http_port: Option<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bot_token =
            var("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::MissingVar("TELEGRAM_BOT_TOKEN"))?;
        let allowed_user_id =
            var("ALLOWED_USER_ID").ok_or(ConfigError::MissingVar("ALLOWED_USER_ID"))?;
        let allowed_user_id = parse_value("ALLOWED_USER_ID", &allowed_user_id)?;

        let instruments = parse_instruments(
            &var("INSTRUMENTS").unwrap_or_else(|| DEFAULT_INSTRUMENTS.to_string()),
        )?;
        let timeframes = parse_timeframes(
            &var("TIMEFRAMES").unwrap_or_else(|| DEFAULT_TIMEFRAMES.to_string()),
        )?;

        let defaults = IndicatorParams::default();
        let ema_period = parse_period("EMA_PERIOD", var("EMA_PERIOD"), defaults.ema_period)?;
        let kijun_period =
            parse_period("ICHIMOKU_PERIOD", var("ICHIMOKU_PERIOD"), defaults.kijun_period)?;

        let check_interval =
            var("CHECK_INTERVAL").unwrap_or_else(|| DEFAULT_CHECK_INTERVAL.to_string());
        let schedule = parse_schedule(&check_interval).map_err(|e| ConfigError::InvalidValue {
            name: "CHECK_INTERVAL",
            value: check_interval.clone(),
            reason: e.to_string(),
        })?;

        let request_timeout =
            parse_seconds("REQUEST_TIMEOUT_SECONDS", var("REQUEST_TIMEOUT_SECONDS"), 10)?;
        let instrument_timeout =
            parse_seconds("INSTRUMENT_TIMEOUT_SECONDS", var("INSTRUMENT_TIMEOUT_SECONDS"), 60)?;

        let market_data_url = parse_url(
            "MARKET_DATA_URL",
            &var("MARKET_DATA_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        )?;
        let telegram_api_url = parse_url(
            "TELEGRAM_API_URL",
            &var("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;

        let http_port = var("HTTP_PORT")
            .map(|port| parse_value("HTTP_PORT", &port))
            .transpose()?;

        Ok(Self {
            bot_token: SecretString::new(bot_token.into()),
            allowed_user_id,
            instruments,
            indicator_params: IndicatorParams::new(ema_period, kijun_period),
            timeframes,
            check_interval,
            schedule,
            request_timeout,
            instrument_timeout,
            market_data_url,
            telegram_api_url,
            http_port,
        })
    }
}

fn parse_value<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_period(
    name: &'static str,
    value: Option<String>,
    default: usize,
) -> Result<usize, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let period: usize = parse_value(name, &value)?;
    if period == 0 {
        return Err(ConfigError::InvalidValue {
            name,
            value,
            reason: "period must be at least 1".to_string(),
        });
    }
    Ok(period)
}

fn parse_seconds(
    name: &'static str,
    value: Option<String>,
    default: u64,
) -> Result<Duration, ConfigError> {
    let seconds = match value {
        Some(value) => parse_value(name, &value)?,
        None => default,
    };
    if seconds == 0 {
        return Err(ConfigError::InvalidValue {
            name,
            value: seconds.to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    Ok(Duration::from_secs(seconds))
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|e| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Parse `NAME:SYMBOL` pairs separated by commas.
///
/// Only the first `:` splits, so provider symbols may contain `=` or `-`.
pub fn parse_instruments(value: &str) -> Result<Vec<Instrument>, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        name: "INSTRUMENTS",
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let instruments = value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, symbol) = entry
                .split_once(':')
                .ok_or_else(|| invalid("expected NAME:SYMBOL entries"))?;
            let (name, symbol) = (name.trim(), symbol.trim());
            if name.is_empty() || symbol.is_empty() {
                return Err(invalid("name and symbol must not be empty"));
            }
            Ok(Instrument::new(name, symbol))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if instruments.is_empty() {
        return Err(invalid("at least one instrument is required"));
    }
    Ok(instruments)
}

pub fn parse_timeframes(value: &str) -> Result<Vec<Timeframe>, ConfigError> {
    let timeframes = value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| {
            code.parse::<Timeframe>().map_err(|e| ConfigError::InvalidValue {
                name: "TIMEFRAMES",
                value: value.to_string(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if timeframes.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: "TIMEFRAMES",
            value: value.to_string(),
            reason: "at least one timeframe is required".to_string(),
        });
    }
    Ok(timeframes)
}
