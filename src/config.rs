use crate::validation::AnswerValidation;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub answer_validation: AnswerValidation,
    pub monitor_enabled: bool,
    pub poll_interval: Duration,
}

impl Config {
    // Read settings from the process environment (a .env file is loaded first by main)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("SURVEY_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| invalid("SURVEY_BIND_ADDR", e.to_string()))?;

        let answer_validation = match lookup("SURVEY_ANSWER_VALIDATION") {
            Some(raw) => raw
                .parse::<AnswerValidation>()
                .map_err(|reason| invalid("SURVEY_ANSWER_VALIDATION", reason))?,
            None => AnswerValidation::default(),
        };

        let monitor_enabled = match lookup("SURVEY_MONITOR") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                invalid("SURVEY_MONITOR", format!("expected true or false, got '{}'", raw))
            })?,
            None => false,
        };

        let poll_interval_ms = match lookup("SURVEY_POLL_INTERVAL_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid("SURVEY_POLL_INTERVAL_MS", e.to_string()))?,
            None => DEFAULT_POLL_INTERVAL_MS,
        };
        if poll_interval_ms == 0 {
            return Err(invalid("SURVEY_POLL_INTERVAL_MS", "must be greater than zero".to_string()));
        }

        Ok(Self {
            bind_addr,
            answer_validation,
            monitor_enabled,
            poll_interval: Duration::from_millis(poll_interval_ms),
        })
    }
}

fn invalid(key: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { key, reason }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
