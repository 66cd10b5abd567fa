use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub data_dir: String,
    pub sim_latency_min_ms: u64,
    pub sim_latency_max_ms: u64,
    pub sim_failure_rate: f64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let config = Self {
            server_address: get_env_or("SERVER_ADDRESS", "127.0.0.1:4580"),
            data_dir: get_env_or("DATA_DIR", "./data"),
            sim_latency_min_ms: get_env_parse_or("SIM_LATENCY_MIN_MS", 200)?,
            sim_latency_max_ms: get_env_parse_or("SIM_LATENCY_MAX_MS", 1200)?,
            sim_failure_rate: get_env_parse_or("SIM_FAILURE_RATE", 0.08)?,
        };

        if config.sim_latency_max_ms < config.sim_latency_min_ms {
            return Err(Error::Config(format!(
                "SIM_LATENCY_MAX_MS ({}) must not be below SIM_LATENCY_MIN_MS ({})",
                config.sim_latency_max_ms, config.sim_latency_min_ms
            )));
        }
        if !(0.0..=1.0).contains(&config.sim_failure_rate) {
            return Err(Error::Config(format!(
                "SIM_FAILURE_RATE must be within [0, 1], got {}",
                config.sim_failure_rate
            )));
        }

        Ok(config)
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
