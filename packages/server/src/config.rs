//! Environment-driven configuration.

use std::time::Duration;

use anyhow::Context;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_JOB_TIMEOUT_SECS: u64 = 900;
const DEFAULT_USER_AGENT: &str = "leadgen-server/0.1 (business lead extraction)";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub job_timeout: Duration,
    pub fetch_delay: Duration,
    /// Overrides for the public OSM endpoints, mainly for self-hosted mirrors.
    pub overpass_url: Option<String>,
    pub nominatim_url: Option<String>,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env_parsed("PORT", DEFAULT_PORT)?,
            job_timeout: Duration::from_secs(env_parsed(
                "JOB_TIMEOUT_SECS",
                DEFAULT_JOB_TIMEOUT_SECS,
            )?),
            fetch_delay: Duration::from_millis(env_parsed(
                "FETCH_DELAY_MS",
                leadgen::DEFAULT_FETCH_DELAY_MS,
            )?),
            overpass_url: std::env::var("OVERPASS_URL").ok(),
            nominatim_url: std::env::var("NOMINATIM_URL").ok(),
            user_agent: std::env::var("USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("invalid value for {name}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
