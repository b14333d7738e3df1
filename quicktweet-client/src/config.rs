use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_RECOMMEND_LIMIT: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub page_size: usize,
    pub recommend_limit: usize,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: trim_url(api_url.into()),
            page_size: DEFAULT_PAGE_SIZE,
            recommend_limit: DEFAULT_RECOMMEND_LIMIT,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: trim_url(try_load("QUICKTWEET_API_URL", DEFAULT_API_URL)?),
            page_size: try_load("QUICKTWEET_PAGE_SIZE", "5")?,
            recommend_limit: try_load("QUICKTWEET_RECOMMEND_LIMIT", "3")?,
            timeout: Duration::from_secs(try_load("QUICKTWEET_TIMEOUT_SECS", "10")?),
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = trim_url(api_url.into());
        self
    }

    pub(crate) fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder().timeout(self.timeout).build()
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }
    })
}
