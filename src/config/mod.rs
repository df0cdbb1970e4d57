/// Application configuration module
use crate::clients::DEFAULT_ANALYTICS_CAP;
use crate::pagination::DEFAULT_PAGE_SIZE;
use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub spacex_api_url: String,
    pub http_timeout: Duration,
    pub page_size: u32,
    pub analytics_cap: u32,
    pub bind_addr: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let spacex_api_url = get("SPACEX_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "https://api.spacexdata.com/v4".to_string());

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let timeout_secs = parse_or(get("HTTP_TIMEOUT_SECONDS"), 10u64);
        let page_size = parse_or(get("PAGE_SIZE"), DEFAULT_PAGE_SIZE);
        let analytics_cap = parse_or(get("ANALYTICS_CAP"), DEFAULT_ANALYTICS_CAP);

        if timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECONDS must be at least 1");
        }
        if page_size == 0 {
            anyhow::bail!("PAGE_SIZE must be at least 1");
        }
        if analytics_cap == 0 {
            anyhow::bail!("ANALYTICS_CAP must be at least 1");
        }

        Ok(Self {
            spacex_api_url,
            http_timeout: Duration::from_secs(timeout_secs),
            page_size,
            analytics_cap,
            bind_addr,
        })
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
