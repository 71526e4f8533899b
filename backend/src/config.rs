use serde::Deserialize;

/// Default provider URL templates, overridden by `COALESCE_API_URLS`
const DEFAULT_API_URLS: &str =
    "https://api1.com?member_id=,https://api2.com?member_id=,https://api3.com?member_id=";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server host
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Coalescing settings
    pub coalesce: CoalesceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoalesceConfig {
    /// Ordered provider URL templates; the member id is appended verbatim
    pub api_urls: Vec<String>,

    /// Strategy applied when a request does not name one
    pub default_strategy: String,

    /// Connection timeout per provider request (seconds)
    pub connect_timeout_secs: u64,

    /// Total timeout per provider request (seconds)
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: std::env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            coalesce: CoalesceConfig {
                api_urls: parse_api_urls(
                    &std::env::var("COALESCE_API_URLS")
                        .unwrap_or_else(|_| DEFAULT_API_URLS.to_string()),
                ),
                default_strategy: std::env::var("COALESCE_STRATEGY")
                    .unwrap_or_else(|_| "average".to_string()),
                connect_timeout_secs: std::env::var("CONNECT_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()?,
                request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
            },
        })
    }
}

/// Split a comma-separated URL list, dropping empty entries
fn parse_api_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect()
}
