use std::env;
use std::time::Duration;

use url::Url;

use super::env::{AppConfig, ConfigError, DirectoryConfig, EndpointConfig, LoggingConfig};

const DEFAULT_PREDICT_URL: &str =
    "https://phishing-website-detection-5hn3.onrender.com/predict";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_endpoint =
            env::var("PHISHGUARD_ENDPOINT").unwrap_or_else(|_| DEFAULT_PREDICT_URL.to_string());
        let predict_url = Url::parse(&raw_endpoint).map_err(|_| ConfigError::Invalid {
            key: "PHISHGUARD_ENDPOINT",
            value: raw_endpoint.clone(),
        })?;
        if !matches!(predict_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                key: "PHISHGUARD_ENDPOINT",
                value: raw_endpoint,
            });
        }

        let endpoint = EndpointConfig {
            predict_url,
            request_timeout: Duration::from_millis(
                env::var("REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(10_000),
            ),
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        Ok(Self {
            endpoint,
            directories,
            logging,
        })
    }
}
