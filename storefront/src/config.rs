// storefront/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use stockcart::health::probe::DEFAULT_HEALTH_PATH;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Required unless running offline.
  pub api_base_url: Option<String>,
  pub api_token: Option<String>,
  pub user_id: Option<String>,
  pub cart_dir: PathBuf,
  pub http_timeout: Duration,
  pub health_interval: Duration,
  pub health_path: String,
}

impl AppConfig {
  /// Loads `.env` (if present) and reads the `STORE_*` variables.
  pub fn from_env() -> Result<Self> {
    dotenvy::dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| lookup(var_name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let parse_secs = |var_name: &str, default: u64| -> Result<Duration> {
      match get_env(var_name) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
          .parse::<u64>()
          .ok()
          .filter(|secs| *secs > 0)
          .map(Duration::from_secs)
          .ok_or_else(|| AppError::Config(format!("Invalid {}: '{}' is not a positive number of seconds", var_name, raw))),
      }
    };

    let api_base_url = get_env("STORE_API_BASE_URL");
    let api_token = get_env("STORE_API_TOKEN");
    let user_id = get_env("STORE_USER_ID");
    let cart_dir = get_env("STORE_CART_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".storefront"));
    let http_timeout = parse_secs("STORE_HTTP_TIMEOUT_SECS", 10)?;
    let health_interval = parse_secs("STORE_HEALTH_INTERVAL_SECS", 30)?;
    let health_path = get_env("STORE_HEALTH_PATH").unwrap_or_else(|| DEFAULT_HEALTH_PATH.to_string());

    tracing::debug!(
      api_base_url = ?api_base_url,
      has_token = api_token.is_some(),
      cart_dir = %cart_dir.display(),
      "Application configuration loaded."
    );

    Ok(Self {
      api_base_url,
      api_token,
      user_id,
      cart_dir,
      http_timeout,
      health_interval,
      health_path,
    })
  }

  pub fn require_base_url(&self) -> Result<&str> {
    self
      .api_base_url
      .as_deref()
      .ok_or_else(|| AppError::Config("Missing environment variable 'STORE_API_BASE_URL' (or pass --offline)".to_string()))
  }
}
