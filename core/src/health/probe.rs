// stockcart/src/health/probe.rs

use super::HealthProbe;
use crate::error::ApiError;
use crate::http::ApiEndpoint;
use async_trait::async_trait;
use reqwest::Method;

pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// `GET {base}{path}`; any 2xx counts as healthy.
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
  endpoint: ApiEndpoint,
  path: Vec<String>,
}

impl HttpHealthProbe {
  pub fn new(endpoint: ApiEndpoint, path: &str) -> Self {
    let path = path
      .split('/')
      .filter(|segment| !segment.is_empty())
      .map(str::to_string)
      .collect();
    Self { endpoint, path }
  }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
  async fn check(&self) -> Result<(), ApiError> {
    let segments: Vec<&str> = self.path.iter().map(String::as_str).collect();
    let url = self.endpoint.url_for(&segments);
    let response = self.endpoint.request(Method::GET, url).send().await?;
    let status = response.status();
    if status.is_success() {
      return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
      status: status.as_u16(),
      body,
    })
  }
}
