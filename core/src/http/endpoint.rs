// stockcart/src/http/endpoint.rs

use crate::error::ApiError;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{event, Level};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Base URL, bearer token and the shared HTTP client for one backend.
///
/// Cloning is cheap; `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct ApiEndpoint {
  base_url: Url,
  bearer_token: Option<String>,
  client: Client,
}

impl ApiEndpoint {
  pub fn new(base_url: &str, bearer_token: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
    let base_url = Url::parse(base_url).map_err(|e| ApiError::Rejected {
      reason: format!("invalid base URL '{}': {}", base_url, e),
    })?;
    if base_url.cannot_be_a_base() {
      return Err(ApiError::Rejected {
        reason: format!("base URL '{}' cannot carry a path", base_url),
      });
    }

    let client = Client::builder().timeout(timeout).build()?;

    Ok(Self {
      base_url,
      bearer_token: bearer_token.filter(|t| !t.is_empty()),
      client,
    })
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  /// Appends percent-encoded `segments` to the base URL's path.
  pub fn url_for(&self, segments: &[&str]) -> Url {
    let mut url = self.base_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments.iter().filter(|s| !s.is_empty()));
    }
    url
  }

  /// A request with bearer authorization attached when a token is configured.
  pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
    event!(Level::TRACE, %method, %url, "Building backend request.");
    let builder = self.client.request(method, url);
    match &self.bearer_token {
      Some(token) => builder.bearer_auth(token),
      None => builder,
    }
  }
}

/// Fails with [`ApiError::Status`] on non-2xx, otherwise returns the body text.
pub(crate) async fn read_success_body(response: Response, context: &str) -> Result<String, ApiError> {
  let status = response.status();
  let body = response.text().await?;

  if !status.is_success() {
    event!(Level::WARN, status = status.as_u16(), context, "Backend returned an error status.");
    return Err(ApiError::Status {
      status: status.as_u16(),
      body,
    });
  }
  Ok(body)
}

/// Fails with [`ApiError::Status`] on non-2xx, otherwise decodes the body as `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ApiError> {
  let body = read_success_body(response, context).await?;
  serde_json::from_str(&body).map_err(|source| ApiError::Decode {
    context: context.to_string(),
    source,
  })
}
