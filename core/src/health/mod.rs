// stockcart/src/health/mod.rs

//! Backend health monitoring as an owned, injectable service.

pub mod monitor;
pub mod probe;

pub use monitor::HealthMonitor;
pub use probe::HttpHealthProbe;

use crate::error::ApiError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{event, Level};

/// One health check against the backend.
#[async_trait]
pub trait HealthProbe: Send + Sync {
  /// `Ok(())` when the backend is healthy.
  async fn check(&self) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthState {
  /// No check has completed yet.
  Unknown,
  Up,
  Down,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
  pub state: HealthState,
  pub last_checked: Option<DateTime<Utc>>,
  pub last_error: Option<String>,
  pub consecutive_failures: u32,
}

impl Default for HealthStatus {
  fn default() -> Self {
    Self {
      state: HealthState::Unknown,
      last_checked: None,
      last_error: None,
      consecutive_failures: 0,
    }
  }
}

impl HealthStatus {
  pub fn is_up(&self) -> bool {
    self.state == HealthState::Up
  }

  pub(crate) fn record(&mut self, outcome: Result<(), ApiError>) {
    let previous = self.state;
    self.last_checked = Some(Utc::now());
    match outcome {
      Ok(()) => {
        self.state = HealthState::Up;
        self.last_error = None;
        self.consecutive_failures = 0;
        if previous != HealthState::Up {
          event!(Level::INFO, "Backend is up.");
        }
      }
      Err(e) => {
        self.state = HealthState::Down;
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if previous != HealthState::Down {
          event!(Level::WARN, error = %e, "Backend is down.");
        } else {
          event!(Level::DEBUG, error = %e, failures = self.consecutive_failures, "Backend still down.");
        }
        self.last_error = Some(e.to_string());
      }
    }
  }
}
