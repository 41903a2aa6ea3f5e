// storefront/src/errors.rs

use stockcart::{ApiError, CartError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Required: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Cart Error: {source}")]
  Cart {
    #[from]
    source: CartError,
  },

  #[error("Backend Error: {source}")]
  Backend {
    #[from]
    source: ApiError,
  },

  #[error("Backend Unhealthy: {0}")]
  Unhealthy(String),

  #[error("Internal Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Process exit code for this failure: 2 for input the user can fix,
  /// 3 for an unreachable or failing backend, 1 otherwise.
  pub fn exit_code(&self) -> u8 {
    match self {
      AppError::Validation(_) | AppError::Auth(_) | AppError::NotFound(_) | AppError::Config(_) => 2,
      AppError::Cart { source } if source.is_validation() => 2,
      AppError::Cart {
        source: CartError::ItemNotFound { .. } | CartError::Unauthenticated,
      } => 2,
      AppError::Cart {
        source: CartError::Reconciliation { .. },
      }
      | AppError::Backend { .. }
      | AppError::Unhealthy(_) => 3,
      AppError::Cart { .. } | AppError::Internal(_) => 1,
    }
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(format!("{:#}", err))
  }
}

impl From<serde_json::Error> for AppError {
  fn from(err: serde_json::Error) -> Self {
    AppError::Internal(format!("Could not render output: {}", err))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
