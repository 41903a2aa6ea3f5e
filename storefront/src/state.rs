// storefront/src/state.rs
use crate::config::AppConfig;
use crate::errors::{AppError, Result as AppResult};
use crate::services::offline::{seeded_catalog, seeded_inventory, OfflineProbe};
use crate::services::Catalog;
use std::sync::Arc;
use stockcart::{
  ApiEndpoint, CartError, CartStorage, CartStore, CatalogClient, FileStorage, HealthMonitor, HealthProbe,
  HttpHealthProbe, HttpStockClient, Session, StockReconciler,
};

/// Everything a command needs, wired either to the backend or to the
/// offline stand-ins.
#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub session: Session,
  pub catalog: Catalog,
  pub reconciler: Arc<dyn StockReconciler>,
  pub storage: Arc<dyn CartStorage>,
  pub probe: Arc<dyn HealthProbe>,
}

impl AppState {
  pub fn build(config: AppConfig, user_override: Option<String>, offline: bool) -> AppResult<Self> {
    let config = Arc::new(config);
    let session = match user_override.or_else(|| config.user_id.clone()) {
      Some(user_id) => Session::authenticated(user_id),
      None => Session::Anonymous,
    };
    let storage: Arc<dyn CartStorage> = Arc::new(FileStorage::new(config.cart_dir.clone()));

    if offline {
      tracing::info!("Running offline with the seeded catalog.");
      let products = seeded_catalog();
      let inventory = seeded_inventory(&products);
      return Ok(Self {
        config,
        session,
        catalog: Catalog::Seeded(products),
        reconciler: Arc::new(inventory),
        storage,
        probe: Arc::new(OfflineProbe),
      });
    }

    let endpoint = ApiEndpoint::new(
      config.require_base_url()?,
      config.api_token.clone(),
      config.http_timeout,
    )?;
    tracing::info!(base_url = %endpoint.base_url(), "Using storefront backend.");

    Ok(Self {
      catalog: Catalog::Remote(CatalogClient::new(endpoint.clone())),
      reconciler: Arc::new(HttpStockClient::new(endpoint.clone())),
      probe: Arc::new(HttpHealthProbe::new(endpoint, &config.health_path)),
      config,
      session,
      storage,
    })
  }

  pub fn open_cart(&self) -> AppResult<CartStore> {
    CartStore::open(&self.session, self.storage.clone(), self.reconciler.clone()).map_err(|e| match e {
      CartError::Unauthenticated => {
        AppError::Auth("no user for this session; set STORE_USER_ID or pass --user".to_string())
      }
      other => other.into(),
    })
  }

  pub fn health_monitor(&self) -> HealthMonitor {
    HealthMonitor::new(self.probe.clone(), self.config.health_interval)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;
  use std::time::Duration;

  fn config(cart_dir: PathBuf, base_url: Option<&str>) -> AppConfig {
    AppConfig {
      api_base_url: base_url.map(str::to_string),
      api_token: None,
      user_id: Some("u1".to_string()),
      cart_dir,
      http_timeout: Duration::from_secs(1),
      health_interval: Duration::from_secs(30),
      health_path: "/health".to_string(),
    }
  }

  #[test]
  fn test_online_mode_needs_a_base_url() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppState::build(config(dir.path().to_path_buf(), None), None, false).err().unwrap();
    assert!(matches!(err, AppError::Config(_)));
    assert!(AppState::build(config(dir.path().to_path_buf(), Some("http://shop.test")), None, false).is_ok());
  }

  #[test]
  fn test_user_override_and_anonymous_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::build(config(dir.path().to_path_buf(), None), Some("u9".into()), true).unwrap();
    assert_eq!(state.session, Session::authenticated("u9"));

    let mut anonymous = config(dir.path().to_path_buf(), None);
    anonymous.user_id = None;
    let state = AppState::build(anonymous, None, true).unwrap();
    assert!(matches!(state.open_cart(), Err(AppError::Auth(_))));
  }
}
