// stockcart/src/http/stock.rs

use super::endpoint::{read_success_body, ApiEndpoint};
use super::response::ItemResponse;
use crate::error::ApiError;
use crate::inventory::{StockLevel, StockReconciler};
use crate::model::ProductId;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, instrument, warn};

#[derive(Debug, Serialize)]
struct StockDelta {
  quantity: i64,
}

/// `PATCH /products/{id}/stock` with `{"quantity": <signed delta>}`.
///
/// Any 2xx status counts as applied, whatever the body says.
#[derive(Debug, Clone)]
pub struct HttpStockClient {
  endpoint: ApiEndpoint,
}

impl HttpStockClient {
  pub fn new(endpoint: ApiEndpoint) -> Self {
    Self { endpoint }
  }
}

#[async_trait]
impl StockReconciler for HttpStockClient {
  #[instrument(skip(self), fields(product_id = %product_id), err(Display))]
  async fn adjust_stock(&self, product_id: &ProductId, delta: i64) -> Result<StockLevel, ApiError> {
    debug!("Sending stock delta");
    let url = self.endpoint.url_for(&["products", product_id.as_str(), "stock"]);
    let response = self
      .endpoint
      .request(Method::PATCH, url)
      .json(&StockDelta { quantity: delta })
      .send()
      .await?;

    // The status decides success; a count in the body is a bonus.
    let body = read_success_body(response, "stock update response").await?;
    let mut level = if body.trim().is_empty() {
      StockLevel::acknowledged(product_id.clone())
    } else {
      match serde_json::from_str::<ItemResponse<StockLevel>>(&body) {
        Ok(answer) => answer.into_inner(),
        Err(e) => {
          warn!(error = %e, "Stock delta accepted but the answer could not be read");
          StockLevel::acknowledged(product_id.clone())
        }
      }
    };
    if level.product_id.is_none() {
      level.product_id = Some(product_id.clone());
    }
    debug!(remaining_stock = ?level.stock, "Stock delta accepted");
    Ok(level)
  }
}
