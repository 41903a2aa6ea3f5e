// stockcart/src/http/catalog.rs

use super::endpoint::{read_json, ApiEndpoint};
use super::response::{ItemResponse, ListResponse};
use crate::error::ApiError;
use crate::model::{Product, ProductId};
use reqwest::{Method, StatusCode};
use tracing::{info, instrument};

/// Read side of the product catalog: just enough to obtain the projections a
/// cart needs (id, name, price, stock).
#[derive(Debug, Clone)]
pub struct CatalogClient {
  endpoint: ApiEndpoint,
}

impl CatalogClient {
  pub fn new(endpoint: ApiEndpoint) -> Self {
    Self { endpoint }
  }

  #[instrument(skip(self), err(Display))]
  pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
    let url = self.endpoint.url_for(&["products"]);
    let response = self.endpoint.request(Method::GET, url).send().await?;
    let products = read_json::<ListResponse<Product>>(response, "product list").await?.into_items();
    info!(product_count = products.len(), "Listed products");
    Ok(products)
  }

  /// `Ok(None)` when the backend answers 404.
  #[instrument(skip(self), fields(product_id = %id), err(Display))]
  pub async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, ApiError> {
    let url = self.endpoint.url_for(&["products", id.as_str()]);
    let response = self.endpoint.request(Method::GET, url).send().await?;
    if response.status() == StatusCode::NOT_FOUND {
      info!("Product not found");
      return Ok(None);
    }
    let product = read_json::<ItemResponse<Product>>(response, "product").await?.into_inner();
    Ok(Some(product))
  }
}
