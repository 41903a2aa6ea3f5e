// storefront/src/services/catalog.rs
use crate::errors::{AppError, Result as AppResult};
use stockcart::{CatalogClient, Product, ProductId};
use tracing::instrument;

/// Where product projections come from.
#[derive(Debug, Clone)]
pub enum Catalog {
  Remote(CatalogClient),
  Seeded(Vec<Product>),
}

impl Catalog {
  pub async fn list(&self) -> AppResult<Vec<Product>> {
    match self {
      Catalog::Remote(client) => Ok(client.list_products().await?),
      Catalog::Seeded(products) => Ok(products.clone()),
    }
  }

  /// Fetches a fresh projection, failing with `NotFound` for unknown ids.
  #[instrument(skip(self), fields(product_id = %id))]
  pub async fn fetch(&self, id: &ProductId) -> AppResult<Product> {
    let found = match self {
      Catalog::Remote(client) => client.get_product(id).await?,
      Catalog::Seeded(products) => products.iter().find(|p| &p.id == id).cloned(),
    };
    found.ok_or_else(|| AppError::NotFound(format!("Product {} does not exist", id)))
  }
}
