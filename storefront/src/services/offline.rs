// storefront/src/services/offline.rs
use async_trait::async_trait;
use stockcart::{ApiError, HealthProbe, InMemoryInventory, Money, Product};
use tracing::info;

/// The catalog offered by `--offline` runs.
pub fn seeded_catalog() -> Vec<Product> {
  vec![
    Product::new("p1", "Stovetop Kettle", Money::from_cents(2450), 5),
    Product::new("p2", "Stoneware Mug", Money::from_cents(600), 24),
    Product::new("p3", "Loose Leaf Sampler", Money::from_cents(1899), 8),
    Product::new("p4", "Cast Iron Teapot", Money::from_cents(5400), 2),
    Product::new("p5", "Bamboo Tea Tray", Money::from_cents(3125), 0),
  ]
}

/// An inventory stocked with the seeded catalog's counts.
pub fn seeded_inventory(catalog: &[Product]) -> InMemoryInventory {
  let inventory = InMemoryInventory::with_stock(catalog.iter().map(|p| (p.id.clone(), p.stock)));
  info!(products = catalog.len(), "Offline inventory seeded");
  inventory
}

/// Health probe for offline runs; the in-process backend is always up.
#[derive(Debug, Default)]
pub struct OfflineProbe;

#[async_trait]
impl HealthProbe for OfflineProbe {
  async fn check(&self) -> Result<(), ApiError> {
    Ok(())
  }
}
