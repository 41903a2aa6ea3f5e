// stockcart/src/http/mod.rs

pub mod catalog;
pub mod endpoint;
pub mod response;
pub mod stock;

pub use catalog::CatalogClient;
pub use endpoint::{ApiEndpoint, DEFAULT_TIMEOUT};
pub use response::{ItemResponse, ListResponse};
pub use stock::HttpStockClient;
