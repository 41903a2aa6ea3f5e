// storefront/src/services/mod.rs

//! Collaborators the commands talk to: the product catalog and, when running
//! offline, in-process stand-ins for the backend.

pub mod catalog;
pub mod offline;

pub use catalog::Catalog;
