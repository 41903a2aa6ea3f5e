// stockcart/src/cart/mod.rs

pub mod checkout;
pub mod store;

pub use checkout::CheckoutSnapshot;
pub use store::CartStore;
