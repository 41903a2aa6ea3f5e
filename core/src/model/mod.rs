// stockcart/src/model/mod.rs

pub mod cart_item;
pub mod money;
pub mod product;
pub mod session;

pub use cart_item::{CartItem, CartItemId};
pub use money::Money;
pub use product::{Product, ProductId, ProductRef};
pub use session::{Session, UserIdentity};
