// stockcart/src/model/session.rs

//! Who a cart belongs to.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
  pub user_id: String,
}

impl UserIdentity {
  pub fn new(user_id: impl Into<String>) -> Self {
    Self { user_id: user_id.into() }
  }

  /// Storage key of this user's cart record.
  pub fn cart_key(&self) -> String {
    format!("cart_{}", self.user_id)
  }
}

/// The interactive session a cart is opened for. Anonymous sessions have no cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
  Anonymous,
  Authenticated(UserIdentity),
}

impl Session {
  pub fn authenticated(user_id: impl Into<String>) -> Self {
    Session::Authenticated(UserIdentity::new(user_id))
  }

  pub fn user(&self) -> Option<&UserIdentity> {
    match self {
      Session::Anonymous => None,
      Session::Authenticated(user) => Some(user),
    }
  }
}
