// storefront/src/cli.rs

use clap::{Parser, Subcommand};
use stockcart::CartItemId;

/// Shopping cart client for a storefront backend.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
pub struct Cli {
  /// Act as this user instead of STORE_USER_ID.
  #[arg(long, global = true)]
  pub user: Option<String>,

  /// Use a seeded in-process catalog and inventory instead of the backend.
  #[arg(long, global = true)]
  pub offline: bool,

  /// Print results as JSON.
  #[arg(long, global = true)]
  pub json: bool,

  /// Emit logs as JSON lines.
  #[arg(long, global = true)]
  pub log_json: bool,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// List the catalog.
  Products,
  /// Show the cart with its totals.
  Show,
  /// Add a product to the cart.
  Add {
    product_id: String,
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    quantity: i64,
  },
  /// Set a line's quantity; 0 or less removes it.
  Set {
    item_id: CartItemId,
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
  },
  /// Remove a line and return its units to stock.
  Remove { item_id: CartItemId },
  /// Empty the cart and return all units to stock.
  Clear,
  /// Hand the cart to an order; the stock stays consumed.
  Checkout,
  /// Clear the cart and end the session.
  Logout,
  /// Check the backend once, or keep checking every SECS seconds
  /// (STORE_HEALTH_INTERVAL_SECS when SECS is omitted).
  Health {
    #[arg(long, value_name = "SECS", num_args = 0..=1)]
    watch: Option<Option<u64>>,
  },
}

impl Command {
  /// Commands that only read the catalog or the backend run without a user.
  pub fn needs_cart(&self) -> bool {
    !matches!(self, Command::Products | Command::Health { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parses_cart_commands() {
    let cli = Cli::try_parse_from(["storefront", "--offline", "add", "p1", "-q", "3"]).unwrap();
    assert!(cli.offline);
    match cli.command {
      Command::Add { ref product_id, quantity } => {
        assert_eq!(product_id, "p1");
        assert_eq!(quantity, 3);
      }
      ref other => panic!("Expected Add, got {:?}", other),
    }

    let id = CartItemId::new();
    let cli = Cli::try_parse_from(["storefront", "set", &id.to_string(), "0", "--user", "u2"]).unwrap();
    assert_eq!(cli.user.as_deref(), Some("u2"));
    assert!(matches!(cli.command, Command::Set { item_id, quantity: 0 } if item_id == id));
  }

  #[test]
  fn test_rejects_malformed_item_ids() {
    assert!(Cli::try_parse_from(["storefront", "remove", "not-a-uuid"]).is_err());
  }

  #[test]
  fn test_read_only_commands_need_no_cart() {
    let cli = Cli::try_parse_from(["storefront", "health", "--watch", "5"]).unwrap();
    assert!(!cli.command.needs_cart());
    assert!(matches!(cli.command, Command::Health { watch: Some(Some(5)) }));
    let cli = Cli::try_parse_from(["storefront", "health", "--watch"]).unwrap();
    assert!(matches!(cli.command, Command::Health { watch: Some(None) }));
    let cli = Cli::try_parse_from(["storefront", "health"]).unwrap();
    assert!(matches!(cli.command, Command::Health { watch: None }));
    let cli = Cli::try_parse_from(["storefront", "show"]).unwrap();
    assert!(cli.command.needs_cart());
  }
}
