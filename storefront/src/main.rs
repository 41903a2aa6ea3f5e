// storefront/src/main.rs

// Declare modules for the application
mod cli;
mod commands;
mod config;
mod errors;
mod services;
mod state;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::errors::{AppError, Result as AppResult}; // Use the app's Result alias
use crate::state::AppState;

use clap::Parser;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

fn init_tracing(json: bool) {
  // Logs go to stderr so command output on stdout stays clean.
  let builder = tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .with_writer(std::io::stderr);
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

async fn run(cli: Cli) -> AppResult<()> {
  let app_config = AppConfig::from_env()?;

  if cli.command.needs_cart() && cli.user.is_none() && app_config.user_id.is_none() {
    return Err(AppError::Auth(
      "this command needs a user; set STORE_USER_ID or pass --user".to_string(),
    ));
  }

  let app_state = AppState::build(app_config, cli.user, cli.offline)?;
  commands::run(&app_state, cli.command, cli.json).await
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.log_json);
  tracing::debug!(command = ?cli.command, offline = cli.offline, "Starting storefront.");

  match run(cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!(error = %e, "Command failed.");
      eprintln!("error: {}", e);
      ExitCode::from(e.exit_code())
    }
  }
}
