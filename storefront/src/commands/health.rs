// storefront/src/commands/health.rs
use super::print_json;
use crate::errors::{AppError, Result as AppResult};
use crate::state::AppState;
use std::time::Duration;
use stockcart::{HealthMonitor, HealthState, HealthStatus};
use tracing::info;

fn print_status(status: &HealthStatus, json: bool) -> AppResult<()> {
  if json {
    return print_json(status);
  }
  let checked = status
    .last_checked
    .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
    .unwrap_or_else(|| "never".to_string());
  match (&status.state, &status.last_error) {
    (HealthState::Down, Some(error)) => println!(
      "[{}] backend DOWN ({} failure(s) in a row): {}",
      checked, status.consecutive_failures, error
    ),
    (state, _) => println!("[{}] backend {:?}", checked, state),
  }
  Ok(())
}

/// One check, or a watch loop that prints every change until Ctrl-C.
/// `watch` is `Some(None)` for `--watch` without a value, which uses the
/// configured interval.
pub async fn health(state: &AppState, watch: Option<Option<u64>>, json: bool) -> AppResult<()> {
  let Some(secs) = watch else {
    let status = state.health_monitor().check_now().await;
    print_status(&status, json)?;
    if !status.is_up() {
      return Err(AppError::Unhealthy(
        status.last_error.unwrap_or_else(|| "no successful check".to_string()),
      ));
    }
    return Ok(());
  };

  let mut monitor = match secs {
    Some(secs) => HealthMonitor::new(state.probe.clone(), Duration::from_secs(secs.max(1))),
    None => state.health_monitor(),
  };
  monitor.start();
  info!(interval_secs = monitor.interval().as_secs(), "Watching backend health; Ctrl-C to stop.");

  let mut last_printed: Option<HealthStatus> = None;
  let mut poll = tokio::time::interval(Duration::from_millis(250));
  let ctrl_c = tokio::signal::ctrl_c();
  tokio::pin!(ctrl_c);
  loop {
    tokio::select! {
      _ = &mut ctrl_c => break,
      _ = poll.tick() => {
        let status = monitor.status();
        let changed = last_printed
          .as_ref()
          .map_or(true, |last| last.last_checked != status.last_checked);
        if changed && status.last_checked.is_some() {
          print_status(&status, json)?;
          last_printed = Some(status);
        }
      }
    }
  }

  monitor.stop().await;
  Ok(())
}
