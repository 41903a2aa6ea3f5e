// stockcart/examples/health_monitor.rs

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use stockcart::{ApiError, HealthMonitor, HealthProbe};
use tracing::info;

// A backend that is down for its first two checks.
#[derive(Default)]
struct FlakyBackend {
  calls: AtomicUsize,
}

#[async_trait]
impl HealthProbe for FlakyBackend {
  async fn check(&self) -> Result<(), ApiError> {
    let call = self.calls.fetch_add(1, Ordering::SeqCst);
    if call < 2 {
      return Err(ApiError::Status {
        status: 503,
        body: "warming up".to_string(),
      });
    }
    Ok(())
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Health Monitor Example ---");

  let mut monitor = HealthMonitor::new(Arc::new(FlakyBackend::default()), Duration::from_millis(200));
  info!("Before start: {:?}", monitor.status().state);

  monitor.start();
  tokio::time::sleep(Duration::from_millis(700)).await;
  let status = monitor.status();
  info!(
    "After a few ticks: {:?} (failures in a row: {})",
    status.state, status.consecutive_failures
  );

  monitor.stop().await;
  info!("Stopped; running = {}", monitor.is_running());

  // One-off check, no timer involved.
  let status = monitor.check_now().await;
  info!("Manual check: {:?}", status.state);
}
