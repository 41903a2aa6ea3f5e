// stockcart/src/health/monitor.rs

//! Periodic backend health checks with an explicit lifecycle.
//!
//! The monitor owns its timer task: `start` spawns it, `stop` signals it and
//! waits for it to finish, and dropping a running monitor aborts it. Nothing
//! is process-global, so every test gets its own monitor.

use super::{HealthProbe, HealthStatus};
use crate::shared::SharedState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{event, instrument, Instrument, Level};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

struct Worker {
  handle: JoinHandle<()>,
  shutdown: oneshot::Sender<()>,
}

pub struct HealthMonitor {
  probe: Arc<dyn HealthProbe>,
  interval: Duration,
  status: SharedState<HealthStatus>,
  worker: Option<Worker>,
}

impl HealthMonitor {
  pub fn new(probe: Arc<dyn HealthProbe>, interval: Duration) -> Self {
    Self {
      probe,
      interval: interval.max(MIN_INTERVAL),
      status: SharedState::default(),
      worker: None,
    }
  }

  pub fn interval(&self) -> Duration {
    self.interval
  }

  pub fn is_running(&self) -> bool {
    self.worker.as_ref().is_some_and(|w| !w.handle.is_finished())
  }

  /// Spawns the periodic check task onto the current tokio runtime. The first
  /// check runs immediately. Returns `false` if the monitor was already running.
  pub fn start(&mut self) -> bool {
    if self.is_running() {
      event!(Level::DEBUG, "Health monitor already running.");
      return false;
    }

    let (shutdown, mut shutdown_rx) = oneshot::channel::<()>();
    let probe = Arc::clone(&self.probe);
    let status = self.status.clone();
    let interval = self.interval;

    let span = tracing::info_span!("health_monitor", interval_ms = interval.as_millis() as u64);
    let handle = tokio::spawn(
      async move {
        event!(Level::INFO, "Health monitor started.");
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
          tokio::select! {
            _ = &mut shutdown_rx => break,
            _ = ticker.tick() => {
              run_check(probe.as_ref(), &status).await;
            }
          }
        }
        event!(Level::INFO, "Health monitor stopped.");
      }
      .instrument(span),
    );

    self.worker = Some(Worker { handle, shutdown });
    true
  }

  /// Signals the task and waits for it to exit. Returns `false` if it was not running.
  pub async fn stop(&mut self) -> bool {
    let Some(worker) = self.worker.take() else {
      return false;
    };
    // The receiver is gone only if the task already ended.
    let _ = worker.shutdown.send(());
    if let Err(e) = worker.handle.await {
      if !e.is_cancelled() {
        event!(Level::ERROR, error = %e, "Health monitor task failed.");
      }
    }
    true
  }

  /// Runs one check right away and records it, whether or not the timer runs.
  #[instrument(name = "HealthMonitor::check_now", skip(self))]
  pub async fn check_now(&self) -> HealthStatus {
    run_check(self.probe.as_ref(), &self.status).await
  }

  pub fn status(&self) -> HealthStatus {
    self.status.snapshot()
  }
}

impl Drop for HealthMonitor {
  fn drop(&mut self) {
    if let Some(worker) = self.worker.take() {
      worker.handle.abort();
    }
  }
}

async fn run_check(probe: &dyn HealthProbe, status: &SharedState<HealthStatus>) -> HealthStatus {
  let outcome = probe.check().await;
  status.update(|s| {
    s.record(outcome);
    s.clone()
  })
}
