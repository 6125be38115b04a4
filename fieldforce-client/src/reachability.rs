//! Server reachability monitor.
//!
//! A background task probes the service root on a fixed interval and
//! publishes the tri-state status over a watch channel. No backoff, no
//! jitter: the interval repeats unconditionally until shutdown.

use crate::api::ApiClient;
use crate::config::ClientConfig;
use fieldforce_core::ServerStatus;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct ReachabilityMonitor {
    status: watch::Receiver<ServerStatus>,
    handle: JoinHandle<()>,
}

impl ReachabilityMonitor {
    /// Start probing. The receiver is seeded with `Checking`; the first
    /// probe fires immediately, then once per interval.
    pub fn spawn(client: ApiClient, config: &ClientConfig) -> Self {
        let interval = Duration::from_millis(config.probe_interval_ms);
        let (tx, rx) = watch::channel(ServerStatus::Checking);

        let handle = tokio::spawn(async move {
            loop {
                let outcome = client.probe_health().await;
                let next = ServerStatus::after_probe(outcome);
                if *tx.borrow() != next {
                    debug!(?next, "server status changed");
                }
                if tx.send(next).is_err() {
                    break;
                }
                tokio::time::sleep(interval).await;
            }
        });

        Self { status: rx, handle }
    }

    /// Current status without waiting.
    pub fn status(&self) -> ServerStatus {
        *self.status.borrow()
    }

    /// A receiver for callers that want to await changes.
    pub fn subscribe(&self) -> watch::Receiver<ServerStatus> {
        self.status.clone()
    }

    /// Stop the probe loop. An in-flight probe is abandoned.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for ReachabilityMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
