//! Reachability of the recipe service, for the offline banner.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::utils::url::host_and_port;

pub const PROBE_INTERVAL: Duration = Duration::from_secs(10);
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

impl Connectivity {
    pub fn is_online(self) -> bool {
        self == Connectivity::Online
    }
}

/// One TCP connect attempt to `host:port`.
pub async fn probe(host: &str, port: u16, timeout: Duration) -> Connectivity {
    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_)) => Connectivity::Online,
        Ok(Err(err)) => {
            debug!(host, port, "Connectivity probe failed: {err}");
            Connectivity::Offline
        }
        Err(_) => {
            debug!(host, port, "Connectivity probe timed out");
            Connectivity::Offline
        }
    }
}

/// Probe the host behind `base_url` every `interval` until `cancel_token`
/// fires. The receiver starts out `Online`.
pub fn spawn_monitor(
    base_url: &str,
    interval: Duration,
    cancel_token: CancellationToken,
) -> watch::Receiver<Connectivity> {
    let (tx, rx) = watch::channel(Connectivity::Online);
    let Some((host, port)) = host_and_port(base_url) else {
        debug!(base_url, "No host to probe; connectivity monitor disabled");
        return rx;
    };

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = cancel_token.cancelled() => break,
            }

            let state = probe(&host, port, PROBE_TIMEOUT.min(interval)).await;
            let changed = tx.send_if_modified(|current| {
                if *current == state {
                    false
                } else {
                    *current = state;
                    true
                }
            });
            if changed {
                info!(host = %host, port, ?state, "Connectivity changed");
            }
            if tx.is_closed() {
                break;
            }
        }
    });

    rx
}
