use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

/// Anything a view can re-read on a timer.
#[async_trait]
pub trait PollSource: Send + Sync + 'static {
    type Output: Clone + Send + Sync + 'static;

    async fn fetch(&self) -> Result<Self::Output, PollError>;
}

/// A view's local copy of the polled state.
#[derive(Debug, Clone)]
pub struct PollSnapshot<T> {
    pub data: Option<T>,
    // Last failure; cleared by the next successful fetch
    pub error: Option<PollError>,
    pub is_loading: bool,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl<T> Default for PollSnapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
            fetched_at: None,
        }
    }
}

/// Fixed-interval re-fetch of a [`PollSource`]. Fetches once on start, then
/// on every tick; a failed fetch never stops the timer. Polling can be paused
/// and resumed; dropping the poller stops it for good.
pub struct Poller<T> {
    snapshot: watch::Receiver<PollSnapshot<T>>,
    refetch_tx: mpsc::Sender<oneshot::Sender<()>>,
    enabled: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl<T> Poller<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn spawn<S>(source: Arc<S>, every: Duration) -> Self
    where
        S: PollSource<Output = T>,
    {
        let (snapshot_tx, snapshot) = watch::channel(PollSnapshot::default());
        let (refetch_tx, mut refetch_rx) = mpsc::channel::<oneshot::Sender<()>>(8);
        let (enabled, mut enabled_rx) = watch::channel(true);

        let handle = tokio::spawn(async move {
            loop {
                // Paused: only explicit refetches run
                if !*enabled_rx.borrow_and_update() {
                    tokio::select! {
                        changed = enabled_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                        }
                        Some(done) = refetch_rx.recv() => {
                            fetch_into(source.as_ref(), &snapshot_tx).await;
                            let _ = done.send(());
                        }
                    }
                    continue;
                }

                // A fresh interval fires immediately, so resuming fetches at once
                let mut ticker = interval(every);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            fetch_into(source.as_ref(), &snapshot_tx).await;
                        }
                        Some(done) = refetch_rx.recv() => {
                            fetch_into(source.as_ref(), &snapshot_tx).await;
                            let _ = done.send(());
                        }
                        changed = enabled_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                            if !*enabled_rx.borrow_and_update() {
                                debug!("Polling paused");
                                break;
                            }
                        }
                    }
                }
            }
        });

        Self {
            snapshot,
            refetch_tx,
            enabled,
            handle,
        }
    }

    pub fn snapshot(&self) -> PollSnapshot<T> {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot<T>> {
        self.snapshot.clone()
    }

    // Fetch now, outside the schedule; resolves once the fetch has landed
    #[allow(dead_code)]
    pub async fn refetch(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.refetch_tx.send(done_tx).await.is_ok() {
            let _ = done_rx.await;
        }
    }

    /// Stop or restart the timer without tearing the poller down. Enabling a
    /// paused poller fetches immediately and restarts the interval.
    #[allow(dead_code)]
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.send_replace(enabled);
    }

    #[allow(dead_code)]
    pub fn is_enabled(&self) -> bool {
        *self.enabled.borrow()
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn fetch_into<S: PollSource>(
    source: &S,
    snapshot: &watch::Sender<PollSnapshot<S::Output>>,
) {
    snapshot.send_modify(|s| s.is_loading = true);

    match source.fetch().await {
        Ok(data) => {
            debug!("Poll succeeded");
            snapshot.send_modify(|s| {
                s.data = Some(data);
                s.error = None;
                s.is_loading = false;
                s.fetched_at = Some(Utc::now());
            });
        }
        Err(e) => {
            warn!("Poll attempt failed: {}", e);
            snapshot.send_modify(|s| {
                s.error = Some(e);
                s.is_loading = false;
            });
        }
    }
}
