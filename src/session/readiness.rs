use std::sync::Arc;
use tokio::sync::watch;

/// Generation-scoped readiness signal
///
/// Holds the latest generation that finished connecting. A fetch governed by
/// generation `g` may proceed only while `g` is the ready one.
#[derive(Debug, Clone)]
pub struct Readiness {
    tx: Arc<watch::Sender<u64>>,
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

impl Readiness {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Latest ready generation, 0 before any session connected
    pub fn latest(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn is_ready(&self, generation: u64) -> bool {
        generation != 0 && self.latest() == generation
    }

    /// Mark `generation` ready; older generations never move the value back
    pub(crate) fn mark_ready(&self, generation: u64) {
        self.tx.send_if_modified(|latest| {
            if generation > *latest {
                *latest = generation;
                true
            } else {
                false
            }
        });
    }

    /// Wait until `generation` or a newer one is ready
    ///
    /// Returns `false` when a newer generation won instead.
    pub async fn wait_ready(&self, generation: u64) -> bool {
        let mut rx = self.tx.subscribe();
        match rx.wait_for(|latest| *latest >= generation).await {
            Ok(latest) => *latest == generation,
            Err(_) => false,
        }
    }
}
