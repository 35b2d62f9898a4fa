//! In-process stop handle for the feed server.
//!
//! `main` holds one for the life of the process; integration tests hold one
//! per spawned server. [`crate::HttpServer::run`] treats both a trigger and a
//! dropped handle as a stop request, then drains in-flight feed requests.

use tokio::sync::broadcast;

/// Stops every [`crate::HttpServer`] whose `run` was given one of its receivers.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to pass to [`crate::HttpServer::run`].
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Stop the servers. Safe to call when none are running.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_subscribers() {
        let shutdown = Shutdown::new();
        let mut a = shutdown.subscribe();
        let mut b = shutdown.subscribe();

        shutdown.trigger();

        assert!(a.recv().await.is_ok());
        assert!(b.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_dropping_handle_releases_receivers() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        drop(shutdown);

        assert!(rx.recv().await.is_err());
    }

    #[test]
    fn test_trigger_without_subscribers() {
        Shutdown::default().trigger();
    }
}
