//! Graceful shutdown.
//!
//! SIGINT (Ctrl-C) and, on Unix, SIGTERM latch the [`Shutdown`] flag. Every
//! [`ShutdownSignal`] resolves once the flag is set, including signals taken
//! after it was set.

use std::io;

use tokio::sync::watch;

/// Latching shutdown flag shared by the server and the signal listener.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// A future-like handle that resolves once shutdown is triggered.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait for the first termination signal, then trigger shutdown.
    pub async fn trigger_on_termination(&self) -> io::Result<()> {
        let signal = termination_signal().await?;
        tracing::info!(signal, "Termination signal received");
        self.trigger();
        Ok(())
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Handed to [`crate::BrokerServer::run`].
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolves once shutdown is triggered, or when the [`Shutdown`] is dropped.
    pub async fn triggered(mut self) {
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}

#[cfg(unix)]
async fn termination_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|_| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn termination_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|_| "ctrl-c")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_trigger_resolves_every_signal() {
        let shutdown = Shutdown::new();
        let first = tokio::spawn(shutdown.signal().triggered());
        let second = tokio::spawn(shutdown.signal().triggered());

        shutdown.trigger();
        assert!(shutdown.is_triggered());
        first.await.unwrap();
        second.await.unwrap();
    }

    #[tokio::test]
    async fn test_signal_taken_after_trigger_resolves() {
        let shutdown = Shutdown::default();
        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), shutdown.signal().triggered())
            .await
            .expect("late signal should resolve immediately");
    }

    #[tokio::test(start_paused = true)]
    async fn test_signal_pending_until_triggered() {
        let shutdown = Shutdown::new();
        let pending =
            tokio::time::timeout(Duration::from_secs(5), shutdown.signal().triggered()).await;
        assert!(pending.is_err());
        assert!(!shutdown.is_triggered());
    }
}
