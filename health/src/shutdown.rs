//! Shutdown signalling for in-flight verification runs.
//!
//! A run started with `HealthVerifier::verify_until_shutdown` holds a
//! [`ShutdownSignal`]; once the controller fires, the run returns
//! `HealthError::Cancelled` and every outstanding probe is aborted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::signal;
use tokio::sync::broadcast::{self, error::RecvError};

/// Fires a one-shot shutdown to any number of runs.
///
/// The fired state is sticky: a signal taken after shutdown resolves
/// immediately instead of waiting for a message it already missed.
pub struct ShutdownController {
    tx: broadcast::Sender<()>,
    fired: Arc<AtomicBool>,
}

/// One run's view of the controller.
pub struct ShutdownSignal {
    rx: broadcast::Receiver<()>,
    fired: Arc<AtomicBool>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
            fired: Arc::clone(&self.fired),
        }
    }

    pub fn shutdown(&self) {
        if !self.fired.swap(true, Ordering::SeqCst) {
            // No receivers is fine: nothing is running.
            let _ = self.tx.send(());
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Fire on SIGINT, or SIGTERM on unix.
    pub async fn shutdown_on_signal(&self) {
        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "SIGTERM handler unavailable");
                    std::future::pending::<()>().await;
                }
            }
        };
        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        let received = tokio::select! {
            _ = signal::ctrl_c() => "SIGINT",
            _ = terminate => "SIGTERM",
        };
        tracing::info!(signal = received, "abandoning health checks");
        self.shutdown();
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Resolves once shutdown fires. Never resolves if the controller is
    /// dropped without firing.
    pub async fn fired(&mut self) {
        if self.is_fired() {
            return;
        }
        match self.rx.recv().await {
            Ok(()) | Err(RecvError::Lagged(_)) => {}
            Err(RecvError::Closed) if self.is_fired() => {}
            Err(RecvError::Closed) => std::future::pending().await,
        }
    }
}
