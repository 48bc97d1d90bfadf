use anyhow::{anyhow, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{error, info, warn};

#[cfg(unix)]
use signal::unix::{signal, SignalKind};

/// Signal types that can trigger shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGTERM - container orchestrator stop
    Terminate,
    /// SIGINT - Ctrl+C
    Interrupt,
    /// A worker pool or the gateway failed
    Internal,
}

impl std::fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Waits for the process to be asked to stop, either by the OS or by one of its own tasks
pub struct SignalHandler {
    shutdown_signal: Option<ShutdownSignal>,
    internal_shutdown_notify: Arc<Notify>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self { shutdown_signal: None, internal_shutdown_notify: Arc::new(Notify::new()) }
    }

    /// Handle for tasks to request shutdown. A request made before anyone waits is not lost.
    pub fn get_shutdown_trigger(&self) -> Arc<Notify> {
        self.internal_shutdown_notify.clone()
    }

    /// Wait for any shutdown signal and return which one was received
    pub async fn wait_for_shutdown(&mut self) -> std::io::Result<ShutdownSignal> {
        let signal = self.wait_for_signal().await?;
        self.shutdown_signal = Some(signal);
        info!("Received shutdown signal: {}", signal);
        Ok(signal)
    }

    /// Get the signal that triggered shutdown (if any)
    pub fn shutdown_signal(&self) -> Option<ShutdownSignal> {
        self.shutdown_signal
    }

    #[cfg(unix)]
    async fn wait_for_signal(&self) -> std::io::Result<ShutdownSignal> {
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        info!("Signal handler initialized, listening for SIGTERM, SIGINT and internal shutdown requests");

        Ok(tokio::select! {
            _ = sigterm.recv() => ShutdownSignal::Terminate,
            _ = sigint.recv() => ShutdownSignal::Interrupt,
            _ = self.internal_shutdown_notify.notified() => {
                warn!("Internal shutdown requested");
                ShutdownSignal::Internal
            }
        })
    }

    #[cfg(not(unix))]
    async fn wait_for_signal(&self) -> std::io::Result<ShutdownSignal> {
        info!("Signal handler initialized, listening for Ctrl+C and internal shutdown requests");

        tokio::select! {
            result = signal::ctrl_c() => result.map(|_| ShutdownSignal::Interrupt),
            _ = self.internal_shutdown_notify.notified() => {
                warn!("Internal shutdown requested");
                Ok(ShutdownSignal::Internal)
            }
        }
    }

    /// Run `shutdown_fn`, giving up after `timeout`
    pub async fn handle_graceful_shutdown<F, Fut>(&self, shutdown_fn: F, timeout: Duration) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<()>>,
    {
        let signal = self.shutdown_signal.unwrap_or(ShutdownSignal::Interrupt);
        info!("Starting graceful shutdown (triggered by: {}, timeout: {:?})", signal, timeout);

        match tokio::time::timeout(timeout, shutdown_fn()).await {
            Ok(Ok(())) => {
                info!("Graceful shutdown completed");
                Ok(())
            }
            Ok(Err(e)) => {
                error!("Graceful shutdown failed: {}", e);
                Err(e)
            }
            Err(_) => {
                error!("Graceful shutdown timed out after {:?}", timeout);
                Err(anyhow!("Shutdown timeout exceeded"))
            }
        }
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}
