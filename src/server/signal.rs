// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

#[cfg(unix)]
use crate::logger;

/// Signal handler state
pub struct SignalHandler {
    /// Shutdown signal (SIGTERM, SIGINT)
    pub shutdown: Arc<Notify>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
        }
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix only)
///
/// Spawns a background task that waits for SIGTERM or SIGINT and then
/// notifies the accept loop to begin graceful shutdown. If either
/// signal stream cannot be registered, the task logs the error and
/// degrades to `ctrl_c` so the server stays stoppable.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let sigterm = signal(SignalKind::terminate());
        let sigint = signal(SignalKind::interrupt());

        match (sigterm, sigint) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {
                        println!("\n[Signal] SIGTERM received, shutting down...");
                    }
                    _ = sigint.recv() => {
                        println!("\n[Signal] SIGINT received (Ctrl+C), shutting down...");
                    }
                }
            }
            (sigterm, sigint) => {
                if let Err(e) = &sigterm {
                    logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                }
                if let Err(e) = &sigint {
                    logger::log_error(&format!("Failed to register SIGINT handler: {e}"));
                }
                if let Err(e) = tokio::signal::ctrl_c().await {
                    logger::log_error(&format!("Failed to wait for Ctrl+C: {e}"));
                    return;
                }
                println!("\n[Signal] Ctrl+C received, shutting down...");
            }
        }

        // notify_one stores a permit, so the accept loop sees the
        // shutdown even if it is mid-accept when the signal lands
        handler.shutdown.notify_one();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            println!("\n[Signal] Ctrl+C received, shutting down...");
            handler.shutdown.notify_one();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_permit_wakes_a_later_waiter() {
        let handler = SignalHandler::new();
        handler.shutdown.notify_one();

        tokio::time::timeout(Duration::from_millis(100), handler.shutdown.notified())
            .await
            .expect("stored permit wakes a waiter that arrives afterwards");
    }
}
