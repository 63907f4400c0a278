// Accept loop module
// Accepts connections until a shutdown signal arrives, then drains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;
use crate::logger;

/// How long shutdown waits for in-flight connections to finish
const DRAIN_WINDOW: Duration = Duration::from_secs(5);

/// Main accept loop.
///
/// Runs until the shutdown signal fires, then stops accepting, closes
/// the listener and waits a bounded window for active connections to
/// complete. Returning `Ok(())` lets the process exit with status 0.
pub async fn run_accept_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                logger::log_shutdown_started();
                break;
            }
        }
    }

    // Stop accepting new connections before draining
    drop(listener);
    drain_connections(&active_connections, DRAIN_WINDOW).await;
    logger::log_shutdown_complete();

    Ok(())
}

/// Wait for in-flight connections to finish, up to `drain_window`.
async fn drain_connections(active_connections: &AtomicUsize, drain_window: Duration) {
    let deadline = tokio::time::Instant::now() + drain_window;

    while active_connections.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Drain window elapsed with {} connection(s) still active",
                active_connections.load(Ordering::SeqCst)
            ));
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_reusable_listener;

    fn test_state() -> Arc<AppState> {
        let cfg = Config::load_from("/nonexistent/qr-viewer-config").expect("defaults load");
        Arc::new(AppState::new(&cfg))
    }

    #[tokio::test]
    async fn test_shutdown_signal_stops_accept_loop() {
        let addr = "127.0.0.1:0".parse().expect("loopback addr");
        let listener = create_reusable_listener(addr).expect("bind ephemeral port");
        let signals = Arc::new(SignalHandler::new());
        let active_connections = Arc::new(AtomicUsize::new(0));

        // The stored permit means the loop sees the shutdown on its
        // first select, even though nothing is waiting yet
        signals.shutdown.notify_one();

        let result = tokio::time::timeout(
            Duration::from_secs(2),
            run_accept_loop(listener, test_state(), active_connections, signals),
        )
        .await
        .expect("loop exits well inside the drain window");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_drain_returns_immediately_when_idle() {
        let active_connections = AtomicUsize::new(0);
        tokio::time::timeout(
            Duration::from_millis(100),
            drain_connections(&active_connections, Duration::from_secs(5)),
        )
        .await
        .expect("no active connections, nothing to wait for");
    }

    #[tokio::test]
    async fn test_drain_gives_up_at_deadline() {
        // A connection counter pinned above zero never drains; the
        // loop must still give up once the window elapses
        let active_connections = AtomicUsize::new(1);
        let start = tokio::time::Instant::now();

        tokio::time::timeout(
            Duration::from_secs(1),
            drain_connections(&active_connections, Duration::from_millis(100)),
        )
        .await
        .expect("drain is bounded by its window");

        assert!(start.elapsed() >= Duration::from_millis(100));
        assert_eq!(active_connections.load(Ordering::SeqCst), 1);
    }
}
