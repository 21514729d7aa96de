// Server module entry point
// Listener construction, connection handling, and the accept loop

pub mod connection;
pub mod listener;
pub mod signal;

// Re-export commonly used items
pub use listener::create_listener;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;
use connection::accept_connection;
use signal::SignalHandler;

/// Accept loop. Runs until a shutdown signal is received.
///
/// Accepted connections are served in spawned tasks; shutdown stops the loop
/// and lets in-flight connections finish naturally.
pub async fn run(
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
                logger::log_shutdown();
                break;
            }
        }
    }

    Ok(())
}
