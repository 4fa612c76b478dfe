//! Process-level server lifecycle.

use std::future::Future;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{build_router, AppState};

/// Bind the configured address and serve until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the address is invalid, cannot be bound, or the
/// server stops abnormally.
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind {
            addr: addr.to_string(),
            source,
        })?;

    run(listener, AppState::init(config), config.shutdown_grace()).await
}

/// Serve `state` on an already bound listener until SIGTERM or SIGINT.
///
/// # Errors
///
/// Returns an error if the server stops abnormally.
pub async fn run(listener: TcpListener, state: AppState, grace: Duration) -> Result<()> {
    run_until(listener, state, grace, wait_for_shutdown_signal()).await
}

/// Serve `state` until `shutdown` resolves.
///
/// After `shutdown` resolves the listener keeps accepting for `grace`, which
/// gives a load balancer time to stop routing here. Then no new connections
/// are accepted and in-flight requests drain before this returns.
///
/// # Errors
///
/// Returns an error if the server stops abnormally.
pub async fn run_until<F>(
    listener: TcpListener,
    state: AppState,
    grace: Duration,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener.local_addr()?;
    info!(addr = %local, "aerodesk listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move {
            shutdown.await;
            if !grace.is_zero() {
                info!(
                    grace_ms = u64::try_from(grace.as_millis()).unwrap_or(u64::MAX),
                    "Shutdown requested, delaying shutdown"
                );
                tokio::time::sleep(grace).await;
            }
            info!("Draining connections");
        })
        .await
        .map_err(|e| Error::Serve(e.to_string()))?;

    info!("aerodesk stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
                return;
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Unix signal handlers unavailable, falling back to ctrl-c");
            }
        }
    }
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
