//! Server entry point.

use crate::config::ServeConfig;
use crate::routes::router;
use crate::state::AppState;
use anyhow::Context;
use dirshare_core::Root;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing::warn;

/// Serves `config.root` until Ctrl-C or SIGTERM.
///
/// In-flight requests are allowed to finish before returning.
///
/// # Errors
///
/// Fails if the configuration is invalid, the root cannot be opened, or the
/// address cannot be bound.
pub async fn serve(config: ServeConfig) -> anyhow::Result<()> {
    config.validate()?;

    let root = Root::new(&config.root)
        .with_context(|| format!("cannot serve {}", config.root.display()))?;
    let addr = config.socket_addr();

    let state = AppState::new(root, config.browse.clone())
        .with_max_upload_size(config.max_upload_size);
    let root_display = state.root.as_path().display().to_string();

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr()?;

    info!(
        root = %root_display,
        addr = %local,
        show_hidden = config.browse.show_hidden,
        max_upload_size = config.max_upload_size,
        "dirshare listening on http://{local}/"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("received termination signal, shutting down");
}
