mod domain;
mod clients;

mod app_system;
mod http;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod user_actor;

use std::future::Future;

use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::app_system::{setup_tracing, Config, UserSystem};
use crate::http::{AppInfo, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Setup tracing once for the entire application
    setup_tracing();

    info!(app = %config.app_name, version = %config.app_version, "Starting user API");

    let system = UserSystem::new(config.channel_capacity)?;

    let state = AppState::new(
        system.user_client.clone(),
        AppInfo {
            name: config.app_name.clone(),
            version: config.app_version.clone(),
        },
    );
    let app = http::router(state);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    serve(listener, app, system, shutdown_signal()).await?;

    info!("Application stopped");
    Ok(())
}

/// Serves until `shutdown` resolves, then drains the user store.
///
/// A server error is returned only after the store has been shut down.
async fn serve(
    listener: TcpListener,
    app: Router,
    system: UserSystem,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;
    if let Err(e) = &served {
        error!(error = %e, "Server error");
    }

    // The router and its clients are gone once serve returns.
    system.shutdown().await.map_err(anyhow::Error::msg)?;
    served?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_stops_store_after_shutdown_signal() {
        let system = UserSystem::new(4).unwrap();
        let app = http::router(AppState::new(
            system.user_client.clone(),
            AppInfo { name: "test".to_string(), version: "0".to_string() },
        ));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
        stop.send(()).unwrap();

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            serve(listener, app, system, async {
                let _ = stopped.await;
            }),
        )
        .await
        .expect("serve should return once the signal fires");

        assert!(result.is_ok());
    }
}
