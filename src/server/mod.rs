//! @ai:module:intent Axum HTTP surface and server lifecycle
//! @ai:module:layer presentation
//! @ai:module:public_api create_router, AnalysisServer, ServerHandle, shutdown_signal
//! @ai:module:depends_on service

pub mod routes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::analyzer::Analyzer;
use crate::config::ServerConfig;
use crate::service::AnalysisService;

/// @ai:intent Build the application router
/// @ai:effects pure
pub fn create_router<A: Analyzer>(service: AnalysisService<A>) -> Router {
    Router::new()
        .route("/api/analyze", post(routes::analyze::<A>))
        .route("/health", get(routes::health))
        // Submissions are not size-capped.
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// @ai:intent Server that has not been bound yet
pub struct AnalysisServer<A: Analyzer> {
    config: ServerConfig,
    service: AnalysisService<A>,
}

/// @ai:intent Running server; stop() drains in-flight requests
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl<A: Analyzer> AnalysisServer<A> {
    /// @ai:intent Create a server for the given listener settings
    /// @ai:effects pure
    pub fn new(config: ServerConfig, service: AnalysisService<A>) -> Self {
        Self { config, service }
    }

    /// @ai:intent Bind the listener and start serving in a background task
    /// @ai:effects network
    pub async fn start(self) -> anyhow::Result<ServerHandle> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        let local_addr = listener.local_addr()?;
        let app = create_router(self.service);

        let (shutdown, signal) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    // A dropped handle also shuts the server down.
                    let _ = signal.await;
                })
                .await
        });

        tracing::info!("Listening on http://{}", local_addr);

        Ok(ServerHandle {
            local_addr,
            shutdown,
            task,
        })
    }
}

impl ServerHandle {
    /// @ai:intent Address the listener is bound to
    /// @ai:effects pure
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// @ai:intent Stop accepting connections and wait for in-flight requests
    /// @ai:effects network
    pub async fn stop(self) -> anyhow::Result<()> {
        let _ = self.shutdown.send(());
        self.task.await??;
        tracing::info!("Server on {} stopped", self.local_addr);
        Ok(())
    }
}

/// @ai:intent Resolve on Ctrl-C or SIGTERM
/// @ai:effects io
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
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

    tracing::info!("Shutdown signal received");
}
