//! ServerBuilder for fluent API to build the HTTP server

use super::host::{DealershipHost, HostStores};
use super::router::build_routes;
use crate::config::DealershipConfig;
use crate::core::DealershipResult;
use crate::lifecycle::{RandomSource, ThreadRandom};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for the dealership HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new(DealershipConfig::default())
///     .with_custom_routes(admin_routes)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: DealershipConfig,
    stores: Option<HostStores>,
    random: Arc<dyn RandomSource>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new(config: DealershipConfig) -> Self {
        Self {
            config,
            stores: None,
            random: Arc::new(ThreadRandom),
            custom_routes: Vec::new(),
        }
    }

    /// Use explicit storage ports instead of in-memory ones
    pub fn with_stores(mut self, stores: HostStores) -> Self {
        self.stores = Some(stores);
        self
    }

    /// Replace the random source used for arrival estimates
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Merge additional routes into the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Wire the host without exposing it
    pub fn build_host(&mut self) -> DealershipResult<DealershipHost> {
        let stores = self.stores.take().unwrap_or_else(HostStores::in_memory);
        DealershipHost::from_parts(self.config.clone(), stores, self.random.clone())
    }

    /// Build the REST router
    pub fn build(mut self) -> Result<Router> {
        let host = self.build_host()?;
        Ok(self.into_router(host))
    }

    /// Expose an already wired host
    ///
    /// Useful when the caller needs the host (to seed the catalog or read
    /// events) as well as the router.
    pub fn into_router(self, host: DealershipHost) -> Router {
        let mut app = build_routes(host);
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }
        app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.bind` from the configuration and stops on SIGTERM or
    /// Ctrl+C.
    pub async fn serve(mut self) -> Result<()> {
        let host = self.build_host()?;
        self.serve_host(host).await
    }

    /// Serve an already wired host with graceful shutdown
    pub async fn serve_host(self, host: DealershipHost) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.into_router(host);
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new(DealershipConfig::default())
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
