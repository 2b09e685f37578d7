//! Web server for CloudStore.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::{ServerConfig, StorageConfig};
use crate::store::SharedStore;

use super::handlers::AppState;
use super::router::{create_health_router, create_router, create_swagger_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(
        config: &ServerConfig,
        storage: &StorageConfig,
        store: SharedStore,
        current_user_id: i64,
    ) -> Self {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .expect("Invalid web server address");

        let max_upload_size = storage.max_upload_size_mb * 1024 * 1024;
        let app_state = AppState::new(store, current_user_id, max_upload_size);

        Self {
            addr,
            app_state: Arc::new(app_state),
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = create_router(self.app_state)
            .merge(create_health_router())
            .merge(create_swagger_router());

        // Add gzip compression layer
        let router = router.layer(CompressionLayer::new());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let router = create_router(self.app_state)
            .merge(create_health_router())
            .merge(create_swagger_router());

        // Add gzip compression layer
        let router = router.layer(CompressionLayer::new());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
