//! Same-origin proxy in front of the upstream fleet API.
//!
//! Serves `GET /api/transportation`: a successful upstream body is passed
//! through with cache and CORS headers, anything else becomes a 500 with an
//! [`ErrorBody`](fleet_api_types::ErrorBody).

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

use fleet_api_types::TRANSPORTATION_PATH;
use fleet_core::fetch::UpstreamClient;

pub use routes::create_router;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub struct ProxyServer {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl ProxyServer {
    /// Bind `addr` and start serving on the current runtime.
    ///
    /// Port 0 picks a free port; see [`ProxyServer::local_addr`].
    pub async fn bind(addr: SocketAddr, upstream: UpstreamClient) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let app = create_router(Arc::new(upstream));

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        info!(%local_addr, "proxy listening");
        Ok(Self {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Full URL of the transportation endpoint.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.local_addr, TRANSPORTATION_PATH)
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        (&mut self.task).await??;
        info!(local_addr = %self.local_addr, "proxy stopped");
        Ok(())
    }
}

impl Drop for ProxyServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
