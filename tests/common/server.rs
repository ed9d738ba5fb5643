//! Test server management.
//!
//! Serves the application router on `127.0.0.1:0` inside the test's own
//! runtime and shuts it down when dropped.

use chores_api::config::ApiKey;
use chores_api::db::ChoreStore;
use chores_api::http::{AppState, run_http_server};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Key configured on servers started with [`TestServer::spawn`].
pub const TEST_KEY: &str = "test-key-2025";

/// A running test server.
pub struct TestServer {
    addr: SocketAddr,
    client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawn a server over `store` that expects [`TEST_KEY`].
    pub async fn spawn(store: Arc<dyn ChoreStore>) -> anyhow::Result<Self> {
        Self::spawn_with_key(store, Some(TEST_KEY)).await
    }

    /// Spawn a server with an explicit (possibly absent) key.
    pub async fn spawn_with_key(
        store: Arc<dyn ChoreStore>,
        api_key: Option<&str>,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let state = AppState::new(store, api_key.map(ApiKey::new));
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            if let Err(e) = run_http_server(listener, state, shutdown).await {
                eprintln!("test server error: {e}");
            }
        });

        Ok(Self {
            addr,
            client: reqwest::Client::new(),
            shutdown: Some(tx),
        })
    }

    /// Full URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// GET `path`, sending `X-API-Key` only when `key` is given.
    pub async fn get(&self, path: &str, key: Option<&str>) -> anyhow::Result<reqwest::Response> {
        let mut request = self.client.get(self.url(path));
        if let Some(key) = key {
            request = request.header("X-API-Key", key);
        }
        Ok(request.send().await?)
    }

    /// GET `path` with the correct key.
    pub async fn get_authed(&self, path: &str) -> anyhow::Result<reqwest::Response> {
        self.get(path, Some(TEST_KEY)).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
