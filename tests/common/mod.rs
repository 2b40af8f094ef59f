//! Common test utilities - DicepoolTest harness for end-to-end testing

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dicepool::{Config, Server};
use reqwest::Client;
use tokio::task::JoinHandle;

/// Test harness that runs a real dicepool server on a random port
pub struct DicepoolTest {
    pub addr: SocketAddr,
    pub client: Client,
    server: Arc<Server>,
    _handle: JoinHandle<()>,
}

impl DicepoolTest {
    /// Start a server with a fixed seed
    pub async fn start() -> Result<Self> {
        Self::start_with(Config {
            seed: Some(1234),
            ..Config::default()
        })
        .await
    }

    /// Start a server with the given config; the bind address is replaced
    pub async fn start_with(mut config: Config) -> Result<Self> {
        // Find a random available port
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        drop(listener);

        config.bind_addr = addr;

        let server = Arc::new(Server::new(config)?);
        assert_eq!(server.bind_addr(), addr);
        let server_clone = server.clone();

        // Spawn the server in a background task
        let handle = tokio::spawn(async move {
            if let Err(e) = server_clone.run().await {
                eprintln!("Server error: {}", e);
            }
        });

        let client = Client::builder().timeout(Duration::from_secs(5)).build()?;

        // Poll until server is ready (max 2 seconds)
        let mut ready = false;
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            if client
                .get(format!("http://{}/health", addr))
                .send()
                .await
                .is_ok()
            {
                ready = true;
                break;
            }
        }

        if !ready {
            panic!("Server failed to start within 2 seconds");
        }

        Ok(Self {
            addr,
            client,
            server,
            _handle: handle,
        })
    }

    /// Get the base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await?)
    }

    /// Roll and return the parsed body
    pub async fn roll(&self, base: u32, modifier: u32, explode: &[u8]) -> Result<serde_json::Value> {
        let resp = self
            .post(
                "/roll",
                &serde_json::json!({
                    "base": base,
                    "modifier": modifier,
                    "explode": explode,
                }),
            )
            .await?;
        anyhow::ensure!(resp.status() == 201, "roll failed: {}", resp.status());
        Ok(resp.json().await?)
    }

    /// Fetch the history body
    pub async fn history(&self) -> Result<serde_json::Value> {
        Ok(self.get("/history").await?.json().await?)
    }

    /// Get the server's session for direct assertions
    pub fn server(&self) -> &Server {
        &self.server
    }

    /// Shutdown the server gracefully
    pub fn shutdown(&self) {
        self.server.shutdown();
    }
}

impl Drop for DicepoolTest {
    fn drop(&mut self) {
        self.server.shutdown();
    }
}
