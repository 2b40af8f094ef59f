//! dicepool - exploding d10 pool roller
//!
//! Rolls pools of ten-sided dice with exploding faces, counts successes, and
//! keeps a bounded history of recent rolls. Served over HTTP by the `dicepool`
//! daemon and usable one-shot through `dicepool_roll`.

pub mod api;
pub mod dice;
pub mod history;
pub mod session;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

use dice::{DieSource, RngSource};
use history::{HistoryError, RollHistory, DEFAULT_MAX_ENTRIES};
use session::Session;

/// Prefix for environment overrides, e.g. `DICEPOOL_MAX_POOL=50`
pub const ENV_PREFIX: &str = "DICEPOOL_";

/// Upper bound for `max_pool`
pub const MAX_POOL_LIMIT: u32 = 10_000;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("invalid configuration: max_pool must be between 1 and {} (got {})", MAX_POOL_LIMIT, .0)]
    InvalidMaxPool(u32),
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Rolls kept in the history
    pub history_limit: usize,
    /// Largest pool a single roll may request
    pub max_pool: u32,
    /// Fixed RNG seed; None draws a seed from the OS
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            history_limit: DEFAULT_MAX_ENTRIES,
            max_pool: 100,
            seed: None,
        }
    }
}

impl Config {
    /// Layer defaults, an optional TOML file, then `DICEPOOL_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX)).extract()
    }

    /// Build a session from this configuration
    pub fn session(&self) -> Result<Session, ConfigError> {
        if self.max_pool == 0 || self.max_pool > MAX_POOL_LIMIT {
            return Err(ConfigError::InvalidMaxPool(self.max_pool));
        }
        let history = RollHistory::new(self.history_limit)?;
        let source: Box<dyn DieSource + Send> = match self.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_os()),
        };
        Ok(Session::new(source, history, self.max_pool))
    }
}

/// The dicepool server instance
pub struct Server {
    config: Config,
    session: Arc<Mutex<Session>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Result<Self> {
        let session = config.session()?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            config,
            session: Arc::new(Mutex::new(session)),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Get the shared session
    pub fn session(&self) -> Arc<Mutex<Session>> {
        self.session.clone()
    }

    /// Build the router
    fn router(&self) -> Router {
        api::router(self.session.clone())
    }

    /// Run the server until shutdown
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        info!(
            history_limit = self.config.history_limit,
            max_pool = self.config.max_pool,
            seeded = self.config.seed.is_some(),
            "dicepool listening on {}",
            local_addr
        );

        let router = self.router();
        let mut shutdown_rx = self.shutdown_rx.clone();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_rx.changed().await.ok();
            })
            .await?;

        info!("dicepool shutdown complete");
        Ok(())
    }

    /// Signal the server to shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Get the configured bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.max_pool, 100);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = \"127.0.0.1:9100\"").unwrap();
        writeln!(file, "history_limit = 5").unwrap();
        writeln!(file, "seed = 42").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.bind_addr.port(), 9100);
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.seed, Some(42));
        // Untouched keys keep their defaults
        assert_eq!(config.max_pool, 100);
    }

    #[test]
    fn test_config_rejects_bad_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_pool = \"lots\"").unwrap();

        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_zero_history_limit_fails_server_start() {
        let config = Config {
            history_limit: 0,
            ..Config::default()
        };
        let err = Server::new(config).err().unwrap();
        assert!(err.to_string().contains("max entries"));
    }

    #[test]
    fn test_max_pool_bounds() {
        let zero = Config {
            max_pool: 0,
            ..Config::default()
        };
        assert_eq!(zero.session().unwrap_err(), ConfigError::InvalidMaxPool(0));
        let err = Server::new(zero).err().unwrap();
        assert!(err.to_string().contains("max_pool"));

        let huge = Config {
            max_pool: u32::MAX,
            ..Config::default()
        };
        assert_eq!(
            huge.session().unwrap_err(),
            ConfigError::InvalidMaxPool(u32::MAX)
        );

        let edge = Config {
            max_pool: MAX_POOL_LIMIT,
            ..Config::default()
        };
        assert_eq!(edge.session().unwrap().max_pool(), MAX_POOL_LIMIT);
    }

    #[test]
    fn test_zero_history_limit_is_config_error() {
        let config = Config {
            history_limit: 0,
            ..Config::default()
        };
        assert_eq!(
            config.session().unwrap_err(),
            ConfigError::History(HistoryError::InvalidConfiguration(0))
        );
    }

    #[test]
    fn test_server_keeps_bind_addr() {
        let config = Config {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 9200)),
            ..Config::default()
        };
        let server = Server::new(config).unwrap();
        assert_eq!(server.bind_addr().port(), 9200);
        assert_eq!(server.session().lock().max_pool(), 100);
    }

    #[test]
    fn test_seeded_sessions_match() {
        let config = Config {
            seed: Some(9),
            ..Config::default()
        };
        let mut a = config.session().unwrap();
        let mut b = config.session().unwrap();

        let triggers = dice::Triggers::all();
        let left = a.roll(10, 0, triggers.clone()).unwrap().outcome.clone();
        let right = b.roll(10, 0, triggers).unwrap().outcome.clone();
        assert_eq!(left, right);
    }
}
