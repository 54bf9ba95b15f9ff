//! Integration tests for the Naturalle team directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p naturalle-integration-tests
//! ```
//!
//! Each test starts its own server on an ephemeral port, backed by a fresh
//! `SQLite` file in a temporary directory, so tests need no external services
//! and can run in parallel.

use std::net::SocketAddr;

use secrecy::SecretString;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tokio::task::JoinHandle;

use naturalle_admin::config::AdminConfig;
use naturalle_admin::db::{self, UserRepository};
use naturalle_admin::state::AppState;

/// A running directory server and a handle on its database.
pub struct TestServer {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
    server: JoinHandle<()>,
    // Dropped last: removes the database file.
    _dir: TempDir,
}

impl TestServer {
    /// Start a server whose directory holds the three sample users.
    ///
    /// # Panics
    ///
    /// Panics if the database or listener cannot be set up.
    pub async fn seeded() -> Self {
        let server = Self::empty().await;
        UserRepository::new(&server.pool)
            .seed_if_empty()
            .await
            .expect("Failed to seed sample users");
        server
    }

    /// Start a server with an empty directory.
    ///
    /// # Panics
    ///
    /// Panics if the database or listener cannot be set up.
    pub async fn empty() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("naturalle-test.db").display()
        );

        let pool = db::create_pool(&SecretString::from(url))
            .await
            .expect("Failed to create database pool");
        db::migrate(&pool).await.expect("Failed to run migrations");

        let config = AdminConfig::from_lookup(|_| None).expect("Failed to build config");
        let app = naturalle_admin::app(AppState::new(config, pool.clone()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to read local address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            addr,
            pool,
            client: reqwest::Client::new(),
            server,
            _dir: dir,
        }
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Repository over this server's database.
    #[must_use]
    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.pool)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server.abort();
    }
}
