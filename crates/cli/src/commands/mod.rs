//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use secrecy::SecretString;
use sqlx::SqlitePool;
use thiserror::Error;

use naturalle_admin::config::DEFAULT_DATABASE_URL;
use naturalle_admin::db::{self, RepositoryError};
use naturalle_core::UserId;

/// Errors shared by all commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// No user with the given ID.
    #[error("User not found: {0}")]
    UserNotFound(UserId),
}

/// Connect to the directory database named by `NATURALLE_DATABASE_URL`.
///
/// Falls back to the same default file as the server.
pub async fn connect() -> Result<SqlitePool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("NATURALLE_DATABASE_URL")
        .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    tracing::info!("Connecting to directory database...");
    let pool = db::create_pool(&SecretString::from(database_url)).await?;
    Ok(pool)
}
