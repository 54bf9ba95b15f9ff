//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! nt-cli migrate
//! ```
//!
//! Migrations are embedded from `crates/admin/migrations/`; the server also
//! applies them on startup, so this is only needed to prepare a database ahead
//! of time.

use naturalle_admin::db;

use super::{CommandError, connect};

/// Run all pending migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    db::migrate(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
