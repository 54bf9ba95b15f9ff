//! Seed the directory with the three sample users.
//!
//! # Usage
//!
//! ```bash
//! # Only if the directory is empty
//! nt-cli seed
//!
//! # Insert the samples even if users already exist
//! nt-cli seed --force
//! ```

use naturalle_admin::db::{self, UserRepository};

use super::{CommandError, connect};

/// Seed sample users, returning how many were inserted.
pub async fn run(force: bool) -> Result<usize, CommandError> {
    let pool = connect().await?;
    db::migrate(&pool).await?;

    let repo = UserRepository::new(&pool);
    let inserted = if force {
        repo.seed().await?
    } else {
        repo.seed_if_empty().await?
    };

    if inserted == 0 {
        tracing::info!("Directory already has users, nothing seeded (use --force to seed anyway)");
    } else {
        tracing::info!(inserted, "Seeding complete!");
    }

    Ok(inserted)
}
