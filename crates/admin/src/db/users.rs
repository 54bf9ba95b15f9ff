//! User repository for database operations.
//!
//! Every operation is a single statement (seeding aside), so each one is
//! atomic on its own. Concurrent updates to the same row are last write wins.

use sqlx::SqlitePool;

use naturalle_core::UserId;

use super::RepositoryError;
use crate::models::{UserFields, UserRecord};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `SQLite` user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    role: String,
    status: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
            role: row.role,
            status: row.status,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for team directory users.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, email, role, status
            FROM users
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Find users whose name or email contains `query`, ignoring case.
    ///
    /// An empty query returns every user. Matching happens here rather than
    /// with `LIKE` because `SQLite` only folds ASCII case, and names such as
    /// "João" need full Unicode folding. `%` and `_` are matched literally.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_matching(&self, query: &str) -> Result<Vec<UserRecord>, RepositoryError> {
        let users = self.list_all().await?;
        if query.is_empty() {
            return Ok(users);
        }

        let needle = query.to_lowercase();
        Ok(users
            .into_iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<UserRecord, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, email, role, status
            FROM users
            WHERE id = ?
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Insert a new user and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, fields: &UserFields) -> Result<UserRecord, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (name, email, role, status)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, email, role, status
            ",
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.role)
        .bind(&fields.status)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace all editable fields of a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: UserId,
        fields: &UserFields,
    ) -> Result<UserRecord, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            UPDATE users
            SET name = ?, email = ?, role = ?, status = ?
            WHERE id = ?
            RETURNING id, name, email, role, status
            ",
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.role)
        .bind(&fields.status)
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this ID.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Count all users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Insert the sample users, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails; nothing is
    /// written in that case.
    pub async fn seed(&self) -> Result<usize, RepositoryError> {
        let samples = UserFields::samples();
        let mut tx = self.pool.begin().await?;

        for fields in &samples {
            sqlx::query("INSERT INTO users (name, email, role, status) VALUES (?, ?, ?, ?)")
                .bind(&fields.name)
                .bind(&fields.email)
                .bind(&fields.role)
                .bind(&fields.status)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(samples.len())
    }

    /// Seed the sample users if the directory is empty.
    ///
    /// Returns the number of users inserted (0 if the table already had data).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn seed_if_empty(&self) -> Result<usize, RepositoryError> {
        if self.count().await? > 0 {
            return Ok(0);
        }

        let inserted = self.seed().await?;
        tracing::info!(inserted, "Seeded empty directory with sample users");
        Ok(inserted)
    }
}
