//! Directory user management commands.
//!
//! # Usage
//!
//! ```bash
//! # List users, optionally filtered by name or email
//! nt-cli user list --query maria
//!
//! # Add a user
//! nt-cli user add -n "Ana Souza" -e ana@naturalle.com -r Financeiro -s Ativo
//!
//! # Remove a user
//! nt-cli user remove 4
//! ```

use sqlx::SqlitePool;

use naturalle_admin::db::{self, RepositoryError, UserRepository};
use naturalle_admin::models::{UserFields, UserRecord};
use naturalle_core::UserId;

use super::{CommandError, connect};

/// List users matching `query` (all users if `None`).
pub async fn list(query: Option<&str>) -> Result<Vec<UserRecord>, CommandError> {
    let pool = connect().await?;
    db::migrate(&pool).await?;

    let users = find_users(&pool, query).await?;

    #[allow(clippy::print_stdout)]
    {
        for user in &users {
            println!("{}", format_user(user));
        }
        if users.is_empty() {
            println!("No users found.");
        }
    }

    Ok(users)
}

/// Add a user.
///
/// Values are stored as given; like the web form, nothing is validated.
pub async fn add(fields: &UserFields) -> Result<UserRecord, CommandError> {
    let pool = connect().await?;
    db::migrate(&pool).await?;

    create_user(&pool, fields).await
}

/// Remove a user by ID.
pub async fn remove(id: UserId) -> Result<(), CommandError> {
    let pool = connect().await?;
    db::migrate(&pool).await?;

    remove_user(&pool, id).await
}

async fn find_users(
    pool: &SqlitePool,
    query: Option<&str>,
) -> Result<Vec<UserRecord>, CommandError> {
    Ok(UserRepository::new(pool)
        .find_matching(query.unwrap_or_default())
        .await?)
}

async fn create_user(pool: &SqlitePool, fields: &UserFields) -> Result<UserRecord, CommandError> {
    tracing::info!("Creating user: {} ({})", fields.name, fields.email);
    let user = UserRepository::new(pool).create(fields).await?;

    tracing::info!(user_id = %user.id, "User created successfully");
    Ok(user)
}

async fn remove_user(pool: &SqlitePool, id: UserId) -> Result<(), CommandError> {
    match UserRepository::new(pool).delete(id).await {
        Ok(()) => {
            tracing::info!(user_id = %id, "User removed");
            Ok(())
        }
        Err(RepositoryError::NotFound) => Err(CommandError::UserNotFound(id)),
        Err(e) => Err(e.into()),
    }
}

/// One line per user: `[id] name <email> role status`.
fn format_user(user: &UserRecord) -> String {
    format!(
        "[{}] {} <{}> {} {}",
        user.id, user.name, user.email, user.role, user.status
    )
}

#[cfg(test)]
mod tests {
    use naturalle_core::UserStatus;

    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = db::create_memory_pool().await.unwrap();
        db::migrate(&pool).await.unwrap();
        UserRepository::new(&pool).seed_if_empty().await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_remove_missing_user_is_user_not_found() {
        let pool = test_pool().await;

        let err = remove_user(&pool, UserId::new(404)).await.unwrap_err();

        assert!(matches!(err, CommandError::UserNotFound(id) if id == UserId::new(404)));
        assert_eq!(err.to_string(), "User not found: 404");
        assert_eq!(UserRepository::new(&pool).count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_add_then_remove() {
        let pool = test_pool().await;
        let fields = UserFields::new(
            "Ana Souza",
            "ana@naturalle.com",
            "Financeiro",
            UserStatus::Active,
        );

        let user = create_user(&pool, &fields).await.unwrap();
        assert_eq!(user.fields(), fields);
        assert_eq!(find_users(&pool, Some("ana@")).await.unwrap(), [user.clone()]);

        remove_user(&pool, user.id).await.unwrap();
        assert!(find_users(&pool, Some("ana@")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_without_query_returns_everyone() {
        let pool = test_pool().await;

        assert_eq!(find_users(&pool, None).await.unwrap().len(), 3);
        assert_eq!(find_users(&pool, Some("VENDAS")).await.unwrap().len(), 1);
    }

    #[test]
    fn test_format_user() {
        let user = UserRecord {
            id: UserId::new(2),
            name: "Maria Silva".to_string(),
            email: "maria@vendas.com".to_string(),
            role: "Vendas".to_string(),
            status: "Inativo".to_string(),
        };

        assert_eq!(
            format_user(&user),
            "[2] Maria Silva <maria@vendas.com> Vendas Inativo"
        );
    }
}
