use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::UserAuth;

/// Look up an account by display name
pub async fn find_user_by_name(name: &str) -> Result<Option<UserAuth>, DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    let user = sqlx::query_as::<_, UserAuth>(
        "SELECT id, name FROM user_auth WHERE name = $1",
    )
    .bind(name)
    .fetch_optional(&pool)
    .await?;

    Ok(user)
}

/// Register a new account
pub async fn insert_user(name: &str) -> Result<UserAuth, DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    let user = sqlx::query_as::<_, UserAuth>(
        "INSERT INTO user_auth (name) VALUES ($1) RETURNING id, name",
    )
    .bind(name)
    .fetch_one(&pool)
    .await?;

    Ok(user)
}
