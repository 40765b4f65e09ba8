//! Database query functions for the `saved_offices` relation.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Bookmark an office for a user. Saving the same office twice is a no-op,
/// not an error.
pub async fn save_office(pool: &PgPool, user_id: Uuid, office_id: Uuid) -> Result<()> {
    sqlx::query(
        "INSERT INTO saved_offices (user_id, office_id) \
         VALUES ($1, $2) \
         ON CONFLICT (user_id, office_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(office_id)
    .execute(pool)
    .await
    .with_context(|| format!("failed to save office {office_id} for user {user_id}"))?;

    Ok(())
}

/// Remove a bookmark. Returns whether a row was actually deleted.
pub async fn unsave_office(pool: &PgPool, user_id: Uuid, office_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        "DELETE FROM saved_offices WHERE user_id = $1 AND office_id = $2",
    )
    .bind(user_id)
    .bind(office_id)
    .execute(pool)
    .await
    .with_context(|| format!("failed to unsave office {office_id} for user {user_id}"))?;

    Ok(result.rows_affected() > 0)
}
