//! Database query functions for the `plan_progress` table.
//!
//! One row per (user, office) pair holding the full item-id -> done-flag
//! mapping as jsonb. `put_progress` is an upsert, so concurrent saves for
//! the same pair serialize to last-write-wins, which is the arbitration
//! the progress tracker relies on.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use d2r_core::progress::PlanProgress;

use crate::models::PlanProgressRow;

/// Fetch the saved progress mapping for a (user, office) pair.
///
/// Returns `None` when no record exists, distinct from an empty mapping,
/// which callers render the same way but which means "saved with nothing
/// checked".
pub async fn get_progress(
    pool: &PgPool,
    user_id: Uuid,
    office_id: Uuid,
) -> Result<Option<PlanProgress>> {
    let row = sqlx::query_as::<_, PlanProgressRow>(
        "SELECT * FROM plan_progress WHERE user_id = $1 AND office_id = $2",
    )
    .bind(user_id)
    .bind(office_id)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("failed to fetch progress for user {user_id} office {office_id}"))?;

    match row {
        Some(row) => {
            let state: PlanProgress = serde_json::from_value(row.state)
                .context("stored progress state is not an item->flag mapping")?;
            Ok(Some(state))
        }
        None => Ok(None),
    }
}

/// Upsert the full progress mapping for a (user, office) pair.
pub async fn put_progress(
    pool: &PgPool,
    user_id: Uuid,
    office_id: Uuid,
    state: &PlanProgress,
) -> Result<()> {
    let payload = serde_json::to_value(state).context("failed to encode progress state")?;

    sqlx::query(
        "INSERT INTO plan_progress (user_id, office_id, state) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (user_id, office_id) DO UPDATE SET \
           state = EXCLUDED.state, \
           updated_at = now()",
    )
    .bind(user_id)
    .bind(office_id)
    .bind(&payload)
    .execute(pool)
    .await
    .with_context(|| format!("failed to save progress for user {user_id} office {office_id}"))?;

    Ok(())
}
