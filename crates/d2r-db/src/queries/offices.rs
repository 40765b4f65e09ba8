//! Database query functions for the `offices` table.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewOffice, OfficeRow};

/// Insert or update an office row, keyed on `(state, office_type, district)`.
/// The import feed identifies a race by those three fields, not by id; the
/// key's unique index treats NULL office_type as a match, so typeless
/// records re-import in place too. Returns the stored row.
pub async fn upsert_office(pool: &PgPool, new: &NewOffice) -> Result<OfficeRow> {
    // jsonb column is NOT NULL; an unset candidate list stores as [].
    let candidates = if new.candidates_running.is_null() {
        serde_json::json!([])
    } else {
        new.candidates_running.clone()
    };

    let row = sqlx::query_as::<_, OfficeRow>(
        "INSERT INTO offices \
           (title, state, district, office_type, level, next_election, \
            filing_deadline, incumbent, estimated_cost, confidence, term, \
            salary, min_age, candidates_running, total_candidates, data_source) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
         ON CONFLICT (state, office_type, district) DO UPDATE SET \
           title = EXCLUDED.title, \
           level = EXCLUDED.level, \
           next_election = EXCLUDED.next_election, \
           filing_deadline = EXCLUDED.filing_deadline, \
           incumbent = EXCLUDED.incumbent, \
           estimated_cost = EXCLUDED.estimated_cost, \
           confidence = EXCLUDED.confidence, \
           term = EXCLUDED.term, \
           salary = EXCLUDED.salary, \
           min_age = EXCLUDED.min_age, \
           candidates_running = EXCLUDED.candidates_running, \
           total_candidates = EXCLUDED.total_candidates, \
           data_source = EXCLUDED.data_source, \
           last_updated = now() \
         RETURNING *",
    )
    .bind(&new.title)
    .bind(&new.state)
    .bind(&new.district)
    .bind(&new.office_type)
    .bind(&new.level)
    .bind(&new.next_election)
    .bind(&new.filing_deadline)
    .bind(&new.incumbent)
    .bind(&new.estimated_cost)
    .bind(&new.confidence)
    .bind(&new.term)
    .bind(&new.salary)
    .bind(new.min_age)
    .bind(&candidates)
    .bind(new.total_candidates)
    .bind(&new.data_source)
    .fetch_one(pool)
    .await
    .with_context(|| {
        format!(
            "failed to upsert office {:?} ({}/{})",
            new.title, new.state, new.district
        )
    })?;

    Ok(row)
}

/// Fetch an office by its ID.
pub async fn get_office(pool: &PgPool, id: Uuid) -> Result<Option<OfficeRow>> {
    let row = sqlx::query_as::<_, OfficeRow>("SELECT * FROM offices WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch office")?;

    Ok(row)
}

/// Resolve an office from a hex id prefix. Errors when the prefix matches
/// more than one office; returns `None` when it matches none.
pub async fn find_office_by_prefix(pool: &PgPool, prefix: &str) -> Result<Option<OfficeRow>> {
    let pattern = format!("{}%", prefix.to_lowercase());
    let rows = sqlx::query_as::<_, OfficeRow>(
        "SELECT * FROM offices WHERE id::text LIKE $1 LIMIT 2",
    )
    .bind(&pattern)
    .fetch_all(pool)
    .await
    .context("failed to search offices by id prefix")?;

    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.into_iter().next()),
        _ => anyhow::bail!("office id prefix {prefix:?} is ambiguous"),
    }
}

/// List all offices in a state, soonest filing deadline first.
pub async fn list_offices_by_state(pool: &PgPool, state: &str) -> Result<Vec<OfficeRow>> {
    let rows = sqlx::query_as::<_, OfficeRow>(
        "SELECT * FROM offices WHERE state = $1 ORDER BY filing_deadline NULLS LAST, title",
    )
    .bind(state)
    .fetch_all(pool)
    .await
    .with_context(|| format!("failed to list offices for state {state:?}"))?;

    Ok(rows)
}

/// List the offices a user has bookmarked, most recently saved first.
pub async fn list_saved_offices(pool: &PgPool, user_id: Uuid) -> Result<Vec<OfficeRow>> {
    let rows = sqlx::query_as::<_, OfficeRow>(
        "SELECT o.* FROM offices o \
         JOIN saved_offices s ON s.office_id = o.id \
         WHERE s.user_id = $1 \
         ORDER BY s.saved_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .context("failed to list saved offices")?;

    Ok(rows)
}
