//! PostgreSQL implementations of the core collaborator traits.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use d2r_core::office::{Office, OfficeProvider};
use d2r_core::progress::{PlanProgress, ProgressStore};

use crate::queries::{offices, progress};

/// [`ProgressStore`] backed by the `plan_progress` table.
#[derive(Clone)]
pub struct PgProgressStore {
    pool: PgPool,
}

impl PgProgressStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressStore for PgProgressStore {
    async fn get(&self, user_id: Uuid, office_id: Uuid) -> Result<Option<PlanProgress>> {
        progress::get_progress(&self.pool, user_id, office_id).await
    }

    async fn put(&self, user_id: Uuid, office_id: Uuid, state: &PlanProgress) -> Result<()> {
        progress::put_progress(&self.pool, user_id, office_id, state).await
    }
}

/// [`OfficeProvider`] backed by the `offices` table.
#[derive(Clone)]
pub struct PgOfficeProvider {
    pool: PgPool,
}

impl PgOfficeProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfficeProvider for PgOfficeProvider {
    async fn list_by_state(&self, state: &str) -> Result<Vec<Office>> {
        let rows = offices::list_offices_by_state(&self.pool, state).await?;
        Ok(rows.into_iter().map(Office::from).collect())
    }

    async fn list_saved(&self, user_id: Uuid) -> Result<Vec<Office>> {
        let rows = offices::list_saved_offices(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(Office::from).collect())
    }
}
