//! `d2r plan` command: render an office's campaign plan as markdown.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use d2r_core::plan::{build_plan, render_markdown};
use d2r_core::progress::{PlanProgress, ProgressTracker};
use d2r_db::queries::offices;
use d2r_db::store::PgProgressStore;

/// Run the plan command.
///
/// With `--user`, the rendered checkboxes reflect that user's saved
/// progress; without one everything renders unchecked. `--output` writes
/// the document to a file instead of stdout.
pub async fn run_plan(
    pool: &PgPool,
    office_id_str: &str,
    user: Option<Uuid>,
    output: Option<&str>,
) -> Result<()> {
    let office_id = crate::resolve::resolve_office_id(pool, office_id_str).await?;

    let office = offices::get_office(pool, office_id)
        .await?
        .with_context(|| format!("office {office_id} not found"))?
        .into_office();

    let plan = build_plan(&office);

    let tracker = ProgressTracker::new(Arc::new(PgProgressStore::new(pool.clone())));
    let progress = tracker
        .load(user, office_id)
        .await?
        .unwrap_or_else(PlanProgress::new);

    let today = chrono::Utc::now().date_naive();
    let document = render_markdown(&office, &plan, &progress, today);

    let mut writer: Box<dyn Write> = if let Some(path) = output {
        Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("cannot create output file: {path}"))?,
        )
    } else {
        Box::new(std::io::stdout().lock())
    };

    writer.write_all(document.as_bytes())?;

    if let Some(path) = output {
        println!("Plan written to {path}");
    }

    Ok(())
}
