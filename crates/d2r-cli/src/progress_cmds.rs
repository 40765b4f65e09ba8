//! Progress and bookmark commands: `toggle`, `status`, `save`, `unsave`.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use d2r_core::plan::{CampaignPlan, build_plan};
use d2r_core::progress::{PlanProgress, PlanStats, ProgressTracker, compute_stats};
use d2r_db::queries::{offices, saved_offices};
use d2r_db::store::PgProgressStore;

/// Toggle a checklist item and persist the result.
///
/// The flip happens in memory first and is reported either way; a failed
/// write is a warning in the logs, not a failed command. Without a user the
/// new state has nowhere to live, so the command says so.
pub async fn run_toggle(
    pool: &PgPool,
    office_id_str: &str,
    item_id: &str,
    user: Option<Uuid>,
) -> Result<()> {
    let office_id = crate::resolve::resolve_office_id(pool, office_id_str).await?;
    let office = offices::get_office(pool, office_id)
        .await?
        .with_context(|| format!("office {office_id} not found"))?
        .into_office();

    let plan = build_plan(&office);
    if !plan.items().any(|i| i.id == item_id) {
        let known: Vec<&str> = plan.items().map(|i| i.id.as_str()).collect();
        anyhow::bail!(
            "unknown item {item_id:?} for this plan; known items: {}",
            known.join(", ")
        );
    }

    let tracker = ProgressTracker::new(Arc::new(PgProgressStore::new(pool.clone())));
    let current = tracker
        .load(user, office_id)
        .await?
        .unwrap_or_else(PlanProgress::new);

    let next = current.toggle(item_id);
    tracker.save(user, office_id, &next).await;

    let checked = next.is_done(item_id);
    println!(
        "{} {item_id}",
        if checked { "Checked" } else { "Unchecked" }
    );
    print_stats(&plan, &next);

    if user.is_none() {
        println!("(no user set; progress not saved. Pass --user or run `d2r init`)");
    }

    Ok(())
}

/// Show the completion stats line for an office's plan.
pub async fn run_status(pool: &PgPool, office_id_str: &str, user: Option<Uuid>) -> Result<()> {
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

    println!("{}", office.title);
    print_stats(&plan, &progress);

    Ok(())
}

fn print_stats(plan: &CampaignPlan, progress: &PlanProgress) {
    let PlanStats {
        completed,
        total,
        percentage,
    } = compute_stats(plan, progress);
    println!("Progress: {completed}/{total} tasks ({percentage}%)");
}

/// Bookmark an office for the user.
pub async fn run_save(pool: &PgPool, office_id_str: &str, user: Option<Uuid>) -> Result<()> {
    let user_id = user.context("save requires a user; pass --user or run `d2r init`")?;
    let office_id = crate::resolve::resolve_office_id(pool, office_id_str).await?;

    let office = offices::get_office(pool, office_id)
        .await?
        .with_context(|| format!("office {office_id} not found"))?;

    saved_offices::save_office(pool, user_id, office_id).await?;
    println!("Saved {}", office.title);

    Ok(())
}

/// Remove a bookmark.
pub async fn run_unsave(pool: &PgPool, office_id_str: &str, user: Option<Uuid>) -> Result<()> {
    let user_id = user.context("unsave requires a user; pass --user or run `d2r init`")?;
    let office_id = crate::resolve::resolve_office_id(pool, office_id_str).await?;

    let removed = saved_offices::unsave_office(pool, user_id, office_id).await?;
    if removed {
        println!("Removed {office_id} from saved offices");
    } else {
        println!("Office {office_id} was not saved");
    }

    Ok(())
}
