//! `d2r offices` command: filtered office listing for a state.

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use d2r_core::office::filter::{OfficeFilter, SortBy};
use d2r_core::office::{Level, Office, OfficeProvider};
use d2r_db::store::PgOfficeProvider;

/// Run the offices command.
///
/// `--saved` lists the user's bookmarked offices instead of a state's full
/// slate; the same filter and sort apply either way.
pub async fn run_offices(
    pool: &PgPool,
    state: Option<&str>,
    saved_user: Option<Uuid>,
    level: Option<Level>,
    search: Option<String>,
    sort: SortBy,
) -> Result<()> {
    let provider = PgOfficeProvider::new(pool.clone());

    let offices = match (saved_user, state) {
        (Some(user_id), _) => provider.list_saved(user_id).await?,
        (None, Some(state)) => provider.list_by_state(state).await?,
        (None, None) => {
            anyhow::bail!("pass --state to list a state's offices, or --saved with a user")
        }
    };

    let filter = OfficeFilter { level, search, sort };
    let matches = filter.apply(&offices);

    if matches.is_empty() {
        println!("No offices match.");
        return Ok(());
    }

    for office in &matches {
        print_office_line(office);
    }
    println!();
    println!("{} offices", matches.len());

    Ok(())
}

fn print_office_line(office: &Office) {
    let short_id = &office.id.to_string()[..8];
    let level = office
        .level
        .map(|l| l.to_string())
        .unwrap_or_else(|| "-".to_owned());
    let deadline = office.filing_deadline.as_deref().unwrap_or("-");
    let cost = office.estimated_cost.as_deref().unwrap_or("-");

    println!(
        "  {short_id}  {:<40}  {:<8}  deadline {:<12}  {cost}",
        office.title, level, deadline
    );
}
