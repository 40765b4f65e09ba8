//! `d2r import` command: bulk-load offices from a JSON array.
//!
//! The feed format is loose: records carry whatever fields the upstream
//! elections API produced, and tag fields may hold values we do not know.
//! Import is tolerant per record: a record that cannot be shaped into an
//! office is reported and skipped, never aborting the batch.

use anyhow::{Context, Result};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use d2r_db::models::NewOffice;
use d2r_db::queries::offices;

#[derive(Debug, Error)]
enum RecordError {
    #[error("not a JSON object")]
    NotAnObject,
    #[error("missing required field {0:?}")]
    MissingField(&'static str),
    #[error("does not match the office shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Run the import command.
pub async fn run_import(pool: &PgPool, file: &str) -> Result<()> {
    let records = read_records(file)?;

    info!(file, records = records.len(), "starting office import");

    let mut imported = 0usize;
    let mut failures: Vec<(usize, String)> = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        match shape_record(record) {
            Ok(new) => {
                let row = offices::upsert_office(pool, &new).await?;
                info!(office_id = %row.id, title = %row.title, "office upserted");
                imported += 1;
            }
            Err(err) => {
                failures.push((index, err.to_string()));
            }
        }
    }

    println!("Imported {imported} offices from {file}");
    if !failures.is_empty() {
        println!("Skipped {} records:", failures.len());
        for (index, reason) in &failures {
            println!("  record {index}: {reason}");
        }
    }

    Ok(())
}

/// Read and parse the import file as a JSON array of records.
fn read_records(file: &str) -> Result<Vec<serde_json::Value>> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read import file: {file}"))?;

    let records: Vec<serde_json::Value> =
        serde_json::from_str(&contents).with_context(|| format!("{file} is not a JSON array"))?;

    Ok(records)
}

/// Shape one feed record into an insertable office.
///
/// `title`, `state`, and `district` are the upsert key inputs and must be
/// present; everything else falls back to the column default.
fn shape_record(record: serde_json::Value) -> Result<NewOffice, RecordError> {
    let obj = record.as_object().ok_or(RecordError::NotAnObject)?;

    for field in ["title", "state", "district"] {
        if !obj.get(field).is_some_and(|v| v.is_string()) {
            return Err(RecordError::MissingField(field));
        }
    }

    let new: NewOffice = serde_json::from_value(record)?;
    Ok(new)
}
