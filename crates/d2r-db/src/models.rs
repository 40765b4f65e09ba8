use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use d2r_core::office::Office;

// ---------------------------------------------------------------------------
// Row structs
// ---------------------------------------------------------------------------

/// An office row as stored.
///
/// Tag columns (`office_type`, `level`, `confidence`) stay text in the
/// database because the elections-data feed grows new tags between releases;
/// [`OfficeRow::into_office`] coerces them into the typed core model,
/// mapping unknown tags to `None`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OfficeRow {
    pub id: Uuid,
    pub title: String,
    pub state: String,
    pub district: String,
    pub office_type: Option<String>,
    pub level: Option<String>,
    pub next_election: Option<String>,
    pub filing_deadline: Option<String>,
    pub incumbent: Option<String>,
    pub estimated_cost: Option<String>,
    pub confidence: Option<String>,
    pub term: Option<String>,
    pub salary: Option<String>,
    pub min_age: Option<i32>,
    pub candidates_running: serde_json::Value,
    pub total_candidates: i32,
    pub data_source: Option<String>,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OfficeRow {
    /// Coerce the stored row into the core office shape.
    pub fn into_office(self) -> Office {
        Office {
            id: self.id,
            title: self.title,
            state: self.state,
            district: self.district,
            office_type: self.office_type.and_then(|s| s.parse().ok()),
            level: self.level.and_then(|s| s.parse().ok()),
            filing_deadline: self.filing_deadline,
            next_election: self.next_election,
            incumbent: self.incumbent,
            estimated_cost: self.estimated_cost,
            min_age: self.min_age,
            confidence: self.confidence.and_then(|s| s.parse().ok()),
        }
    }
}

impl From<OfficeRow> for Office {
    fn from(row: OfficeRow) -> Self {
        row.into_office()
    }
}

/// Fields for inserting or updating an office. The import path builds these
/// from feed records; ids, `last_updated`, and `created_at` are
/// server-generated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOffice {
    pub title: String,
    pub state: String,
    pub district: String,
    pub office_type: Option<String>,
    pub level: Option<String>,
    pub next_election: Option<String>,
    pub filing_deadline: Option<String>,
    pub incumbent: Option<String>,
    pub estimated_cost: Option<String>,
    pub confidence: Option<String>,
    pub term: Option<String>,
    pub salary: Option<String>,
    pub min_age: Option<i32>,
    #[serde(default)]
    pub candidates_running: serde_json::Value,
    #[serde(default)]
    pub total_candidates: i32,
    pub data_source: Option<String>,
}

/// A bookmarked office.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedOffice {
    pub user_id: Uuid,
    pub office_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

/// One user's checklist completion state for one office.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanProgressRow {
    pub user_id: Uuid,
    pub office_id: Uuid,
    /// Mapping from checklist-item id to completion flag.
    pub state: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use d2r_core::office::{Level, OfficeType};

    fn row() -> OfficeRow {
        OfficeRow {
            id: Uuid::new_v4(),
            title: "State Senate - District 11".to_owned(),
            state: "NY".to_owned(),
            district: "11".to_owned(),
            office_type: Some("stateSenate".to_owned()),
            level: Some("state".to_owned()),
            next_election: Some("2026-11-03".to_owned()),
            filing_deadline: Some("2026-04-02".to_owned()),
            incumbent: Some("Open Seat".to_owned()),
            estimated_cost: Some("$25,000 - $400,000".to_owned()),
            confidence: Some("verified".to_owned()),
            term: Some("2 years".to_owned()),
            salary: None,
            min_age: Some(18),
            candidates_running: serde_json::json!([]),
            total_candidates: 0,
            data_source: Some("FEC API".to_owned()),
            last_updated: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_coerces_known_tags() {
        let office = row().into_office();
        assert_eq!(office.office_type, Some(OfficeType::StateSenate));
        assert_eq!(office.level, Some(Level::State));
        assert_eq!(office.min_age, Some(18));
    }

    #[test]
    fn row_coerces_unknown_tags_to_none() {
        let mut r = row();
        r.office_type = Some("waterBoard".to_owned());
        r.confidence = Some("gospel".to_owned());
        let office = r.into_office();
        assert_eq!(office.office_type, None);
        assert_eq!(office.confidence, None);
        // Known sibling tags survive.
        assert_eq!(office.level, Some(Level::State));
    }
}
