//! Office list filtering and sorting.
//!
//! The filter is an explicit, serializable value passed through one
//! function, so host shells can keep it in whatever state container they
//! use without this crate caring.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Level, Office};

/// Sort order for an office listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Soonest filing deadline first; offices without a parseable deadline
    /// sort last.
    #[default]
    Deadline,
    /// Alphabetical by title.
    Title,
}

/// Filter and sort criteria for an office listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfficeFilter {
    /// Keep only offices at this level. `None` keeps all levels.
    pub level: Option<Level>,
    /// Case-insensitive substring match over title and incumbent.
    pub search: Option<String>,
    pub sort: SortBy,
}

impl OfficeFilter {
    /// Apply the filter to a slice of offices, returning matches in sort
    /// order. The input is never mutated.
    pub fn apply(&self, offices: &[Office]) -> Vec<Office> {
        let mut out: Vec<Office> = offices
            .iter()
            .filter(|o| self.matches(o))
            .cloned()
            .collect();

        match self.sort {
            SortBy::Deadline => {
                out.sort_by_key(|o| deadline_key(o));
            }
            SortBy::Title => {
                out.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
            }
        }
        out
    }

    fn matches(&self, office: &Office) -> bool {
        if let Some(level) = self.level {
            if office.level != Some(level) {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let in_title = office.title.to_lowercase().contains(&term);
            let in_incumbent = office
                .incumbent
                .as_deref()
                .is_some_and(|i| i.to_lowercase().contains(&term));
            if !in_title && !in_incumbent {
                return false;
            }
        }
        true
    }
}

/// Sort key for deadline ordering: parseable dates first (ascending),
/// everything else last.
fn deadline_key(office: &Office) -> (bool, Option<NaiveDate>) {
    let parsed = office
        .filing_deadline
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
    (parsed.is_none(), parsed)
}
