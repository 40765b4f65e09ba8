//! Campaign plan generation: race classification, checklist templates,
//! document rendering.

pub mod classify;
pub mod render;
pub mod template;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use classify::RaceCategory;
pub use render::render_markdown;
pub use template::build_plan;

// ---------------------------------------------------------------------------
// Checklist types
// ---------------------------------------------------------------------------

/// Priority of a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
        };
        f.write_str(s)
    }
}

/// One task on the checklist.
///
/// Item ids are stable within a single plan but not globally: the same id
/// (e.g. `"target"`) recurs across categories with different task text, and
/// the production templates even reuse an id across sections of one plan
/// (`"events"` in the federal fundraising and field-work sections). Progress
/// flags are therefore keyed by id, not by section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub task: String,
    pub priority: Priority,
}

impl ChecklistItem {
    pub fn new(id: &str, task: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.to_owned(),
            task: task.into(),
            priority,
        }
    }
}

/// The seven checklist sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    PreFilingEssentials,
    Filing,
    First30Days,
    Fundraising,
    Team,
    FieldWork,
    Messaging,
}

impl Section {
    /// All sections in display order.
    pub const ALL: [Section; 7] = [
        Section::PreFilingEssentials,
        Section::Filing,
        Section::First30Days,
        Section::Fundraising,
        Section::Team,
        Section::FieldWork,
        Section::Messaging,
    ];

    /// Section heading used in the rendered checklist document.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::PreFilingEssentials => "PRE-FILING ESSENTIALS (Do This First)",
            Self::Filing => "FILING REQUIREMENTS",
            Self::First30Days => "FIRST 30 DAYS",
            Self::Fundraising => "FUNDRAISING CHECKLIST",
            Self::Team => "TEAM TO BUILD",
            Self::FieldWork => "FIELD WORK & OUTREACH",
            Self::Messaging => "MESSAGING & COMMUNICATIONS",
        }
    }
}

/// A generated campaign plan: seven ordered checklist sections plus an
/// optional budget-allocation table.
///
/// Plans are derived values. [`build_plan`] constructs a fresh one on every
/// call from the office record alone, so two calls with the same office
/// compare equal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CampaignPlan {
    pub pre_filing_essentials: Vec<ChecklistItem>,
    pub filing: Vec<ChecklistItem>,
    pub first_30_days: Vec<ChecklistItem>,
    pub fundraising: Vec<ChecklistItem>,
    pub team: Vec<ChecklistItem>,
    pub field_work: Vec<ChecklistItem>,
    pub messaging: Vec<ChecklistItem>,
    /// Ordered (category label, percentage range) rows. `None` for the
    /// fallback category, which has no budget guidance.
    pub budget: Option<Vec<(String, String)>>,
}

impl CampaignPlan {
    /// Items in one section.
    pub fn section(&self, section: Section) -> &[ChecklistItem] {
        match section {
            Section::PreFilingEssentials => &self.pre_filing_essentials,
            Section::Filing => &self.filing,
            Section::First30Days => &self.first_30_days,
            Section::Fundraising => &self.fundraising,
            Section::Team => &self.team,
            Section::FieldWork => &self.field_work,
            Section::Messaging => &self.messaging,
        }
    }

    /// All items across the seven sections, in display order.
    pub fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        Section::ALL.iter().flat_map(|s| self.section(*s).iter())
    }

    /// Total number of checklist items.
    pub fn len(&self) -> usize {
        self.items().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
