//! The office model: typed form of the records the elections-data import
//! and the hosted store produce.
//!
//! The backing store is loosely typed, so every optional field here is
//! genuinely optional and enum-valued fields coerce unknown wire tags to
//! `None` at the boundary instead of failing deserialization. No office
//! record, however malformed, can produce an error in this crate.

pub mod filter;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind of office, as tagged by the elections-data import.
///
/// Wire names are camelCase (`stateSenate`, `cityCouncil`, ...), matching
/// the records already in production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfficeType {
    #[serde(rename = "house")]
    House,
    #[serde(rename = "senate")]
    Senate,
    #[serde(rename = "stateSenate")]
    StateSenate,
    #[serde(rename = "stateHouse")]
    StateHouse,
    #[serde(rename = "cityCouncil")]
    CityCouncil,
    #[serde(rename = "schoolBoard")]
    SchoolBoard,
}

impl fmt::Display for OfficeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::House => "house",
            Self::Senate => "senate",
            Self::StateSenate => "stateSenate",
            Self::StateHouse => "stateHouse",
            Self::CityCouncil => "cityCouncil",
            Self::SchoolBoard => "schoolBoard",
        };
        f.write_str(s)
    }
}

impl FromStr for OfficeType {
    type Err = OfficeTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "house" => Ok(Self::House),
            "senate" => Ok(Self::Senate),
            "stateSenate" => Ok(Self::StateSenate),
            "stateHouse" => Ok(Self::StateHouse),
            "cityCouncil" => Ok(Self::CityCouncil),
            "schoolBoard" => Ok(Self::SchoolBoard),
            other => Err(OfficeTypeParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`OfficeType`] string.
#[derive(Debug, Clone)]
pub struct OfficeTypeParseError(pub String);

impl fmt::Display for OfficeTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid office type: {:?}", self.0)
    }
}

impl std::error::Error for OfficeTypeParseError {}

// ---------------------------------------------------------------------------

/// Government level of an office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Federal,
    State,
    Local,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Federal => "federal",
            Self::State => "state",
            Self::Local => "local",
        };
        f.write_str(s)
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "federal" => Ok(Self::Federal),
            "state" => Ok(Self::State),
            "local" => Ok(Self::Local),
            other => Err(LevelParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Level`] string.
#[derive(Debug, Clone)]
pub struct LevelParseError(pub String);

impl fmt::Display for LevelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid office level: {:?}", self.0)
    }
}

impl std::error::Error for LevelParseError {}

// ---------------------------------------------------------------------------

/// Confidence attached to sourced data (office records, assistant replies).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Verified,
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Verified => "verified",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        f.write_str(s)
    }
}

impl FromStr for Confidence {
    type Err = ConfidenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verified" => Ok(Self::Verified),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(ConfidenceParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Confidence`] string.
#[derive(Debug, Clone)]
pub struct ConfidenceParseError(pub String);

impl fmt::Display for ConfidenceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid confidence: {:?}", self.0)
    }
}

impl std::error::Error for ConfidenceParseError {}

// ---------------------------------------------------------------------------
// Office
// ---------------------------------------------------------------------------

/// An elected office a user may run for.
///
/// `district` is a numeric label, or `"0"` for at-large/statewide seats.
/// `filing_deadline` and `next_election` keep the wire text (ISO dates in
/// practice); consumers format them when the text parses and pass it
/// through verbatim when it does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Office {
    pub id: Uuid,
    pub title: String,
    pub state: String,
    pub district: String,
    #[serde(deserialize_with = "lenient")]
    pub office_type: Option<OfficeType>,
    #[serde(deserialize_with = "lenient")]
    pub level: Option<Level>,
    pub filing_deadline: Option<String>,
    pub next_election: Option<String>,
    pub incumbent: Option<String>,
    pub estimated_cost: Option<String>,
    pub min_age: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    pub confidence: Option<Confidence>,
}

/// Deserialize an optional enum field leniently: absent, null, or an
/// unrecognized tag all become `None`. Production records carry tags this
/// crate has never heard of; they must not fail coercion.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

// ---------------------------------------------------------------------------
// Collaborator trait
// ---------------------------------------------------------------------------

/// Read accessor over the office store.
///
/// Object-safe so hosts can hold `Arc<dyn OfficeProvider>`; the PostgreSQL
/// implementation lives in `d2r-db`.
#[async_trait]
pub trait OfficeProvider: Send + Sync {
    /// All offices on the ballot in a state.
    async fn list_by_state(&self, state: &str) -> Result<Vec<Office>>;

    /// Offices a user has bookmarked.
    async fn list_saved(&self, user_id: Uuid) -> Result<Vec<Office>>;
}
