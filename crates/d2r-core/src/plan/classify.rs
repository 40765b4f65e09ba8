//! Race classification: which checklist category an office gets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::office::{Level, Office, OfficeType};

/// The four checklist categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceCategory {
    FederalHouse,
    StateLegislature,
    Local,
    Fallback,
}

impl RaceCategory {
    /// Classify an office. Rules are evaluated in order; the first match
    /// wins, and anything left over lands on [`RaceCategory::Fallback`].
    ///
    /// Rule 1 also matches any federal office whose displayed cost text
    /// contains the substring `"800,000"`. That heuristic is inherited from
    /// the production data (House race cost ranges all start at $800,000)
    /// and is kept byte-for-byte for compatibility: rewording the cost text
    /// of a federal House office silently drops it to a later rule.
    pub fn classify(office: &Office) -> Self {
        let cost_looks_federal_house = office
            .estimated_cost
            .as_deref()
            .is_some_and(|c| c.contains("800,000"));

        if office.office_type == Some(OfficeType::House)
            || (office.level == Some(Level::Federal) && cost_looks_federal_house)
        {
            return Self::FederalHouse;
        }

        if matches!(
            office.office_type,
            Some(OfficeType::StateSenate) | Some(OfficeType::StateHouse)
        ) || office.level == Some(Level::State)
        {
            return Self::StateLegislature;
        }

        if matches!(
            office.office_type,
            Some(OfficeType::CityCouncil) | Some(OfficeType::SchoolBoard)
        ) || office.level == Some(Level::Local)
        {
            return Self::Local;
        }

        Self::Fallback
    }
}

impl fmt::Display for RaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FederalHouse => "federal_house",
            Self::StateLegislature => "state_legislature",
            Self::Local => "local",
            Self::Fallback => "fallback",
        };
        f.write_str(s)
    }
}

impl FromStr for RaceCategory {
    type Err = RaceCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "federal_house" => Ok(Self::FederalHouse),
            "state_legislature" => Ok(Self::StateLegislature),
            "local" => Ok(Self::Local),
            "fallback" => Ok(Self::Fallback),
            other => Err(RaceCategoryParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`RaceCategory`] string.
#[derive(Debug, Clone)]
pub struct RaceCategoryParseError(pub String);

impl fmt::Display for RaceCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid race category: {:?}", self.0)
    }
}

impl std::error::Error for RaceCategoryParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_office_type_wins_over_contradictory_level() {
        // Rule order is first-match-wins: office_type=house beats level=state.
        let office = Office {
            office_type: Some(OfficeType::House),
            level: Some(Level::State),
            ..Office::default()
        };
        assert_eq!(RaceCategory::classify(&office), RaceCategory::FederalHouse);
    }

    #[test]
    fn federal_level_with_cost_heuristic() {
        let office = Office {
            level: Some(Level::Federal),
            estimated_cost: Some("$800,000 - $2,500,000".to_owned()),
            ..Office::default()
        };
        assert_eq!(RaceCategory::classify(&office), RaceCategory::FederalHouse);
    }

    #[test]
    fn federal_level_with_reworded_cost_misses_rule_one() {
        // The substring heuristic is literal. A federal office whose cost
        // text does not contain "800,000" is not a federal-house race, even
        // though the dollar amounts are equivalent.
        let office = Office {
            level: Some(Level::Federal),
            estimated_cost: Some("$0.8M - $2.5M".to_owned()),
            ..Office::default()
        };
        assert_eq!(RaceCategory::classify(&office), RaceCategory::Fallback);
    }

    #[test]
    fn state_chamber_types_classify_as_state_legislature() {
        for t in [OfficeType::StateSenate, OfficeType::StateHouse] {
            let office = Office {
                office_type: Some(t),
                ..Office::default()
            };
            assert_eq!(
                RaceCategory::classify(&office),
                RaceCategory::StateLegislature
            );
        }
    }

    #[test]
    fn state_level_alone_classifies_as_state_legislature() {
        let office = Office {
            level: Some(Level::State),
            ..Office::default()
        };
        assert_eq!(
            RaceCategory::classify(&office),
            RaceCategory::StateLegislature
        );
    }

    #[test]
    fn local_types_and_local_level() {
        for t in [OfficeType::CityCouncil, OfficeType::SchoolBoard] {
            let office = Office {
                office_type: Some(t),
                ..Office::default()
            };
            assert_eq!(RaceCategory::classify(&office), RaceCategory::Local);
        }
        // office_type absent, level=local still classifies as local.
        let office = Office {
            level: Some(Level::Local),
            ..Office::default()
        };
        assert_eq!(RaceCategory::classify(&office), RaceCategory::Local);
    }

    #[test]
    fn senate_without_cost_match_falls_back() {
        // U.S. Senate has no category of its own; without the House cost
        // marker it gets the base template only.
        let office = Office {
            office_type: Some(OfficeType::Senate),
            level: Some(Level::Federal),
            estimated_cost: Some("$5,000,000 - $50,000,000".to_owned()),
            ..Office::default()
        };
        assert_eq!(RaceCategory::classify(&office), RaceCategory::Fallback);
    }

    #[test]
    fn empty_office_falls_back() {
        assert_eq!(
            RaceCategory::classify(&Office::default()),
            RaceCategory::Fallback
        );
    }

    #[test]
    fn display_roundtrip() {
        let variants = [
            RaceCategory::FederalHouse,
            RaceCategory::StateLegislature,
            RaceCategory::Local,
            RaceCategory::Fallback,
        ];
        for v in &variants {
            let parsed: RaceCategory = v.to_string().parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }
}
