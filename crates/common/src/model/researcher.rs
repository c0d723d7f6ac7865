//! Researcher entity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Researcher identifier, ordered numerically and rendered as `R0001`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ResearcherId(pub u32);

impl fmt::Display for ResearcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{:04}", self.0)
    }
}

impl FromStr for ResearcherId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse_prefixed(s, 'R', "researcher").map(ResearcherId)
    }
}

impl From<ResearcherId> for String {
    fn from(id: ResearcherId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for ResearcherId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A synthetic researcher. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Researcher {
    #[serde(rename = "researcher_id")]
    pub id: ResearcherId,

    pub name: String,

    /// Discipline name, one of the configured catalog entries
    pub discipline: String,

    /// First year the researcher could publish
    pub career_start: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_parse() {
        let id = ResearcherId(7);
        assert_eq!(id.to_string(), "R0007");
        assert_eq!("R0007".parse::<ResearcherId>().unwrap(), id);
        assert_eq!("R12345".parse::<ResearcherId>().unwrap(), ResearcherId(12345));
    }

    #[test]
    fn test_id_ordering_is_numeric() {
        let mut ids = vec![ResearcherId(10), ResearcherId(2), ResearcherId(33)];
        ids.sort();
        assert_eq!(ids, vec![ResearcherId(2), ResearcherId(10), ResearcherId(33)]);
    }

    #[test]
    fn test_malformed_id() {
        assert!("P0001".parse::<ResearcherId>().is_err());
        assert!("R".parse::<ResearcherId>().is_err());
        assert!("Rxyz".parse::<ResearcherId>().is_err());
    }
}
