//! Publication entity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ResearcherId;
use crate::errors::AppError;

/// Publication identifier, rendered as `P00001`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PublicationId(pub u32);

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{:05}", self.0)
    }
}

impl FromStr for PublicationId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse_prefixed(s, 'P', "publication").map(PublicationId)
    }
}

impl From<PublicationId> for String {
    fn from(id: PublicationId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for PublicationId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A synthetic publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub id: PublicationId,

    pub title: String,

    /// Author list, lead author first
    pub authors: Vec<ResearcherId>,

    pub year: i32,

    pub journal: String,

    pub citations: u32,
}

impl Publication {
    /// The first listed author
    pub fn lead_author(&self) -> Option<ResearcherId> {
        self.authors.first().copied()
    }

    /// Number of co-authors alongside any one author
    pub fn co_author_count(&self) -> usize {
        self.authors.len().saturating_sub(1)
    }

    /// Whether the researcher appears in the author list
    pub fn has_author(&self, id: ResearcherId) -> bool {
        self.authors.contains(&id)
    }
}
