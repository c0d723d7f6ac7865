//! Domain model
//!
//! Researchers, publications and the corpus that ties them together.

mod corpus;
mod publication;
mod researcher;

pub use corpus::Corpus;
pub use publication::{Publication, PublicationId};
pub use researcher::{Researcher, ResearcherId};

use crate::errors::{AppError, Result};

/// Parse a prefixed numeric identifier such as `R0042`
fn parse_prefixed(raw: &str, prefix: char, entity: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix(prefix)
        .ok_or_else(|| AppError::integrity(format!("malformed {entity} id '{trimmed}'")))?;
    digits
        .parse::<u32>()
        .map_err(|_| AppError::integrity(format!("malformed {entity} id '{trimmed}'")))
}
