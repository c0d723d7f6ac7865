//! Corpus: the full researcher pool plus its publications

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{Publication, Researcher, ResearcherId};
use crate::errors::{AppError, Result};

/// Complete generated set of researchers and publications for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub researchers: Vec<Researcher>,
    pub publications: Vec<Publication>,
}

impl Corpus {
    pub fn new(researchers: Vec<Researcher>, publications: Vec<Publication>) -> Self {
        Self {
            researchers,
            publications,
        }
    }

    /// Build and validate in one step
    pub fn try_new(researchers: Vec<Researcher>, publications: Vec<Publication>) -> Result<Self> {
        let corpus = Self::new(researchers, publications);
        corpus.validate()?;
        Ok(corpus)
    }

    /// Lookup table from researcher id to record
    pub fn researcher_index(&self) -> HashMap<ResearcherId, &Researcher> {
        self.researchers.iter().map(|r| (r.id, r)).collect()
    }

    pub fn researcher(&self, id: ResearcherId) -> Option<&Researcher> {
        self.researchers.iter().find(|r| r.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.researchers.is_empty() && self.publications.is_empty()
    }

    /// Check every corpus invariant.
    ///
    /// - researcher and publication ids are unique
    /// - every author list is non-empty and free of duplicates
    /// - every author id exists in the researcher pool
    /// - no publication predates its earliest author's career start
    pub fn validate(&self) -> Result<()> {
        let index = self.researcher_index();
        if index.len() != self.researchers.len() {
            let mut seen = HashSet::new();
            if let Some(dup) = self.researchers.iter().find(|r| !seen.insert(r.id)) {
                return Err(AppError::DuplicateIdentifier {
                    entity: "researcher",
                    id: dup.id.to_string(),
                });
            }
        }

        let mut publication_ids = HashSet::with_capacity(self.publications.len());
        for publication in &self.publications {
            if !publication_ids.insert(publication.id) {
                return Err(AppError::DuplicateIdentifier {
                    entity: "publication",
                    id: publication.id.to_string(),
                });
            }

            if publication.authors.is_empty() {
                return Err(AppError::integrity(format!(
                    "publication {} has no authors",
                    publication.id
                )));
            }

            let mut authors = HashSet::with_capacity(publication.authors.len());
            let mut earliest_start = i32::MAX;
            for author in &publication.authors {
                if !authors.insert(*author) {
                    return Err(AppError::integrity(format!(
                        "publication {} lists author {} twice",
                        publication.id, author
                    )));
                }
                let researcher = index.get(author).ok_or_else(|| AppError::UnknownResearcher {
                    publication_id: publication.id.to_string(),
                    researcher_id: author.to_string(),
                })?;
                earliest_start = earliest_start.min(researcher.career_start);
            }

            if publication.year < earliest_start {
                return Err(AppError::integrity(format!(
                    "publication {} dated {} precedes earliest author career start {}",
                    publication.id, publication.year, earliest_start
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::model::PublicationId;

    fn researcher(id: u32, career_start: i32) -> Researcher {
        Researcher {
            id: ResearcherId(id),
            name: format!("Researcher {id}"),
            discipline: "Physics".into(),
            career_start,
        }
    }

    fn publication(id: u32, authors: &[u32], year: i32) -> Publication {
        Publication {
            id: PublicationId(id),
            title: format!("Paper {id}"),
            authors: authors.iter().copied().map(ResearcherId).collect(),
            year,
            journal: "Physical Review Letters".into(),
            citations: 3,
        }
    }

    #[test]
    fn test_valid_corpus() {
        let corpus = Corpus::try_new(
            vec![researcher(1, 2000), researcher(2, 2005)],
            vec![publication(1, &[1, 2], 2001), publication(2, &[2], 2010)],
        );
        assert!(corpus.is_ok());
    }

    #[test]
    fn test_unknown_researcher() {
        let err = Corpus::try_new(vec![researcher(1, 2000)], vec![publication(1, &[1, 9], 2010)])
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownResearcher { .. }));
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_duplicate_author() {
        let err = Corpus::try_new(vec![researcher(1, 2000)], vec![publication(1, &[1, 1], 2010)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_empty_author_list() {
        let err = Corpus::try_new(vec![researcher(1, 2000)], vec![publication(1, &[], 2010)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_year_before_career_start() {
        // Earliest author started in 2000, so 1999 is rejected but 2000 is fine
        let researchers = vec![researcher(1, 2000), researcher(2, 2010)];
        assert!(Corpus::try_new(researchers.clone(), vec![publication(1, &[1, 2], 2000)]).is_ok());
        let err = Corpus::try_new(researchers, vec![publication(1, &[1, 2], 1999)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_duplicate_ids() {
        let err = Corpus::try_new(vec![researcher(1, 2000), researcher(1, 2001)], vec![])
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateIdentifier { entity: "researcher", .. }));

        let err = Corpus::try_new(
            vec![researcher(1, 2000)],
            vec![publication(4, &[1], 2010), publication(4, &[1], 2011)],
        )
        .unwrap_err();
        assert!(matches!(err, AppError::DuplicateIdentifier { entity: "publication", .. }));
    }
}
