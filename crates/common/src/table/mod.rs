//! Flat corpus tables
//!
//! The corpus crosses stage boundaries as two CSV files:
//! - `publications.csv`: one row per publication, authors `;`-delimited
//! - `researchers.csv`: the researcher roster
//!
//! Negative citation cells and unknown author ids are rejected on read.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::artifact;
use crate::errors::{AppError, Result};
use crate::model::{Corpus, Publication, PublicationId, Researcher, ResearcherId};

/// File name of the publication table
pub const PUBLICATIONS_FILE: &str = "publications.csv";

/// File name of the researcher roster
pub const RESEARCHERS_FILE: &str = "researchers.csv";

/// Separator between author ids in the authors column
pub const AUTHOR_DELIMITER: char = ';';

/// One row of the publication table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationRow {
    pub publication_id: String,
    pub title: String,
    pub authors: String,
    pub year: i32,
    pub journal: String,
    /// Signed so that corrupt tables surface as integrity errors, not parse errors
    pub citations: i64,
}

impl From<&Publication> for PublicationRow {
    fn from(p: &Publication) -> Self {
        let authors = p
            .authors
            .iter()
            .map(ResearcherId::to_string)
            .collect::<Vec<_>>()
            .join(&AUTHOR_DELIMITER.to_string());

        Self {
            publication_id: p.id.to_string(),
            title: p.title.clone(),
            authors,
            year: p.year,
            journal: p.journal.clone(),
            citations: i64::from(p.citations),
        }
    }
}

impl TryFrom<PublicationRow> for Publication {
    type Error = AppError;

    fn try_from(row: PublicationRow) -> Result<Self> {
        let id: PublicationId = row.publication_id.parse()?;

        if row.citations < 0 {
            return Err(AppError::NegativeCitations {
                publication_id: id.to_string(),
                value: row.citations,
            });
        }
        let citations = u32::try_from(row.citations).map_err(|_| {
            AppError::integrity(format!(
                "publication {} citation count {} out of range",
                id, row.citations
            ))
        })?;

        let authors = row
            .authors
            .split(AUTHOR_DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<ResearcherId>)
            .collect::<Result<Vec<_>>>()?;

        Ok(Publication {
            id,
            title: row.title,
            authors,
            year: row.year,
            journal: row.journal,
            citations,
        })
    }
}

/// Locations and digest of a written corpus
#[derive(Debug, Clone)]
pub struct CorpusFiles {
    pub publications: PathBuf,
    pub researchers: PathBuf,
    /// SHA-256 of the publication table bytes
    pub publications_sha256: String,
}

fn to_csv_bytes<T: Serialize>(records: impl IntoIterator<Item = T>) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Csv(csv::Error::from(e.into_error())))
}

/// Encode the publication table without touching the filesystem
pub fn encode_publications(publications: &[Publication]) -> Result<Vec<u8>> {
    to_csv_bytes(publications.iter().map(PublicationRow::from))
}

/// Encode the researcher roster without touching the filesystem
pub fn encode_researchers(researchers: &[Researcher]) -> Result<Vec<u8>> {
    to_csv_bytes(researchers)
}

/// Write the publication table; returns its SHA-256
pub fn write_publications(path: &Path, publications: &[Publication]) -> Result<String> {
    let bytes = encode_publications(publications)?;
    artifact::write_atomic(path, &bytes)?;
    Ok(artifact::sha256_hex(&bytes))
}

pub fn write_researchers(path: &Path, researchers: &[Researcher]) -> Result<()> {
    let bytes = encode_researchers(researchers)?;
    artifact::write_atomic(path, &bytes)
}

/// Read the publication table, converting every row
pub fn read_publications(path: &Path) -> Result<Vec<Publication>> {
    let bytes = artifact::read(path)?;
    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let mut publications = Vec::new();
    for row in reader.deserialize::<PublicationRow>() {
        publications.push(Publication::try_from(row?)?);
    }
    debug!(path = %path.display(), rows = publications.len(), "Publication table read");
    Ok(publications)
}

pub fn read_researchers(path: &Path) -> Result<Vec<Researcher>> {
    let bytes = artifact::read(path)?;
    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let researchers = reader
        .deserialize::<Researcher>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    debug!(path = %path.display(), rows = researchers.len(), "Researcher roster read");
    Ok(researchers)
}

/// Write both corpus tables into `dir`
pub fn write_corpus(dir: &Path, corpus: &Corpus) -> Result<CorpusFiles> {
    let researchers = dir.join(RESEARCHERS_FILE);
    let publications = dir.join(PUBLICATIONS_FILE);

    write_researchers(&researchers, &corpus.researchers)?;
    let publications_sha256 = write_publications(&publications, &corpus.publications)?;

    info!(
        researchers = corpus.researchers.len(),
        publications = corpus.publications.len(),
        sha256 = %publications_sha256,
        dir = %dir.display(),
        "Corpus tables written"
    );

    Ok(CorpusFiles {
        publications,
        researchers,
        publications_sha256,
    })
}

/// Read both corpus tables from `dir` and validate the result
pub fn read_corpus(dir: &Path) -> Result<Corpus> {
    let researchers = read_researchers(&dir.join(RESEARCHERS_FILE))?;
    let publications = read_publications(&dir.join(PUBLICATIONS_FILE))?;
    Corpus::try_new(researchers, publications)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn sample_corpus() -> Corpus {
        let researchers = vec![
            Researcher {
                id: ResearcherId(1),
                name: "Ada Byron".into(),
                discipline: "Mathematics".into(),
                career_start: 1990,
            },
            Researcher {
                id: ResearcherId(2),
                name: "Alan Turing".into(),
                discipline: "Computer Science".into(),
                career_start: 1995,
            },
        ];
        let publications = vec![
            Publication {
                id: PublicationId(1),
                title: "On Computable Numbers, Revisited".into(),
                authors: vec![ResearcherId(2), ResearcherId(1)],
                year: 1999,
                journal: "Annals of Mathematics".into(),
                citations: 120,
            },
            Publication {
                id: PublicationId(2),
                title: "Notes on the Analytical Engine".into(),
                authors: vec![ResearcherId(1)],
                year: 1991,
                journal: "Journal of Number Theory".into(),
                citations: 0,
            },
        ];
        Corpus::new(researchers, publications)
    }

    #[test]
    fn test_publication_table_layout() {
        let bytes = encode_publications(&sample_corpus().publications).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("publication_id,title,authors,year,journal,citations")
        );
        assert_eq!(
            lines.next(),
            Some("P00001,\"On Computable Numbers, Revisited\",R0002;R0001,1999,Annals of Mathematics,120")
        );
    }

    #[test]
    fn test_researcher_table_layout() {
        let bytes = encode_researchers(&sample_corpus().researchers).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("researcher_id,name,discipline,career_start\nR0001,Ada Byron,Mathematics,1990\n"));
    }

    #[test]
    fn test_corpus_survives_disk() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = sample_corpus();

        let files = write_corpus(dir.path(), &corpus).unwrap();
        assert_eq!(files.publications_sha256.len(), 64);

        let loaded = read_corpus(dir.path()).unwrap();
        assert_eq!(loaded, corpus);
    }

    #[test]
    fn test_negative_citations_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = sample_corpus();
        write_corpus(dir.path(), &corpus).unwrap();

        let path = dir.path().join(PUBLICATIONS_FILE);
        let text = std::fs::read_to_string(&path).unwrap().replace(",120\n", ",-5\n");
        std::fs::write(&path, text).unwrap();

        let err = read_corpus(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::NegativeCitations { value: -5, .. }));
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
    }

    #[test]
    fn test_unknown_author_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path(), &sample_corpus()).unwrap();

        let path = dir.path().join(PUBLICATIONS_FILE);
        let text = std::fs::read_to_string(&path).unwrap().replace("R0002;R0001", "R0002;R0099");
        std::fs::write(&path, text).unwrap();

        let err = read_corpus(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::UnknownResearcher { .. }));
    }

    #[test]
    fn test_missing_table_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_corpus(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
