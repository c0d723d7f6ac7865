//! Complete metrics for one corpus

use bibliosynth_common::errors::Result;
use bibliosynth_common::model::{Corpus, ResearcherId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;
use tracing::info;

use crate::distribution::{
    citation_frequencies, journal_frequency, mean, year_histogram, CitationDistribution,
    JournalCount, YearBucket,
};
use crate::network::{CentralResearcher, CoauthorshipGraph, CollaborationRank, NetworkSummary};
use crate::researcher::{researcher_metrics, top_researchers, ResearcherMetrics};

/// Corpus-wide headline numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStatistics {
    pub total_researchers: usize,
    pub total_publications: usize,
    pub total_citations: u64,
    pub mean_citations_per_publication: Option<f64>,
    pub mean_publications_per_researcher: Option<f64>,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub distinct_journals: usize,
    pub mean_authors_per_publication: Option<f64>,
}

impl OverallStatistics {
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let publications = &corpus.publications;
        let total_citations: u64 = publications.iter().map(|p| u64::from(p.citations)).sum();
        let author_slots: u64 = publications.iter().map(|p| p.authors.len() as u64).sum();
        let journals: BTreeSet<&str> = publications.iter().map(|p| p.journal.as_str()).collect();

        Self {
            total_researchers: corpus.researchers.len(),
            total_publications: publications.len(),
            total_citations,
            mean_citations_per_publication: mean(total_citations, publications.len()),
            mean_publications_per_researcher: mean(
                publications.len() as u64,
                corpus.researchers.len(),
            ),
            first_year: publications.iter().map(|p| p.year).min(),
            last_year: publications.iter().map(|p| p.year).max(),
            distinct_journals: journals.len(),
            mean_authors_per_publication: mean(author_slots, publications.len()),
        }
    }

    /// `first-last` publication years, or `N/A`
    pub fn year_range(&self) -> String {
        match (self.first_year, self.last_year) {
            (Some(first), Some(last)) => format!("{first}-{last}"),
            _ => "N/A".to_string(),
        }
    }
}

/// Everything the report and chart renderers consume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub overall: OverallStatistics,
    pub citations: CitationDistribution,
    /// Citation value -> number of publications with it
    pub citation_frequencies: BTreeMap<u32, usize>,
    pub researchers: BTreeMap<ResearcherId, ResearcherMetrics>,
    pub top_researchers: Vec<ResearcherMetrics>,
    pub years: Vec<YearBucket>,
    pub journals: Vec<JournalCount>,
    pub network: NetworkSummary,
    pub central_researchers: Vec<CentralResearcher>,
}

impl MetricsSnapshot {
    /// Validate the corpus, then compute every metric.
    ///
    /// Fails with a data integrity error when the corpus breaks an invariant.
    pub fn compute(corpus: &Corpus, top_n: usize) -> Result<Self> {
        let started = Instant::now();
        corpus.validate()?;

        let researchers = researcher_metrics(corpus);
        let top = top_researchers(researchers.values(), top_n);
        let graph = CoauthorshipGraph::from_corpus(corpus);

        let snapshot = Self {
            overall: OverallStatistics::from_corpus(corpus),
            citations: CitationDistribution::from_publications(&corpus.publications),
            citation_frequencies: citation_frequencies(&corpus.publications),
            top_researchers: top,
            years: year_histogram(&corpus.publications),
            journals: journal_frequency(&corpus.publications),
            network: NetworkSummary::from_graph(&graph),
            central_researchers: CollaborationRank::default().rank(&graph, top_n),
            researchers,
        };

        info!(
            researchers = snapshot.researchers.len(),
            publications = snapshot.overall.total_publications,
            total_citations = snapshot.overall.total_citations,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Metrics computed"
        );

        Ok(snapshot)
    }

    /// Most frequent citation value, smallest value on ties
    pub fn modal_citations(&self) -> Option<(u32, usize)> {
        self.citation_frequencies
            .iter()
            .map(|(&value, &n)| (value, n))
            .fold(None, |best, (value, n)| match best {
                Some((_, best_n)) if best_n >= n => best,
                _ => Some((value, n)),
            })
    }

    /// Display name for a researcher id, falling back to the id itself
    pub fn name_of(&self, id: ResearcherId) -> String {
        self.researchers
            .get(&id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
