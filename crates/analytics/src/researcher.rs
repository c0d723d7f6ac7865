//! Per-researcher aggregates and ranking

use bibliosynth_common::model::{Corpus, ResearcherId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::distribution::mean;
use crate::hindex::h_index;

/// Aggregate record for one researcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearcherMetrics {
    pub researcher_id: ResearcherId,
    pub name: String,
    pub discipline: String,
    pub career_start: i32,
    pub publication_count: usize,
    pub total_citations: u64,
    pub h_index: u32,
    pub mean_citations: Option<f64>,
    pub max_citations: Option<u32>,
    pub min_citations: Option<u32>,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub distinct_journals: usize,
    pub distinct_co_authors: usize,
}

impl ResearcherMetrics {
    /// `first-last` publication years, or `N/A`
    pub fn year_range(&self) -> String {
        match (self.first_year, self.last_year) {
            (Some(first), Some(last)) => format!("{first}-{last}"),
            _ => "N/A".to_string(),
        }
    }
}

#[derive(Default)]
struct Accumulator<'a> {
    citations: Vec<u32>,
    years: Vec<i32>,
    journals: BTreeSet<&'a str>,
    co_authors: BTreeSet<ResearcherId>,
}

/// Aggregate every researcher in the pool, including those without papers.
///
/// The corpus is assumed valid; authors missing from the pool are skipped.
pub fn researcher_metrics(corpus: &Corpus) -> BTreeMap<ResearcherId, ResearcherMetrics> {
    let mut acc: BTreeMap<ResearcherId, Accumulator<'_>> = corpus
        .researchers
        .iter()
        .map(|r| (r.id, Accumulator::default()))
        .collect();

    for p in &corpus.publications {
        for author in &p.authors {
            let Some(entry) = acc.get_mut(author) else {
                continue;
            };
            entry.citations.push(p.citations);
            entry.years.push(p.year);
            entry.journals.insert(p.journal.as_str());
            entry
                .co_authors
                .extend(p.authors.iter().filter(|a| *a != author).copied());
        }
    }

    corpus
        .researchers
        .iter()
        .map(|r| {
            let a = acc.remove(&r.id).unwrap_or_default();
            let total: u64 = a.citations.iter().map(|&c| u64::from(c)).sum();
            let metrics = ResearcherMetrics {
                researcher_id: r.id,
                name: r.name.clone(),
                discipline: r.discipline.clone(),
                career_start: r.career_start,
                publication_count: a.citations.len(),
                total_citations: total,
                h_index: h_index(&a.citations),
                mean_citations: mean(total, a.citations.len()),
                max_citations: a.citations.iter().max().copied(),
                min_citations: a.citations.iter().min().copied(),
                first_year: a.years.iter().min().copied(),
                last_year: a.years.iter().max().copied(),
                distinct_journals: a.journals.len(),
                distinct_co_authors: a.co_authors.len(),
            };
            (r.id, metrics)
        })
        .collect()
}

/// Ranking order: H-index desc, total citations desc, researcher id asc
pub fn ranking_order(a: &ResearcherMetrics, b: &ResearcherMetrics) -> Ordering {
    b.h_index
        .cmp(&a.h_index)
        .then_with(|| b.total_citations.cmp(&a.total_citations))
        .then_with(|| a.researcher_id.cmp(&b.researcher_id))
}

/// The `n` best researchers by [`ranking_order`]
pub fn top_researchers<'a, I>(metrics: I, n: usize) -> Vec<ResearcherMetrics>
where
    I: IntoIterator<Item = &'a ResearcherMetrics>,
{
    let mut ranked: Vec<ResearcherMetrics> = metrics.into_iter().cloned().collect();
    ranked.sort_by(ranking_order);
    ranked.truncate(n);
    ranked
}
