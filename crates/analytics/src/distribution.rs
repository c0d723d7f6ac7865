//! Corpus-wide distributions
//!
//! Citation summary statistics, the per-year histogram and journal
//! frequencies. Statistics over an empty set are `None`, never NaN.

use bibliosynth_common::model::Publication;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Summary of citation counts across all publications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationDistribution {
    pub count: usize,
    pub total: u64,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<u32>,
    pub max: Option<u32>,
    /// Number of distinct citation values
    pub distinct_values: usize,
}

impl CitationDistribution {
    pub fn from_counts(citations: &[u32]) -> Self {
        let mut sorted = citations.to_vec();
        sorted.sort_unstable();

        let count = sorted.len();
        let total: u64 = sorted.iter().map(|&c| u64::from(c)).sum();
        let mut distinct = sorted.clone();
        distinct.dedup();

        Self {
            count,
            total,
            mean: mean(total, count),
            median: median(&sorted),
            min: sorted.first().copied(),
            max: sorted.last().copied(),
            distinct_values: distinct.len(),
        }
    }

    pub fn from_publications(publications: &[Publication]) -> Self {
        let citations: Vec<u32> = publications.iter().map(|p| p.citations).collect();
        Self::from_counts(&citations)
    }
}

/// Mean of `count` values summing to `total`; `None` when empty
pub fn mean(total: u64, count: usize) -> Option<f64> {
    (count > 0).then(|| total as f64 / count as f64)
}

/// Median of already sorted values; `None` when empty
pub fn median(sorted: &[u32]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(f64::from(sorted[n / 2])),
        _ => Some((f64::from(sorted[n / 2 - 1]) + f64::from(sorted[n / 2])) / 2.0),
    }
}

/// Value -> frequency table of citation counts
pub fn citation_frequencies(publications: &[Publication]) -> BTreeMap<u32, usize> {
    let mut freq = BTreeMap::new();
    for p in publications {
        *freq.entry(p.citations).or_insert(0) += 1;
    }
    freq
}

/// Publications and citations for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBucket {
    pub year: i32,
    pub publications: usize,
    pub total_citations: u64,
    pub mean_citations: Option<f64>,
}

/// Per-year publication counts in ascending year order
pub fn year_histogram(publications: &[Publication]) -> Vec<YearBucket> {
    let mut years: BTreeMap<i32, (usize, u64)> = BTreeMap::new();
    for p in publications {
        let entry = years.entry(p.year).or_default();
        entry.0 += 1;
        entry.1 += u64::from(p.citations);
    }

    years
        .into_iter()
        .map(|(year, (publications, total_citations))| YearBucket {
            year,
            publications,
            total_citations,
            mean_citations: mean(total_citations, publications),
        })
        .collect()
}

/// How often a journal appears
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalCount {
    pub journal: String,
    pub publications: usize,
}

/// Journal frequencies, most frequent first, ties by name
pub fn journal_frequency(publications: &[Publication]) -> Vec<JournalCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for p in publications {
        *counts.entry(p.journal.as_str()).or_insert(0) += 1;
    }

    let mut table: Vec<JournalCount> = counts
        .into_iter()
        .map(|(journal, publications)| JournalCount {
            journal: journal.to_string(),
            publications,
        })
        .collect();
    table.sort_by(|a, b| {
        b.publications
            .cmp(&a.publications)
            .then_with(|| a.journal.cmp(&b.journal))
    });
    table
}
