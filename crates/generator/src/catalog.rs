//! Discipline catalog
//!
//! Weighted discipline sampling and per-discipline journal lists, built once
//! from a validated generator configuration.

use bibliosynth_common::config::GeneratorConfig;
use bibliosynth_common::errors::{AppError, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// A discipline with its journal list
#[derive(Debug, Clone)]
pub struct DisciplineEntry {
    pub name: String,
    pub journals: Vec<String>,
}

/// Sampling view over the configured disciplines
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<DisciplineEntry>,
    weights: WeightedIndex<f64>,
}

impl Catalog {
    /// Build from configuration. Empty catalogs and zero weights are rejected.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        if config.disciplines.is_empty() {
            return Err(AppError::Configuration {
                message: "discipline catalog is empty".into(),
            });
        }

        if let Some(empty) = config.disciplines.iter().find(|d| d.journals.is_empty()) {
            return Err(AppError::Configuration {
                message: format!("journal catalog for {} is empty", empty.name),
            });
        }

        let weights = WeightedIndex::new(config.disciplines.iter().map(|d| d.weight))
            .map_err(|e| AppError::InvalidParameter {
                field: "disciplines.weight".into(),
                message: e.to_string(),
            })?;

        let entries = config
            .disciplines
            .iter()
            .map(|d| DisciplineEntry {
                name: d.name.clone(),
                journals: d.journals.clone(),
            })
            .collect();

        Ok(Self { entries, weights })
    }

    /// Draw a discipline according to the configured weights
    pub fn sample_discipline<R: Rng + ?Sized>(&self, rng: &mut R) -> &DisciplineEntry {
        &self.entries[self.weights.sample(rng)]
    }

    /// Draw a journal from the named discipline's catalog
    pub fn sample_journal<R: Rng + ?Sized>(&self, discipline: &str, rng: &mut R) -> Option<&str> {
        self.get(discipline)?
            .journals
            .choose(rng)
            .map(String::as_str)
    }

    pub fn get(&self, discipline: &str) -> Option<&DisciplineEntry> {
        self.entries.iter().find(|e| e.name == discipline)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
