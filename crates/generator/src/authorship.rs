//! Co-author selection with collaboration clustering
//!
//! Researchers are addressed by their index in the pool. Collaborator sets
//! are ordered so that a given seed always yields the same author lists.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

/// Upper bound on draws per requested author before settling for fewer
const ATTEMPTS_PER_SLOT: usize = 20;

/// Probability of drawing from the lead's discipline when not clustering
const SAME_DISCIPLINE_PROBABILITY: f64 = 0.5;

/// Running record of who has published with whom
pub struct CollaborationIndex {
    /// pool index -> pool indices of past co-authors
    collaborators: Vec<BTreeSet<usize>>,

    /// discipline -> pool indices
    by_discipline: BTreeMap<String, Vec<usize>>,

    /// discipline of each pool index
    disciplines: Vec<String>,

    clustering_bias: f64,
}

impl CollaborationIndex {
    /// Create an index over researchers with the given disciplines, in pool order
    pub fn new(disciplines: Vec<String>, clustering_bias: f64) -> Self {
        let mut by_discipline: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, discipline) in disciplines.iter().enumerate() {
            by_discipline.entry(discipline.clone()).or_default().push(idx);
        }

        Self {
            collaborators: vec![BTreeSet::new(); disciplines.len()],
            by_discipline,
            disciplines,
            clustering_bias: if clustering_bias.is_nan() {
                0.0
            } else {
                clustering_bias.clamp(0.0, 1.0)
            },
        }
    }

    pub fn pool_size(&self) -> usize {
        self.disciplines.len()
    }

    /// Past co-authors of a researcher
    pub fn collaborators_of(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.collaborators
            .get(idx)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Select up to `count` distinct authors, `lead` first.
    ///
    /// Each extra slot is filled from past collaborators of the authors chosen
    /// so far with probability `clustering_bias`, otherwise from the lead's
    /// discipline half of the time, otherwise uniformly from the pool. The
    /// list may be shorter than `count` when the pool runs dry, never empty.
    pub fn select_authors<R: Rng + ?Sized>(
        &self,
        lead: usize,
        count: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        let pool = self.pool_size();
        let target = count.clamp(1, pool.max(1));
        let mut chosen = vec![lead];

        let mut attempts = 0;
        while chosen.len() < target && attempts < target * ATTEMPTS_PER_SLOT {
            attempts += 1;

            let clustered = if rng.gen_bool(self.clustering_bias) {
                self.pick_collaborator(&chosen, rng)
            } else {
                None
            };
            let candidate = match clustered {
                Some(idx) => idx,
                None if rng.gen_bool(SAME_DISCIPLINE_PROBABILITY) => self
                    .pick_same_discipline(lead, rng)
                    .unwrap_or_else(|| rng.gen_range(0..pool)),
                None => rng.gen_range(0..pool),
            };

            if !chosen.contains(&candidate) {
                chosen.push(candidate);
            }
        }

        chosen
    }

    /// Record that every pair in `authors` has now collaborated
    pub fn record(&mut self, authors: &[usize]) {
        for (i, &a) in authors.iter().enumerate() {
            for &b in &authors[i + 1..] {
                self.collaborators[a].insert(b);
                self.collaborators[b].insert(a);
            }
        }
    }

    /// Collaborators of anyone already chosen, weighted by how many chosen
    /// authors they have worked with
    fn pick_collaborator<R: Rng + ?Sized>(&self, chosen: &[usize], rng: &mut R) -> Option<usize> {
        let candidates: Vec<usize> = chosen
            .iter()
            .flat_map(|&a| self.collaborators_of(a))
            .filter(|c| !chosen.contains(c))
            .collect();
        candidates.choose(rng).copied()
    }

    fn pick_same_discipline<R: Rng + ?Sized>(&self, lead: usize, rng: &mut R) -> Option<usize> {
        let discipline = self.disciplines.get(lead)?;
        self.by_discipline.get(discipline)?.choose(rng).copied()
    }
}
