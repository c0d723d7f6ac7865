//! Collaboration centrality
//!
//! Weighted PageRank over the undirected co-authorship graph. A researcher's
//! score flows to co-authors in proportion to shared publications; isolated
//! researchers spread theirs evenly.

use super::{CentralResearcher, CoauthorshipGraph};
use bibliosynth_common::model::ResearcherId;
use std::collections::BTreeMap;

/// Collaboration rank configuration
#[derive(Debug, Clone)]
pub struct CollaborationRankConfig {
    /// Damping factor (typically 0.85)
    pub damping: f64,

    /// Maximum iterations
    pub max_iterations: usize,

    /// Convergence threshold
    pub epsilon: f64,
}

impl Default for CollaborationRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            epsilon: 1e-6,
        }
    }
}

/// Collaboration rank scorer
pub struct CollaborationRank {
    config: CollaborationRankConfig,
}

impl CollaborationRank {
    pub fn new(config: CollaborationRankConfig) -> Self {
        Self { config }
    }

    /// Compute scores for all researchers, normalized so the maximum is 1.0
    pub fn compute(&self, graph: &CoauthorshipGraph) -> BTreeMap<ResearcherId, f64> {
        let n = graph.node_count();
        if n == 0 {
            return BTreeMap::new();
        }

        let n_f64 = n as f64;
        let damping = self.config.damping;
        let teleport = (1.0 - damping) / n_f64;

        let nodes: Vec<ResearcherId> = graph.nodes().copied().collect();
        let mut scores: BTreeMap<ResearcherId, f64> =
            nodes.iter().map(|&id| (id, 1.0 / n_f64)).collect();

        // Precompute weighted degrees
        let strengths: BTreeMap<ResearcherId, f64> = nodes
            .iter()
            .map(|&id| (id, f64::from(graph.strength(id))))
            .collect();

        for _ in 0..self.config.max_iterations {
            let dangling: f64 = nodes
                .iter()
                .filter(|id| strengths[*id] == 0.0)
                .map(|id| scores[id])
                .sum();
            let dangling_share = damping * dangling / n_f64;

            let mut new_scores = BTreeMap::new();
            let mut max_diff: f64 = 0.0;

            for &node in &nodes {
                let inflow: f64 = graph
                    .neighbors(node)
                    .map(|(co_author, weight)| {
                        scores[&co_author] * f64::from(weight) / strengths[&co_author]
                    })
                    .sum();

                let new_score = teleport + dangling_share + damping * inflow;
                max_diff = max_diff.max((new_score - scores[&node]).abs());
                new_scores.insert(node, new_score);
            }

            scores = new_scores;

            if max_diff < self.config.epsilon {
                break;
            }
        }

        // Normalize to 0-1 range
        let max_score = scores.values().copied().fold(0.0f64, f64::max);
        if max_score > 0.0 {
            for score in scores.values_mut() {
                *score /= max_score;
            }
        }

        scores
    }

    /// Score and rank researchers; ties break by ascending id
    pub fn rank(&self, graph: &CoauthorshipGraph, limit: usize) -> Vec<CentralResearcher> {
        let scores = self.compute(graph);

        let mut ranked: Vec<CentralResearcher> = scores
            .iter()
            .map(|(&researcher_id, &score)| CentralResearcher {
                researcher_id,
                score,
                co_authors: graph.degree(researcher_id),
                shared_publications: graph.strength(researcher_id),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.researcher_id.cmp(&b.researcher_id))
        });

        ranked.truncate(limit);
        ranked
    }
}

impl Default for CollaborationRank {
    fn default() -> Self {
        Self::new(CollaborationRankConfig::default())
    }
}
