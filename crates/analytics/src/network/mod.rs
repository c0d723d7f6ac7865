//! Co-authorship network analysis
//!
//! Builds the researcher collaboration graph and scores collaboration
//! centrality with a PageRank-style propagation.

mod graph;
mod rank;

pub use graph::{CoauthorEdge, CoauthorshipGraph};
pub use rank::{CollaborationRank, CollaborationRankConfig};

use bibliosynth_common::model::ResearcherId;
use serde::{Deserialize, Serialize};

/// Researcher with collaboration centrality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralResearcher {
    pub researcher_id: ResearcherId,

    /// Centrality score (0.0 - 1.0)
    pub score: f64,

    /// Number of distinct co-authors
    pub co_authors: usize,

    /// Sum of shared publications over all co-authors
    pub shared_publications: u32,
}

/// Graph-level summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub researchers: usize,
    pub collaborations: usize,
    pub isolated_researchers: usize,
    pub components: usize,
    pub largest_component: usize,
    pub mean_co_authors: Option<f64>,
}

impl NetworkSummary {
    pub fn from_graph(graph: &CoauthorshipGraph) -> Self {
        let components = graph.components();
        let researchers = graph.node_count();
        let degree_sum: usize = graph.nodes().map(|&id| graph.degree(id)).sum();

        Self {
            researchers,
            collaborations: graph.edge_count(),
            isolated_researchers: graph.nodes().filter(|&&id| graph.degree(id) == 0).count(),
            components: components.len(),
            largest_component: components.first().map(Vec::len).unwrap_or(0),
            mean_co_authors: (researchers > 0).then(|| degree_sum as f64 / researchers as f64),
        }
    }
}
