//! Bibliosynth Analytics
//!
//! Metric calculator over a validated corpus:
//! - Per-researcher aggregates and H-index
//! - Citation distribution, year histogram, journal frequencies
//! - Top-N ranking with deterministic tie-breaks
//! - Co-authorship graph and collaboration centrality

pub mod distribution;
pub mod hindex;
pub mod network;
pub mod researcher;
pub mod snapshot;

pub use distribution::{CitationDistribution, JournalCount, YearBucket};
pub use hindex::h_index;
pub use network::{CentralResearcher, CoauthorshipGraph, NetworkSummary};
pub use researcher::{ranking_order, researcher_metrics, top_researchers, ResearcherMetrics};
pub use snapshot::{MetricsSnapshot, OverallStatistics};
