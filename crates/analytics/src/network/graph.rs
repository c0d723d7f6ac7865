//! Co-authorship graph representation
//!
//! Undirected, weighted by the number of shared publications.

use bibliosynth_common::model::{Corpus, ResearcherId};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Edge in the co-authorship graph, stored with `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoauthorEdge {
    pub a: ResearcherId,
    pub b: ResearcherId,

    /// Number of publications the two share
    pub weight: u32,
}

/// In-memory co-authorship graph
pub struct CoauthorshipGraph {
    /// Adjacency: researcher -> (co-author -> shared publications)
    adjacency: BTreeMap<ResearcherId, BTreeMap<ResearcherId, u32>>,

    /// All nodes, including researchers without collaborators
    nodes: BTreeSet<ResearcherId>,
}

impl CoauthorshipGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
            nodes: BTreeSet::new(),
        }
    }

    /// Build from a corpus: every researcher is a node, every author pair an edge
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut graph = Self::new();
        for r in &corpus.researchers {
            graph.add_node(r.id);
        }
        for p in &corpus.publications {
            for (i, &a) in p.authors.iter().enumerate() {
                for &b in &p.authors[i + 1..] {
                    graph.add_collaboration(a, b);
                }
            }
        }
        graph
    }

    pub fn add_node(&mut self, id: ResearcherId) {
        self.nodes.insert(id);
    }

    /// Record one shared publication between `a` and `b`
    pub fn add_collaboration(&mut self, a: ResearcherId, b: ResearcherId) {
        if a == b {
            return;
        }
        self.nodes.insert(a);
        self.nodes.insert(b);

        *self.adjacency.entry(a).or_default().entry(b).or_insert(0) += 1;
        *self.adjacency.entry(b).or_default().entry(a).or_insert(0) += 1;
    }

    /// Co-authors of a researcher with shared publication counts
    pub fn neighbors(&self, id: ResearcherId) -> impl Iterator<Item = (ResearcherId, u32)> + '_ {
        self.adjacency
            .get(&id)
            .into_iter()
            .flat_map(|m| m.iter().map(|(&n, &w)| (n, w)))
    }

    /// Number of distinct co-authors
    pub fn degree(&self, id: ResearcherId) -> usize {
        self.adjacency.get(&id).map(|m| m.len()).unwrap_or(0)
    }

    /// Sum of edge weights at a node
    pub fn strength(&self, id: ResearcherId) -> u32 {
        self.neighbors(id).map(|(_, w)| w).sum()
    }

    /// Shared publications between two researchers
    pub fn weight(&self, a: ResearcherId, b: ResearcherId) -> u32 {
        self.adjacency
            .get(&a)
            .and_then(|m| m.get(&b))
            .copied()
            .unwrap_or(0)
    }

    /// Get all nodes in ascending id order
    pub fn nodes(&self) -> impl Iterator<Item = &ResearcherId> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|m| m.len()).sum::<usize>() / 2
    }

    /// Each undirected edge once, ordered by `(a, b)`
    pub fn edges(&self) -> impl Iterator<Item = CoauthorEdge> + '_ {
        self.adjacency.iter().flat_map(|(&a, m)| {
            m.iter()
                .filter(move |&(&b, _)| a < b)
                .map(move |(&b, &weight)| CoauthorEdge { a, b, weight })
        })
    }

    /// Connected components, largest first, ties by smallest member id
    pub fn components(&self) -> Vec<Vec<ResearcherId>> {
        let mut visited = BTreeSet::new();
        let mut components = Vec::new();

        for &start in &self.nodes {
            if visited.contains(&start) {
                continue;
            }

            let mut component = Vec::new();
            let mut queue = VecDeque::from([start]);
            visited.insert(start);

            while let Some(current) = queue.pop_front() {
                component.push(current);
                for (neighbor, _) in self.neighbors(current) {
                    if visited.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }

            component.sort();
            components.push(component);
        }

        components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));
        components
    }
}

impl Default for CoauthorshipGraph {
    fn default() -> Self {
        Self::new()
    }
}
