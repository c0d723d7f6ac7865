//! Chart rendering with the plotters bitmap backend
//!
//! Data preparation is kept in plain functions so it can be tested without
//! a font stack; the `draw_*` functions only lay the prepared data out.

use bibliosynth_analytics::network::{CoauthorshipGraph, CollaborationRank};
use bibliosynth_analytics::{JournalCount, MetricsSnapshot, ResearcherMetrics, YearBucket};
use bibliosynth_common::errors::{AppError, Result};
use bibliosynth_common::model::{Corpus, ResearcherId};
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::error::Error;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

type DrawResult = std::result::Result<(), Box<dyn Error>>;

pub const CITATIONS_DISTRIBUTION: &str = "citations_distribution";
pub const RESEARCHER_PRODUCTIVITY: &str = "researcher_productivity";
pub const CITATIONS_VS_COAUTHORS: &str = "citations_vs_coauthors";
pub const PUBLICATION_TRENDS: &str = "publication_trends";
pub const JOURNAL_DISTRIBUTION: &str = "journal_distribution";
pub const COAUTHORSHIP_NETWORK: &str = "coauthorship_network";

const HISTOGRAM_BINS: usize = 50;
const ANNOTATED_RESEARCHERS: usize = 5;
const CHARTED_JOURNALS: usize = 15;
const NETWORK_NODES: usize = 40;
const JOURNAL_LABEL_WIDTH: usize = 18;

/// One histogram bar covering `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Split `values` into at most `bins` equal-width bins over `0..=max`.
///
/// Small ranges get one bin per integer value instead.
pub fn histogram(values: &[u32], bins: usize) -> Vec<HistogramBin> {
    let Some(&max) = values.iter().max() else {
        return Vec::new();
    };
    let span = f64::from(max) + 1.0;
    let bins = bins.clamp(1, max as usize + 1);
    let width = span / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = ((f64::from(v) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: i as f64 * width,
            end: (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// `(co-author count, citations)` for every publication
pub fn coauthor_points(corpus: &Corpus) -> Vec<(u32, u32)> {
    corpus
        .publications
        .iter()
        .map(|p| (p.co_author_count() as u32, p.citations))
        .collect()
}

/// `n` points evenly spaced on the unit circle, starting at the top
pub fn circular_layout(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let angle = PI / 2.0 - 2.0 * PI * i as f64 / n as f64;
            (angle.cos(), angle.sin())
        })
        .collect()
}

/// Shorten a label to `max` characters, marking the cut with `..`
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let kept: String = label.chars().take(max.saturating_sub(2)).collect();
    format!("{kept}..")
}

/// Subgraph drawn in the network chart
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkLayout {
    /// Researcher, position, centrality score
    pub nodes: Vec<(ResearcherId, (f64, f64), f64)>,

    /// Endpoint positions and shared publication count
    pub edges: Vec<((f64, f64), (f64, f64), u32)>,

    pub max_weight: u32,
}

/// Place the `limit` most central researchers on a circle and keep the
/// edges between them.
pub fn network_layout(graph: &CoauthorshipGraph, limit: usize) -> NetworkLayout {
    let central = CollaborationRank::default().rank(graph, limit);
    let positions = circular_layout(central.len());

    let placed: BTreeMap<ResearcherId, (f64, f64)> = central
        .iter()
        .zip(&positions)
        .map(|(c, &pos)| (c.researcher_id, pos))
        .collect();

    let edges: Vec<_> = graph
        .edges()
        .filter_map(|e| Some((*placed.get(&e.a)?, *placed.get(&e.b)?, e.weight)))
        .collect();

    NetworkLayout {
        nodes: central
            .iter()
            .zip(positions)
            .map(|(c, pos)| (c.researcher_id, pos, c.score))
            .collect(),
        max_weight: edges.iter().map(|&(_, _, w)| w).max().unwrap_or(0),
        edges,
    }
}

fn draw_citation_histogram(out: &Path, citations: &[u32]) -> DrawResult {
    let bins = histogram(citations, HISTOGRAM_BINS);
    let x_max = bins.last().map(|b| b.end).unwrap_or(1.0);
    let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;

    let root = BitMapBackend::new(out, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of Citations per Paper", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..(y_max * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Number of Citations")
        .y_desc("Number of Papers")
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BLUE.mix(0.6).filled())
    }))?;

    root.present()?;
    Ok(())
}

fn draw_productivity(out: &Path, researchers: &[&ResearcherMetrics], top: &[ResearcherMetrics]) -> DrawResult {
    let x_max = researchers.iter().map(|m| m.publication_count).max().unwrap_or(0).max(1) as f64;
    let y_max = researchers.iter().map(|m| m.total_citations).max().unwrap_or(0).max(1) as f64;

    let root = BitMapBackend::new(out, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Researcher Productivity vs Impact", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..(x_max * 1.1), 0.0..(y_max * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Number of Publications")
        .y_desc("Total Citations")
        .draw()?;

    chart.draw_series(researchers.iter().map(|m| {
        Circle::new(
            (m.publication_count as f64, m.total_citations as f64),
            4,
            BLUE.mix(0.5).filled(),
        )
    }))?;

    for m in top.iter().take(ANNOTATED_RESEARCHERS) {
        let at = (m.publication_count as f64, m.total_citations as f64);
        chart.draw_series(std::iter::once(Circle::new(at, 5, RED.filled())))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("{} (h={})", m.researcher_id, m.h_index),
            at,
            ("sans-serif", 14).into_font(),
        )))?;
    }

    root.present()?;
    Ok(())
}

fn draw_coauthor_scatter(out: &Path, points: &[(u32, u32)]) -> DrawResult {
    let x_max = points.iter().map(|&(x, _)| x).max().unwrap_or(0).max(1) as f64;
    let y_max = points.iter().map(|&(_, y)| y).max().unwrap_or(0).max(1) as f64;

    let root = BitMapBackend::new(out, (1000, 700)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Citations vs Number of Co-authors", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(x_max + 0.5), 0.0..(y_max * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Number of Co-authors")
        .y_desc("Number of Citations")
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((f64::from(x), f64::from(y)), 3, RED.mix(0.4).filled())),
    )?;

    root.present()?;
    Ok(())
}

fn draw_trends(out: &Path, years: &[YearBucket]) -> DrawResult {
    let first = years.first().map(|y| y.year).unwrap_or(0);
    let last = years.last().map(|y| y.year).unwrap_or(first);
    let papers_max = years.iter().map(|y| y.publications).max().unwrap_or(0).max(1) as f64;
    let mean_max = years
        .iter()
        .filter_map(|y| y.mean_citations)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(out, (1200, 1000)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 1));

    let mut papers = ChartBuilder::on(&panels[0])
        .caption("Publications per Year", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(first..(last + 1), 0.0..(papers_max * 1.1))?;
    papers
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Number of Publications")
        .draw()?;
    papers.draw_series(LineSeries::new(
        years.iter().map(|y| (y.year, y.publications as f64)),
        &BLUE,
    ))?;
    papers.draw_series(
        years
            .iter()
            .map(|y| Circle::new((y.year, y.publications as f64), 3, BLUE.filled())),
    )?;

    let mut impact = ChartBuilder::on(&panels[1])
        .caption("Average Citations per Paper by Year", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(first..(last + 1), 0.0..(mean_max * 1.1))?;
    impact
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Average Citations")
        .draw()?;
    let means: Vec<(i32, f64)> = years
        .iter()
        .filter_map(|y| y.mean_citations.map(|m| (y.year, m)))
        .collect();
    impact.draw_series(LineSeries::new(means.iter().copied(), &RED))?;
    impact.draw_series(means.iter().map(|&p| Circle::new(p, 3, RED.filled())))?;

    root.present()?;
    Ok(())
}

fn draw_journals(out: &Path, journals: &[JournalCount]) -> DrawResult {
    let shown: Vec<&JournalCount> = journals.iter().take(CHARTED_JOURNALS).collect();
    let labels: Vec<String> = shown
        .iter()
        .map(|j| truncate_label(&j.journal, JOURNAL_LABEL_WIDTH))
        .collect();
    let y_max = shown.iter().map(|j| j.publications).max().unwrap_or(0).max(1) as f64;
    let n = shown.len().max(1);

    let root = BitMapBackend::new(out, (1400, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Top Journals by Publication Count", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..(y_max * 1.1))?;

    let label_at = |v: &f64| {
        let idx = v.round();
        if (v - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    };
    chart
        .configure_mesh()
        .x_labels(n)
        .x_label_formatter(&label_at)
        .x_desc("Journal")
        .y_desc("Number of Publications")
        .draw()?;

    chart.draw_series(shown.iter().enumerate().map(|(i, j)| {
        let x = i as f64;
        Rectangle::new(
            [(x - 0.4, 0.0), (x + 0.4, j.publications as f64)],
            GREEN.mix(0.7).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_network(out: &Path, layout: &NetworkLayout) -> DrawResult {
    let root = BitMapBackend::new(out, (1000, 1000)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Co-authorship Network (most central researchers)", ("sans-serif", 20))
        .margin(20)
        .build_cartesian_2d(-1.3..1.3, -1.3..1.3)?;

    let max_weight = f64::from(layout.max_weight.max(1));
    for &(from, to, weight) in &layout.edges {
        let strength = f64::from(weight) / max_weight;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![from, to],
            BLACK.mix(0.1 + 0.5 * strength).stroke_width(1 + (3.0 * strength) as u32),
        )))?;
    }

    for &(id, (x, y), score) in &layout.nodes {
        let radius = 3 + (score * 12.0) as i32;
        chart.draw_series(std::iter::once(Circle::new((x, y), radius, BLUE.mix(0.8).filled())))?;
        chart.draw_series(std::iter::once(Text::new(
            id.to_string(),
            (x * 1.12 - 0.06, y * 1.12),
            ("sans-serif", 12).into_font(),
        )))?;
    }

    root.present()?;
    Ok(())
}

/// Render into a hidden sibling that keeps the `.png` extension, then rename
fn render_to<F>(dir: &Path, chart: &str, draw: F) -> Result<PathBuf>
where
    F: FnOnce(&Path) -> DrawResult,
{
    let path = dir.join(format!("{chart}.png"));
    let partial = dir.join(format!(".{chart}.partial.png"));
    let started = Instant::now();

    draw(&partial).map_err(|e| {
        let _ = std::fs::remove_file(&partial);
        AppError::Render {
            chart: chart.to_string(),
            message: e.to_string(),
        }
    })?;
    std::fs::rename(&partial, &path).map_err(|e| AppError::io(&path, e))?;

    debug!(
        chart,
        path = %path.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Chart rendered"
    );
    Ok(path)
}

/// Render every chart into `dir`, returning the written paths in a fixed order
pub fn render_all(dir: &Path, corpus: &Corpus, snapshot: &MetricsSnapshot) -> Result<Vec<PathBuf>> {
    let started = Instant::now();
    std::fs::create_dir_all(dir).map_err(|e| AppError::io(dir, e))?;

    let citations: Vec<u32> = corpus.publications.iter().map(|p| p.citations).collect();
    let researchers: Vec<&ResearcherMetrics> = snapshot.researchers.values().collect();
    let coauthors = coauthor_points(corpus);
    let layout = network_layout(&CoauthorshipGraph::from_corpus(corpus), NETWORK_NODES);

    let paths = vec![
        render_to(dir, CITATIONS_DISTRIBUTION, |out| {
            draw_citation_histogram(out, &citations)
        })?,
        render_to(dir, RESEARCHER_PRODUCTIVITY, |out| {
            draw_productivity(out, &researchers, &snapshot.top_researchers)
        })?,
        render_to(dir, CITATIONS_VS_COAUTHORS, |out| {
            draw_coauthor_scatter(out, &coauthors)
        })?,
        render_to(dir, PUBLICATION_TRENDS, |out| draw_trends(out, &snapshot.years))?,
        render_to(dir, JOURNAL_DISTRIBUTION, |out| {
            draw_journals(out, &snapshot.journals)
        })?,
        render_to(dir, COAUTHORSHIP_NETWORK, |out| draw_network(out, &layout))?,
    ];

    info!(
        charts = paths.len(),
        dir = %dir.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Charts rendered"
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibliosynth_common::model::{Publication, PublicationId, Researcher};

    fn r(id: u32) -> ResearcherId {
        ResearcherId(id)
    }

    /// 20 researchers, 100 papers with 1-4 authors spread over 2000-2019
    fn sample_corpus() -> Corpus {
        let journals = ["Physical Review Letters", "Nature Physics", "Annals of Physics"];
        let researchers = (1..=20)
            .map(|id| Researcher {
                id: r(id),
                name: format!("Researcher {id}"),
                discipline: "Physics".into(),
                career_start: 1990,
            })
            .collect();
        let publications = (0..100u32)
            .map(|n| {
                let lead = n % 20 + 1;
                let authors = (0..(n % 4 + 1)).map(|k| r((lead + k * 3 - 1) % 20 + 1)).collect();
                Publication {
                    id: PublicationId(n + 1),
                    title: format!("Paper {n}"),
                    authors,
                    year: 2000 + (n % 20) as i32,
                    journal: journals[(n % 3) as usize].into(),
                    citations: (n * 7) % 45,
                }
            })
            .collect();
        Corpus::new(researchers, publications)
    }

    #[test]
    fn test_render_all_writes_every_chart() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = sample_corpus();
        let snapshot = MetricsSnapshot::compute(&corpus, 10).unwrap();

        let paths = match render_all(dir.path(), &corpus, &snapshot) {
            Ok(paths) => paths,
            // Text rendering needs a system font; nothing else may fail
            Err(AppError::Render { message, .. }) if message.to_lowercase().contains("font") => {
                eprintln!("skipping chart rendering, no usable font: {message}");
                return;
            }
            Err(e) => panic!("chart rendering failed: {e}"),
        };

        let expected = [
            CITATIONS_DISTRIBUTION,
            RESEARCHER_PRODUCTIVITY,
            CITATIONS_VS_COAUTHORS,
            PUBLICATION_TRENDS,
            JOURNAL_DISTRIBUTION,
            COAUTHORSHIP_NETWORK,
        ];
        assert_eq!(paths.len(), expected.len());
        for (path, chart) in paths.iter().zip(expected) {
            assert_eq!(*path, dir.path().join(format!("{chart}.png")));
            assert!(std::fs::metadata(path).unwrap().len() > 0, "{chart} is empty");
        }

        // Only the final names remain
        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 6);
        assert!(names.iter().all(|n| !n.contains(".partial")));
    }

    #[test]
    fn test_histogram_bins_cover_all_values() {
        let values = [0, 1, 5, 99, 100, 100];
        let bins = histogram(&values, 50);

        assert_eq!(bins.len(), 50);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].start, 0.0);
        assert!((bins[49].end - 101.0).abs() < 1e-9);
        assert_eq!(bins[49].count, 3);
    }

    #[test]
    fn test_histogram_small_range() {
        let bins = histogram(&[0, 0, 2], 50);
        assert_eq!(bins.len(), 3);
        assert_eq!(
            bins.iter().map(|b| b.count).collect::<Vec<_>>(),
            vec![2, 0, 1]
        );
    }

    #[test]
    fn test_histogram_empty() {
        assert!(histogram(&[], 10).is_empty());
    }

    #[test]
    fn test_circular_layout() {
        let points = circular_layout(4);
        assert_eq!(points.len(), 4);
        assert!((points[0].0).abs() < 1e-9 && (points[0].1 - 1.0).abs() < 1e-9);
        for (x, y) in points {
            assert!(((x * x + y * y) - 1.0).abs() < 1e-9);
        }
        assert!(circular_layout(0).is_empty());
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Nature", 18), "Nature");
        assert_eq!(truncate_label("Journal of Applied Physics", 10), "Journal ..");
    }

    #[test]
    fn test_network_layout_keeps_edges_between_placed_nodes() {
        let mut graph = CoauthorshipGraph::new();
        // Hub 1 with three spokes, plus a detached pair
        graph.add_collaboration(r(1), r(2));
        graph.add_collaboration(r(1), r(2));
        graph.add_collaboration(r(1), r(3));
        graph.add_collaboration(r(1), r(4));
        graph.add_collaboration(r(8), r(9));

        let layout = network_layout(&graph, 3);
        assert_eq!(layout.nodes.len(), 3);
        assert_eq!(layout.nodes[0].0, r(1));
        assert!(layout.edges.len() <= 2);
        assert!(layout.edges.iter().all(|&(_, _, w)| w <= layout.max_weight));

        let full = network_layout(&graph, 10);
        assert_eq!(full.nodes.len(), 6);
        assert_eq!(full.edges.len(), 4);
        assert_eq!(full.max_weight, 2);
    }
}
