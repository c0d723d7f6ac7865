//! Plain-text analysis report

use bibliosynth_analytics::MetricsSnapshot;
use std::fmt::Write;

use crate::RunInfo;

/// Journals listed in the report
const TOP_JOURNALS: usize = 10;

/// Render an optional statistic, `undefined` when absent
pub fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "undefined".to_string(),
    }
}

fn fmt_count<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "undefined".to_string())
}

fn heading(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "{title}:")?;
    writeln!(out, "{}", "-".repeat(title.len() + 1))
}

fn write_report(out: &mut String, snapshot: &MetricsSnapshot, run: &RunInfo) -> std::fmt::Result {
    writeln!(out, "RESEARCHER METRICS ANALYSIS REPORT")?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "seed: {}", run.seed)?;
    writeln!(out, "current_year: {}", run.current_year)?;
    writeln!(out, "researcher_count: {}", run.researcher_count)?;
    writeln!(out, "publication_count: {}", run.publication_count)?;
    if let Some(sha) = &run.table_sha256 {
        writeln!(out, "publications_sha256: {sha}")?;
    }

    let o = &snapshot.overall;
    heading(out, "Overall Statistics")?;
    writeln!(out, "total_researchers: {}", o.total_researchers)?;
    writeln!(out, "total_papers: {}", o.total_publications)?;
    writeln!(out, "total_citations: {}", o.total_citations)?;
    writeln!(out, "avg_citations_per_paper: {}", fmt_stat(o.mean_citations_per_publication))?;
    writeln!(out, "avg_papers_per_researcher: {}", fmt_stat(o.mean_publications_per_researcher))?;
    writeln!(out, "publication_year_range: {}", o.year_range())?;
    writeln!(out, "unique_journals: {}", o.distinct_journals)?;
    writeln!(out, "avg_authors_per_paper: {}", fmt_stat(o.mean_authors_per_publication))?;

    let c = &snapshot.citations;
    heading(out, "Citation Distribution")?;
    writeln!(out, "count: {}", c.count)?;
    writeln!(out, "mean: {}", fmt_stat(c.mean))?;
    writeln!(out, "median: {}", fmt_stat(c.median))?;
    writeln!(out, "min: {}", fmt_count(c.min))?;
    writeln!(out, "max: {}", fmt_count(c.max))?;
    writeln!(out, "distinct_values: {}", c.distinct_values)?;
    match snapshot.modal_citations() {
        Some((value, n)) => writeln!(out, "most_common: {value} ({n} papers)")?,
        None => writeln!(out, "most_common: undefined")?,
    }

    heading(out, "Top Researchers by H-index")?;
    for m in &snapshot.top_researchers {
        writeln!(
            out,
            "Researcher {} ({}): H-index = {}, Papers = {}, Total Citations = {}, Years: {}",
            m.researcher_id,
            m.name,
            m.h_index,
            m.publication_count,
            m.total_citations,
            m.year_range()
        )?;
    }

    let n = &snapshot.network;
    heading(out, "Co-authorship Network")?;
    writeln!(out, "collaborating_pairs: {}", n.collaborations)?;
    writeln!(out, "isolated_researchers: {}", n.isolated_researchers)?;
    writeln!(out, "components: {}", n.components)?;
    writeln!(out, "largest_component: {}", n.largest_component)?;
    writeln!(out, "avg_co_authors_per_researcher: {}", fmt_stat(n.mean_co_authors))?;
    writeln!(out, "Most central collaborators:")?;
    for c in &snapshot.central_researchers {
        writeln!(
            out,
            "  {} ({}): centrality = {:.3}, co-authors = {}, shared papers = {}",
            c.researcher_id,
            snapshot.name_of(c.researcher_id),
            c.score,
            c.co_authors,
            c.shared_publications
        )?;
    }

    heading(out, "Publication Year Distribution")?;
    for y in &snapshot.years {
        writeln!(
            out,
            "{}: {} papers (mean {} citations)",
            y.year,
            y.publications,
            fmt_stat(y.mean_citations)
        )?;
    }

    heading(out, "Top Journals by Publication Count")?;
    for j in snapshot.journals.iter().take(TOP_JOURNALS) {
        writeln!(out, "{}: {} papers", j.journal, j.publications)?;
    }

    Ok(())
}

/// Render the full report text
pub fn render(snapshot: &MetricsSnapshot, run: &RunInfo) -> String {
    let mut out = String::new();
    write_report(&mut out, snapshot, run).expect("writing to a String is infallible");
    out
}
