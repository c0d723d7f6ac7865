//! Machine-readable metrics summary

use bibliosynth_analytics::MetricsSnapshot;
use bibliosynth_common::errors::Result;
use serde::Serialize;

use crate::RunInfo;

/// Document written to `metrics.json`
#[derive(Debug, Serialize)]
pub struct MetricsDocument<'a> {
    pub version: &'static str,
    pub run: &'a RunInfo,
    pub metrics: &'a MetricsSnapshot,
}

/// Pretty-printed JSON with a trailing newline
pub fn encode(snapshot: &MetricsSnapshot, run: &RunInfo) -> Result<Vec<u8>> {
    let document = MetricsDocument {
        version: bibliosynth_common::VERSION,
        run,
        metrics: snapshot,
    };
    let mut bytes = serde_json::to_vec_pretty(&document)?;
    bytes.push(b'\n');
    Ok(bytes)
}
