//! Tabular views of the catalog and of trial results (polars).

use std::io::Write;

use polars::prelude::*;

use crate::error::{PhazeError, Result};
use crate::features::round_to;
use crate::payload::AnalysisPayload;
use crate::therapy::TrialResult;

fn polars_err(e: PolarsError) -> PhazeError {
    PhazeError::Serialization(e.to_string())
}

/// One row per catalog entry, in declaration order.
pub fn catalog_frame() -> Result<DataFrame> {
    let catalog = crate::list_therapeutics();
    let names: Vec<&str> = catalog.iter().map(|t| t.name).collect();
    let kinds: Vec<&str> = catalog.iter().map(|t| crate::kind_to_str(t.kind())).collect();
    let targets: Vec<&str> = catalog.iter().map(|t| t.target).collect();
    let efficiency: Vec<Option<f64>> = catalog.iter().map(|t| t.efficiency()).collect();
    let class: Vec<String> = catalog.iter().map(|t| t.class().map(|c| c.to_string()).unwrap_or_default()).collect();

    df!(
        "name" => names,
        "type" => kinds,
        "target" => targets,
        "efficiency" => efficiency,
        "class" => class,
    )
    .map_err(polars_err)
}

/// Points added for the best-case clinical scenario.
pub const BEST_CASE_GAIN: f64 = 10.0;
/// Points lost in the worst-case clinical scenario.
pub const WORST_CASE_LOSS: f64 = 15.0;

/// `(best, realistic, worst)` outcomes around a success probability, within `[0, 100]`.
pub fn scenario_outcomes(success_prob: f64) -> (f64, f64, f64) {
    (
        round_to((success_prob + BEST_CASE_GAIN).min(100.0), 1),
        success_prob,
        round_to((success_prob - WORST_CASE_LOSS).max(0.0), 1),
    )
}

/// One row per trial result with its 1-based rank and scenario projections.
pub fn trials_frame(results: &[TrialResult]) -> Result<DataFrame> {
    let scenarios: Vec<_> = results.iter().map(|r| scenario_outcomes(r.success_prob)).collect();
    df!(
        "rank" => (1..=results.len() as u32).collect::<Vec<u32>>(),
        "type" => results.iter().map(|r| crate::kind_to_str(r.kind)).collect::<Vec<_>>(),
        "name" => results.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
        "target" => results.iter().map(|r| r.target.clone()).collect::<Vec<_>>(),
        "success_prob" => results.iter().map(|r| r.success_prob).collect::<Vec<_>>(),
        "best_case" => scenarios.iter().map(|s| s.0).collect::<Vec<_>>(),
        "realistic" => scenarios.iter().map(|s| s.1).collect::<Vec<_>>(),
        "worst_case" => scenarios.iter().map(|s| s.2).collect::<Vec<_>>(),
        "status" => results.iter().map(|r| r.status.to_string()).collect::<Vec<_>>(),
        "notes" => results.iter().map(|r| r.notes.clone()).collect::<Vec<_>>(),
    )
    .map_err(polars_err)
}

/// One summary row per analyzed record, for batch mode.
pub fn summary_frame(analyses: &[(String, AnalysisPayload)]) -> Result<DataFrame> {
    df!(
        "record" => analyses.iter().map(|(id, _)| id.clone()).collect::<Vec<_>>(),
        "length" => analyses.iter().map(|(_, p)| p.metadata.length as u64).collect::<Vec<_>>(),
        "gc_content" => analyses.iter().map(|(_, p)| p.metadata.gc_content).collect::<Vec<_>>(),
        "orf_count" => analyses.iter().map(|(_, p)| p.metadata.orf_count as u64).collect::<Vec<_>>(),
        "resistance_genes" => analyses.iter().map(|(_, p)| p.resistance_genes.len() as u64).collect::<Vec<_>>(),
        "crispr_status" => analyses.iter().map(|(_, p)| p.crispr_status.to_string()).collect::<Vec<_>>(),
        "risk_score" => analyses.iter().map(|(_, p)| p.risk_score).collect::<Vec<_>>(),
        "risk_level" => analyses.iter().map(|(_, p)| p.risk_level.clone()).collect::<Vec<_>>(),
        "top_therapeutic" => analyses.iter().map(|(_, p)| p.therapeutics.first().map(|t| t.name.clone()).unwrap_or_default()).collect::<Vec<_>>(),
    )
    .map_err(polars_err)
}

/// Write `df` as CSV with a header row.
pub fn write_csv<W: Write>(df: &mut DataFrame, w: W) -> Result<()> {
    CsvWriter::new(w).include_header(true).finish(df).map_err(polars_err)
}
