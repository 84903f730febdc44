//! Feature providers: the per-sequence signals the pipeline aggregates.
//!
//! [`FeatureProvider`] is the seam between the orchestrator and whatever
//! computes statistics, ORFs, CRISPR presence, resistance and virulence calls,
//! and risk scores. Providers are pure: the same input yields the same output,
//! and calls share no state, so the orchestrator may run independent calls
//! concurrently.
//!
//! [`BuiltinProviders`] is the default implementation; each signal lives in its
//! own submodule.

pub mod crispr;
pub mod orf;
pub mod resistance;
pub mod risk;
pub mod stats;
pub mod virulence;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::Config;
use crate::detect::SignatureScanner;
use crate::data::markers::{RESISTANCE_MARKERS, VIRULENCE_MARKERS};
use crate::error::Result;

/// Length and GC content of the cleaned sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceStats {
    pub length: usize,
    /// Percentage in `[0, 100]`.
    pub gc_content: f64,
}

/// Open reading frames in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrfResult {
    pub orfs: Vec<String>,
    pub orf_count: usize,
}

impl OrfResult {
    pub fn new(orfs: Vec<String>) -> Self {
        let orf_count = orfs.len();
        Self { orfs, orf_count }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrisprResult {
    pub present: bool,
    /// Copies of the best-supported direct repeat.
    #[serde(default)]
    pub repeat_hits: usize,
    /// Cas subtype of the best-supported repeat family, `"None"` if absent.
    #[serde(default = "no_cas_type")]
    pub cas_type: String,
}

fn no_cas_type() -> String { "None".to_string() }

impl CrisprResult {
    pub fn absent() -> Self {
        Self { present: false, repeat_hits: 0, cas_type: no_cas_type() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResistanceGene {
    /// Lowercase gene identifier.
    pub gene: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResistanceResult {
    pub genes: Vec<ResistanceGene>,
    #[serde(rename = "totalResistanceGenes")]
    pub total_resistance_genes: usize,
}

impl ResistanceResult {
    pub fn new(genes: Vec<ResistanceGene>) -> Self {
        let total_resistance_genes = genes.len();
        Self { genes, total_resistance_genes }
    }

    pub fn gene_names(&self) -> impl Iterator<Item = &str> {
        self.genes.iter().map(|g| g.gene.as_str())
    }
}

/// Virulence score plus provider-defined detail fields, passed through unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VirulenceResult {
    #[serde(rename = "virulenceScore")]
    pub virulence_score: f64,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathogenicRisk {
    /// Score in `[0, 100]`.
    #[serde(rename = "riskScore")]
    pub risk_score: f64,
    /// Categorical label derived from the score.
    #[serde(rename = "pathogenicRisk")]
    pub pathogenic_risk: String,
}

/// Horizontal-gene-transfer risk; passed through to the payload unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HgtRisk {
    pub level: String,
    pub score: f64,
    pub explanation: String,
}

/// Inputs to the pathogenic risk model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskInputs {
    pub genome_len: usize,
    pub gc: f64,
    pub orf_count: usize,
    pub res_count: usize,
    pub vir_score: f64,
    pub crispr_present: bool,
}

/// The collaborator contract consumed by the pipeline.
///
/// Every method is a pure function of its arguments. Errors are propagated by
/// the pipeline unmodified.
pub trait FeatureProvider: Send + Sync {
    fn basic_stats(&self, seq: &str) -> Result<SequenceStats>;
    fn find_orfs(&self, seq: &str) -> Result<OrfResult>;
    fn scan_crispr(&self, seq: &str) -> Result<CrisprResult>;
    fn predict_resistance(&self, seq: &str, orfs: &[String]) -> Result<ResistanceResult>;
    fn predict_virulence(&self, seq: &str) -> Result<VirulenceResult>;
    fn pathogenic_risk(&self, inputs: &RiskInputs) -> Result<PathogenicRisk>;
    fn hgt_risk(&self, gc_content: f64, orf_count: usize, res_count: usize) -> Result<HgtRisk>;
}

/// Default providers backed by `bio`, `aho-corasick` and the embedded marker panels.
pub struct BuiltinProviders {
    config: Config,
    resistance: SignatureScanner,
    virulence: SignatureScanner,
}

impl BuiltinProviders {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            resistance: SignatureScanner::new(RESISTANCE_MARKERS)?,
            virulence: SignatureScanner::new(VIRULENCE_MARKERS)?,
        })
    }
}

impl FeatureProvider for BuiltinProviders {
    fn basic_stats(&self, seq: &str) -> Result<SequenceStats> {
        Ok(stats::basic_stats(seq))
    }

    fn find_orfs(&self, seq: &str) -> Result<OrfResult> {
        Ok(orf::find_orfs(seq, self.config.orf.min_len))
    }

    fn scan_crispr(&self, seq: &str) -> Result<CrisprResult> {
        Ok(crispr::scan_crispr(seq, &self.config.crispr))
    }

    fn predict_resistance(&self, seq: &str, orfs: &[String]) -> Result<ResistanceResult> {
        Ok(resistance::predict_resistance(&self.resistance, seq, orfs))
    }

    fn predict_virulence(&self, seq: &str) -> Result<VirulenceResult> {
        Ok(virulence::predict_virulence(&self.virulence, seq))
    }

    fn pathogenic_risk(&self, inputs: &RiskInputs) -> Result<PathogenicRisk> {
        Ok(risk::pathogenic_risk(inputs))
    }

    fn hgt_risk(&self, gc_content: f64, orf_count: usize, res_count: usize) -> Result<HgtRisk> {
        Ok(risk::hgt_risk(gc_content, orf_count, res_count))
    }
}

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(x: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (x * f).round() / f
}
