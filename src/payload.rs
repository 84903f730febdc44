//! Client-facing analysis record.
//!
//! Field names match the JSON the analysis API has always returned; provider
//! records embedded here keep their own (camelCase) keys.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::features::{round_to, CrisprResult, HgtRisk, PathogenicRisk, ResistanceGene, ResistanceResult, SequenceStats, VirulenceResult};
use crate::therapy::{CrisprStatus, TrialResult};

/// kDa per nucleotide of coding sequence used by the structure mock.
pub const KDA_PER_NUCLEOTIDE: f64 = 0.11;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub length: usize,
    pub gc_content: f64,
    pub orf_count: usize,
}

/// Placeholder structure prediction for the first ORF.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProteinStructure {
    pub structure_id: String,
    pub confidence_score: f64,
    /// Rendered as `"<value> kDa"`.
    pub molecular_weight: String,
    pub folding_type: String,
    pub description: String,
}

impl ProteinStructure {
    /// Mock a prediction for `orf`: random `PZ-####` id, confidence uniform in
    /// `[75.0, 98.5]`, weight `0.11 × len(orf)` kDa.
    pub fn mock<R: Rng + ?Sized>(orf: &str, rng: &mut R) -> Self {
        let id: u32 = rng.gen_range(1000..=9999);
        let confidence: f64 = rng.gen_range(75.0..=98.5);
        let weight = round_to(orf.len() as f64 * KDA_PER_NUCLEOTIDE, 2);
        Self {
            structure_id: format!("PZ-{id}"),
            confidence_score: round_to(confidence, 2),
            molecular_weight: format!("{weight:?} kDa"),
            folding_type: "Alpha-Helix Dominant".to_string(),
            description: "Predicted transmembrane domain with high stability.".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvancedMl {
    pub virulence: VirulenceResult,
    pub hgt_risk: HgtRisk,
    /// Repeat copies and Cas subtype behind `crispr_status`.
    pub crispr: CrisprResult,
}

/// One analysis, as returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    pub metadata: Metadata,
    pub resistance_genes: Vec<ResistanceGene>,
    pub crispr_status: CrisprStatus,
    pub risk_score: f64,
    pub risk_level: String,
    pub explanation: String,
    pub protein_structure: Option<ProteinStructure>,
    /// Ranked best-first.
    pub therapeutics: Vec<TrialResult>,
    pub advanced_ml: AdvancedMl,
}

/// Fixed-template summary. Floats always render with a decimal point.
pub fn explanation(stats: &SequenceStats, resistance: &ResistanceResult, risk: &PathogenicRisk) -> String {
    format!(
        "The genome has a GC content of {:?}%. Analysis identified {} potential resistance markers. Pathogenic risk is calculated as {} ({:?}/100).",
        stats.gc_content, resistance.total_resistance_genes, risk.pathogenic_risk, risk.risk_score
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn explanation_template() {
        let stats = SequenceStats { length: 12, gc_content: 50.0 };
        let res = ResistanceResult::new(vec![ResistanceGene { gene: "blakpc".into() }]);
        let risk = PathogenicRisk { risk_score: 42.5, pathogenic_risk: "Moderate".into() };
        assert_eq!(
            explanation(&stats, &res, &risk),
            "The genome has a GC content of 50.0%. Analysis identified 1 potential resistance markers. \
             Pathogenic risk is calculated as Moderate (42.5/100)."
        );
    }

    #[test]
    fn structure_mock_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let p = ProteinStructure::mock(&"A".repeat(300), &mut rng);
            assert!(p.structure_id.starts_with("PZ-") && p.structure_id.len() == 7);
            let id: u32 = p.structure_id[3..].parse().unwrap();
            assert!((1000..=9999).contains(&id));
            assert!((75.0..=98.5).contains(&p.confidence_score));
            assert_eq!(p.molecular_weight, "33.0 kDa");
        }
    }

    #[test]
    fn structure_weight_two_decimals() {
        let p = ProteinStructure::mock("ATGCATGCATGC", &mut StdRng::seed_from_u64(1));
        assert_eq!(p.molecular_weight, "1.32 kDa");
    }
}
