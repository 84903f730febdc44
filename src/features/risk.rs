//! Pathogenic and horizontal-gene-transfer risk models.
//!
//! Both are transparent weighted sums clamped to `[0, 100]` and rounded to one
//! decimal.

use super::{round_to, HgtRisk, PathogenicRisk, RiskInputs};

const RESISTANCE_WEIGHT: f64 = 12.0;
const VIRULENCE_WEIGHT: f64 = 0.45;
const MAX_ORF_DENSITY: f64 = 10.0;
const MAX_GC_DEVIATION: f64 = 25.0;
const GC_WEIGHT: f64 = 0.4;
const CRISPR_CREDIT: f64 = 5.0;

/// Score thresholds for the categorical label.
pub const HIGH_RISK: f64 = 70.0;
pub const MODERATE_RISK: f64 = 40.0;

/// Pathogenic risk from resistance load, virulence, ORF density (per kb) and GC
/// deviation from 50%. A CRISPR array earns a small credit, since it limits
/// uptake of mobile resistance elements. An empty genome scores 0.
pub fn pathogenic_risk(inputs: &RiskInputs) -> PathogenicRisk {
    if inputs.genome_len == 0 {
        return PathogenicRisk { risk_score: 0.0, pathogenic_risk: risk_label(0.0).to_string() };
    }
    let orf_density = inputs.orf_count as f64 * 1000.0 / inputs.genome_len as f64;
    let gc_deviation = (inputs.gc - 50.0).abs().min(MAX_GC_DEVIATION);

    let mut score = RESISTANCE_WEIGHT * inputs.res_count as f64
        + VIRULENCE_WEIGHT * inputs.vir_score
        + orf_density.min(MAX_ORF_DENSITY)
        + GC_WEIGHT * gc_deviation;
    if inputs.crispr_present {
        score -= CRISPR_CREDIT;
    }
    let risk_score = round_to(score.clamp(0.0, 100.0), 1);
    PathogenicRisk { risk_score, pathogenic_risk: risk_label(risk_score).to_string() }
}

pub fn risk_label(score: f64) -> &'static str {
    if score >= HIGH_RISK {
        "High"
    } else if score >= MODERATE_RISK {
        "Moderate"
    } else {
        "Low"
    }
}

/// HGT risk. The level follows the resistance-gene count (>5 High, >0 Medium);
/// the score adds GC deviation (a GC content of 0 carries no signal) and ORF count.
pub fn hgt_risk(gc_content: f64, orf_count: usize, res_count: usize) -> HgtRisk {
    let (level, explanation) = match res_count {
        n if n > 5 => ("High", "Multiple resistance genes suggest possible horizontal gene transfer."),
        n if n > 0 => ("Medium", "Limited resistance markers detected; moderate HGT risk."),
        _ => ("Low", "No mobile genetic elements detected."),
    };
    let gc_deviation = if gc_content > 0.0 { (gc_content - 50.0).abs() } else { 0.0 };
    let score = res_count as f64 * 12.0 + gc_deviation * 1.5 + orf_count.min(20) as f64 * 0.5;
    HgtRisk {
        level: level.to_string(),
        score: round_to(score.clamp(0.0, 100.0), 1),
        explanation: explanation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> RiskInputs {
        RiskInputs { genome_len: 10_000, gc: 50.0, orf_count: 0, res_count: 0, vir_score: 0.0, crispr_present: false }
    }

    #[test]
    fn empty_genome_is_low_risk() {
        let r = pathogenic_risk(&RiskInputs { genome_len: 0, ..inputs() });
        assert_eq!(r.risk_score, 0.0);
        assert_eq!(r.pathogenic_risk, "Low");
    }

    #[test]
    fn weighted_sum() {
        // 3*12 + 0.45*60 + 5 orfs/kb + 0.4*10 = 36 + 27 + 5 + 4
        let r = pathogenic_risk(&RiskInputs { res_count: 3, vir_score: 60.0, orf_count: 50, gc: 60.0, ..inputs() });
        assert_eq!(r.risk_score, 72.0);
        assert_eq!(r.pathogenic_risk, "High");

        let r = pathogenic_risk(&RiskInputs { res_count: 3, vir_score: 60.0, orf_count: 50, gc: 60.0, crispr_present: true, ..inputs() });
        assert_eq!(r.risk_score, 67.0);
        assert_eq!(r.pathogenic_risk, "Moderate");
    }

    #[test]
    fn score_is_clamped() {
        let r = pathogenic_risk(&RiskInputs { res_count: 20, vir_score: 100.0, ..inputs() });
        assert_eq!(r.risk_score, 100.0);
        let r = pathogenic_risk(&RiskInputs { crispr_present: true, ..inputs() });
        assert_eq!(r.risk_score, 0.0);
    }

    #[test]
    fn hgt_levels_follow_gene_count() {
        assert_eq!(hgt_risk(50.0, 0, 0).level, "Low");
        assert_eq!(hgt_risk(50.0, 0, 1).level, "Medium");
        assert_eq!(hgt_risk(50.0, 0, 6).level, "High");
        assert_eq!(hgt_risk(0.0, 0, 0).score, 0.0);
        assert_eq!(hgt_risk(60.0, 4, 1).score, 29.0);
    }
}
