//! Analysis pipeline: one raw sequence in, one [`AnalysisPayload`] out.
//!
//! Provider calls are grouped into typed stages; each stage depends only on
//! the stages before it:
//!
//! ```text
//! normalize ─► FeatureStage {stats, orfs, crispr}
//!           ─► ModelStage   {resistance(seq, orfs), virulence(seq)}
//!           ─► RiskStage    {pathogenic(..), hgt(..)}
//!           ─► protein mock, trials, explanation ─► AnalysisPayload
//! ```
//!
//! Calls inside a stage are independent and run through `rayon::join` when the
//! pipeline is parallel. The pipeline is fail-fast: the first provider error is
//! returned unchanged, with no retries.
use rand::Rng;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::features::{
    BuiltinProviders, CrisprResult, FeatureProvider, HgtRisk, OrfResult, PathogenicRisk, ResistanceResult,
    RiskInputs, SequenceStats, VirulenceResult,
};
use crate::normalize::normalize_sequence;
use crate::payload::{explanation, AdvancedMl, AnalysisPayload, Metadata, ProteinStructure};
use crate::therapy::{CrisprStatus, DefenseProfile};
use crate::trial;

#[derive(Clone, Debug, PartialEq)]
pub struct FeatureStage {
    pub stats: SequenceStats,
    pub orfs: OrfResult,
    pub crispr: CrisprResult,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModelStage {
    pub resistance: ResistanceResult,
    pub virulence: VirulenceResult,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RiskStage {
    pub pathogenic: PathogenicRisk,
    pub hgt: HgtRisk,
}

/// Stateless orchestrator over a [`FeatureProvider`].
pub struct Pipeline<P = BuiltinProviders> {
    providers: P,
    parallel: bool,
}

impl Pipeline<BuiltinProviders> {
    /// Pipeline over the built-in providers.
    pub fn new(config: Config) -> Result<Self> {
        let parallel = config.execution.parallel;
        Ok(Self { providers: BuiltinProviders::new(config)?, parallel })
    }
}

impl<P: FeatureProvider> Pipeline<P> {
    pub fn with_providers(providers: P, parallel: bool) -> Self {
        Self { providers, parallel }
    }

    pub fn providers(&self) -> &P {
        &self.providers
    }

    fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        if self.parallel { rayon::join(a, b) } else { (a(), b()) }
    }

    /// Stats, ORFs and CRISPR scan of the normalized sequence.
    pub fn features(&self, seq: &str) -> Result<FeatureStage> {
        let p = &self.providers;
        let (stats, (orfs, crispr)) =
            self.join(|| p.basic_stats(seq), || self.join(|| p.find_orfs(seq), || p.scan_crispr(seq)));
        let stage = FeatureStage { stats: stats?, orfs: orfs?, crispr: crispr? };
        debug!(
            length = stage.stats.length,
            gc = stage.stats.gc_content,
            orfs = stage.orfs.orf_count,
            crispr = stage.crispr.present,
            "feature stage"
        );
        Ok(stage)
    }

    /// Resistance calls (over the ORFs) and virulence score.
    pub fn models(&self, seq: &str, features: &FeatureStage) -> Result<ModelStage> {
        let p = &self.providers;
        let (resistance, virulence) = self.join(
            || p.predict_resistance(seq, &features.orfs.orfs),
            || p.predict_virulence(seq),
        );
        let stage = ModelStage { resistance: resistance?, virulence: virulence? };
        debug!(
            genes = stage.resistance.total_resistance_genes,
            virulence = stage.virulence.virulence_score,
            "model stage"
        );
        Ok(stage)
    }

    /// Pathogenic and HGT risk.
    pub fn risks(&self, features: &FeatureStage, models: &ModelStage) -> Result<RiskStage> {
        let p = &self.providers;
        let inputs = RiskInputs {
            genome_len: features.stats.length,
            gc: features.stats.gc_content,
            orf_count: features.orfs.orf_count,
            res_count: models.resistance.total_resistance_genes,
            vir_score: models.virulence.virulence_score,
            crispr_present: features.crispr.present,
        };
        let (pathogenic, hgt) = self.join(
            || p.pathogenic_risk(&inputs),
            || p.hgt_risk(inputs.gc, inputs.orf_count, inputs.res_count),
        );
        let stage = RiskStage { pathogenic: pathogenic?, hgt: hgt? };
        debug!(score = stage.pathogenic.risk_score, level = %stage.pathogenic.pathogenic_risk, "risk stage");
        Ok(stage)
    }

    /// Analyze with the thread-local RNG.
    pub fn run(&self, raw: &str) -> Result<AnalysisPayload> {
        self.run_with_rng(raw, &mut rand::thread_rng())
    }

    /// Analyze, drawing the structure mock and phage CRISPR trials from `rng`.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, raw: &str, rng: &mut R) -> Result<AnalysisPayload> {
        let seq = normalize_sequence(raw);
        info!(length = seq.len(), "analysis started");

        let features = self.features(&seq)?;
        let models = self.models(&seq, &features)?;
        let risks = self.risks(&features, &models)?;

        let protein_structure = features.orfs.orfs.first().map(|orf| ProteinStructure::mock(orf, &mut *rng));

        let crispr_status = CrisprStatus::from_present(features.crispr.present);
        let profile = DefenseProfile::new(models.resistance.gene_names(), crispr_status);
        let therapeutics = trial::run_trials(&profile, rng);

        let explanation = explanation(&features.stats, &models.resistance, &risks.pathogenic);

        let FeatureStage { stats, orfs, crispr } = features;
        let ModelStage { resistance, virulence } = models;
        let RiskStage { pathogenic, hgt } = risks;

        let payload = AnalysisPayload {
            metadata: Metadata { length: stats.length, gc_content: stats.gc_content, orf_count: orfs.orf_count },
            resistance_genes: resistance.genes,
            crispr_status,
            risk_score: pathogenic.risk_score,
            risk_level: pathogenic.pathogenic_risk,
            explanation,
            protein_structure,
            therapeutics,
            advanced_ml: AdvancedMl { virulence, hgt_risk: hgt, crispr },
        };
        info!(
            length = payload.metadata.length,
            risk = payload.risk_score,
            therapeutics = payload.therapeutics.len(),
            "analysis finished"
        );
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhazeError;
    use crate::features::ResistanceGene;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::Map;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fixed answers, optionally failing one stage, counting calls.
    #[derive(Default)]
    struct StubProviders {
        genes: Vec<&'static str>,
        crispr: bool,
        fail: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl StubProviders {
        fn check(&self, stage: &'static str) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail {
                Some(s) if s == stage => Err(PhazeError::provider(stage, "boom")),
                _ => Ok(()),
            }
        }
    }

    impl FeatureProvider for StubProviders {
        fn basic_stats(&self, seq: &str) -> Result<SequenceStats> {
            self.check("stats")?;
            Ok(SequenceStats { length: seq.len(), gc_content: 41.5 })
        }
        fn find_orfs(&self, seq: &str) -> Result<OrfResult> {
            self.check("orf")?;
            Ok(OrfResult::new(if seq.is_empty() { vec![] } else { vec![seq.to_string()] }))
        }
        fn scan_crispr(&self, _seq: &str) -> Result<CrisprResult> {
            self.check("crispr")?;
            Ok(CrisprResult { present: self.crispr, ..CrisprResult::absent() })
        }
        fn predict_resistance(&self, _seq: &str, _orfs: &[String]) -> Result<ResistanceResult> {
            self.check("resistance")?;
            Ok(ResistanceResult::new(self.genes.iter().map(|g| ResistanceGene { gene: g.to_string() }).collect()))
        }
        fn predict_virulence(&self, _seq: &str) -> Result<VirulenceResult> {
            self.check("virulence")?;
            Ok(VirulenceResult { virulence_score: 12.5, details: Map::new() })
        }
        fn pathogenic_risk(&self, inputs: &RiskInputs) -> Result<PathogenicRisk> {
            self.check("pathogenic")?;
            Ok(PathogenicRisk { risk_score: 10.0 * inputs.res_count as f64, pathogenic_risk: "Low".into() })
        }
        fn hgt_risk(&self, _gc: f64, _orfs: usize, res_count: usize) -> Result<HgtRisk> {
            self.check("hgt")?;
            Ok(HgtRisk { level: "Medium".into(), score: res_count as f64, explanation: "stub".into() })
        }
    }

    #[test]
    fn threads_stage_outputs_into_payload() {
        let stub = StubProviders { genes: vec!["blakpc", "aacc1"], ..Default::default() };
        let pipeline = Pipeline::with_providers(stub, true);
        let p = pipeline.run_with_rng(">x\nacgtacgt\n", &mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(p.metadata, Metadata { length: 8, gc_content: 41.5, orf_count: 1 });
        assert_eq!(p.risk_score, 20.0);
        assert_eq!(p.risk_level, "Low");
        assert_eq!(p.crispr_status, CrisprStatus::Absent);
        assert_eq!(
            p.explanation,
            "The genome has a GC content of 41.5%. Analysis identified 2 potential resistance markers. \
             Pathogenic risk is calculated as Low (20.0/100)."
        );
        let ps = p.protein_structure.as_ref().expect("structure for first ORF");
        assert_eq!(ps.molecular_weight, "0.88 kDa");
        assert_eq!(find(&p, "Meropenem"), 10.0);
        assert_eq!(find(&p, "Gentamicin"), 25.0);
        assert_eq!(p.advanced_ml.hgt_risk.score, 2.0);
        assert_eq!(pipeline.providers().calls.load(Ordering::SeqCst), 7);
    }

    fn find(p: &AnalysisPayload, name: &str) -> f64 {
        p.therapeutics.iter().find(|t| t.name == name).unwrap().success_prob
    }

    #[test]
    fn provider_failure_propagates_unchanged() {
        for stage in ["stats", "orf", "crispr", "resistance", "virulence", "pathogenic", "hgt"] {
            for parallel in [true, false] {
                let stub = StubProviders { fail: Some(stage), ..Default::default() };
                let err = Pipeline::with_providers(stub, parallel).run("ACGT").unwrap_err();
                match err {
                    PhazeError::Provider { stage: s, message } => {
                        assert_eq!(s, stage);
                        assert_eq!(message, "boom");
                    }
                    other => panic!("unexpected error {other:?}"),
                }
            }
        }
    }

    #[test]
    fn failure_stops_later_stages() {
        let stub = StubProviders { fail: Some("resistance"), ..Default::default() };
        let pipeline = Pipeline::with_providers(stub, false);
        assert!(pipeline.run("ACGT").is_err());
        // Three feature calls, the failing resistance call, and virulence (same stage).
        assert_eq!(pipeline.providers().calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn crispr_presence_reaches_trials() {
        let stub = StubProviders { crispr: true, ..Default::default() };
        let p = Pipeline::with_providers(stub, false).run("ACGT").unwrap();
        assert_eq!(p.crispr_status, CrisprStatus::Present);
        assert!(p.advanced_ml.crispr.present);
        assert_eq!(serde_json::to_value(&p).unwrap()["crispr_status"], "Present");
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let seq = "ATGGCTGCTGCTTAAGGCC";
        let a = Pipeline::with_providers(StubProviders::default(), true)
            .run_with_rng(seq, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = Pipeline::with_providers(StubProviders::default(), false)
            .run_with_rng(seq, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stages_are_callable_in_isolation() {
        let pipeline = Pipeline::new(Config::default()).unwrap();
        let f = pipeline.features("").unwrap();
        assert_eq!(f.stats.length, 0);
        assert_eq!(f.orfs.orf_count, 0);
        let m = pipeline.models("", &f).unwrap();
        assert_eq!(m.resistance.total_resistance_genes, 0);
        let r = pipeline.risks(&f, &m).unwrap();
        assert_eq!(r.pathogenic.risk_score, 0.0);
    }
}
