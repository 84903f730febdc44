//! In-silico therapeutic trials.
//!
//! Every catalog candidate is scored against a [`DefenseProfile`] and the
//! combined list is ranked best-first.
//!
//! ## Phages
//! Score = efficiency × 100. With a CRISPR array present, each phage gets its
//! own uniform draw; a draw above [`CRISPR_MATCH_DRAW`] (40% chance) models a
//! spacer match and costs [`CRISPR_PENALTY`] points. The draw is taken from the
//! caller's RNG on every call and every phage, so identical inputs may rank
//! phages differently between runs. Scores are rounded to one decimal and
//! clamped to `[0, 99]`; a phage is effective above [`PHAGE_EFFECTIVE_ABOVE`].
//!
//! ## Antibiotics
//! Score = 90, replaced by 10 for a carbapenem when any gene mentions `bla`, or
//! by 25 for an aminoglycoside when any gene mentions `aac` or `aph`. Matching
//! is substring containment over the lower-cased gene list, so gene-name
//! variants match, and so do unrelated identifiers that happen to contain a
//! trigger (e.g. `"graph"` triggers `aph`). An antibiotic is effective above
//! [`ANTIBIOTIC_EFFECTIVE_ABOVE`].
//!
//! ## Ranking
//! Phage results, then antibiotic results, each in catalog order, stably
//! sorted by descending `success_prob`.
use rand::Rng;
use tracing::debug;

use crate::catalog::of_kind;
use crate::therapy::{Agent, DefenseProfile, DrugClass, Therapeutic, TherapyKind, TrialResult, TrialStatus};

pub const CRISPR_MATCH_DRAW: f64 = 0.6;
pub const CRISPR_PENALTY: f64 = 40.0;
pub const MAX_SUCCESS_PROB: f64 = 99.0;
pub const PHAGE_EFFECTIVE_ABOVE: f64 = 75.0;

pub const ANTIBIOTIC_BASE_SCORE: f64 = 90.0;
pub const BETA_LACTAMASE_SCORE: f64 = 10.0;
pub const RIBOSOMAL_PROTECTION_SCORE: f64 = 25.0;
pub const ANTIBIOTIC_EFFECTIVE_ABOVE: f64 = 80.0;

pub const NOTE_CRISPR: &str = "CRISPR interference predicted";
pub const NOTE_PHAGE_DEFAULT: &str = "High compatibility";
pub const NOTE_BETA_LACTAMASE: &str = "Enzymatic degradation (Beta-lactamase)";
pub const NOTE_RIBOSOMAL: &str = "Ribosomal protection detected";
pub const NOTE_ANTIBIOTIC_DEFAULT: &str = "Standard susceptibility";

/// Score the whole catalog and return results ranked best-first.
pub fn run_trials<R: Rng + ?Sized>(profile: &DefenseProfile, rng: &mut R) -> Vec<TrialResult> {
    let haystack = gene_haystack(&profile.resistance_genes);
    let has_crispr = profile.crispr_status.is_present();

    let (phages, antibiotics) = (of_kind(TherapyKind::Phage), of_kind(TherapyKind::Antibiotic));
    let mut results = Vec::with_capacity(phages.len() + antibiotics.len());
    for t in phages {
        if let Agent::Phage { efficiency } = t.agent {
            results.push(phage_trial(t, efficiency, has_crispr, rng));
        }
    }
    for t in antibiotics {
        if let Agent::Antibiotic { class } = t.agent {
            results.push(antibiotic_trial(t, class, &haystack));
        }
    }
    rank(&mut results);
    results
}

/// [`run_trials`] with the thread-local RNG.
pub fn run_trials_default(profile: &DefenseProfile) -> Vec<TrialResult> {
    run_trials(profile, &mut rand::thread_rng())
}

/// Lower-cased genes joined into one searchable string. The separator never
/// completes a trigger, so a match cannot span two identifiers.
fn gene_haystack(genes: &[String]) -> String {
    genes.iter().map(|g| g.to_lowercase()).collect::<Vec<_>>().join(", ")
}

fn phage_trial<R: Rng + ?Sized>(t: &Therapeutic, efficiency: f64, has_crispr: bool, rng: &mut R) -> TrialResult {
    let mut score = efficiency * 100.0;
    let mut notes: Vec<&str> = Vec::new();

    if has_crispr {
        let draw: f64 = rng.gen();
        if draw > CRISPR_MATCH_DRAW {
            score -= CRISPR_PENALTY;
            notes.push(NOTE_CRISPR);
            debug!(phage = t.name, draw, "CRISPR interference");
        }
    }

    let success_prob = round1(score).clamp(0.0, MAX_SUCCESS_PROB);
    TrialResult {
        kind: TherapyKind::Phage,
        name: t.name.to_string(),
        target: t.target.to_string(),
        success_prob,
        status: if success_prob > PHAGE_EFFECTIVE_ABOVE { TrialStatus::Effective } else { TrialStatus::Resistant },
        notes: join_notes(&notes, NOTE_PHAGE_DEFAULT),
    }
}

fn antibiotic_trial(t: &Therapeutic, class: DrugClass, haystack: &str) -> TrialResult {
    let mut score = ANTIBIOTIC_BASE_SCORE;
    let mut notes: Vec<&str> = Vec::new();

    if haystack.contains("bla") && class == DrugClass::Carbapenem {
        score = BETA_LACTAMASE_SCORE;
        notes.push(NOTE_BETA_LACTAMASE);
    }
    if (haystack.contains("aac") || haystack.contains("aph")) && class == DrugClass::Aminoglycoside {
        score = RIBOSOMAL_PROTECTION_SCORE;
        notes.push(NOTE_RIBOSOMAL);
    }
    if !notes.is_empty() {
        debug!(drug = t.name, score, "resistance rule matched");
    }

    TrialResult {
        kind: TherapyKind::Antibiotic,
        name: t.name.to_string(),
        target: t.target.to_string(),
        success_prob: score,
        status: if score > ANTIBIOTIC_EFFECTIVE_ABOVE { TrialStatus::Effective } else { TrialStatus::Resistant },
        notes: join_notes(&notes, NOTE_ANTIBIOTIC_DEFAULT),
    }
}

fn join_notes(notes: &[&str], default: &str) -> String {
    if notes.is_empty() { default.to_string() } else { notes.join("; ") }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Stable sort, best first; equal scores keep their input order.
pub fn rank(results: &mut [TrialResult]) {
    results.sort_by(|a, b| b.success_prob.total_cmp(&a.success_prob));
}
