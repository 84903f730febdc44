//! Virulence score from weighted virulence-factor signatures.

use serde_json::{Map, Value};

use super::{round_to, VirulenceResult};
use crate::detect::SignatureScanner;

/// Sum of the weights of distinct factors found, capped at 100.
///
/// Detail fields: `factors` (names in discovery order) and `factor_count`.
pub fn predict_virulence(scanner: &SignatureScanner, seq: &str) -> VirulenceResult {
    let hits = scanner.scan(seq.as_bytes());
    let score: f64 = hits.iter().map(|s| s.weight).sum();

    let mut details = Map::new();
    details.insert(
        "factors".to_string(),
        Value::from(hits.iter().map(|s| s.name).collect::<Vec<_>>()),
    );
    details.insert("factor_count".to_string(), Value::from(hits.len()));

    VirulenceResult { virulence_score: round_to(score.min(100.0), 1), details }
}
