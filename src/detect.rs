//! Motif detection utilities (fuzzy repeats and exact signatures).
//!
//! Two scanners back the built-in providers:
//! - [`count_repeat_copies`]: Myers bit-parallel search (`bio`) counting
//!   non-overlapping copies of a CRISPR direct repeat within `max_edits`.
//! - [`SignatureScanner`]: one Aho–Corasick automaton over a signature panel,
//!   reporting which signatures occur in a text.
//!
//! # Examples
//! ```
//! use phazegen::detect::count_repeat_copies;
//! assert_eq!(count_repeat_copies(b"ACGTTTTTACGT", "ACGT", 0), 2);
//! ```
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, AhoCorasickKind, MatchKind};
use bio::pattern_matching::myers::{Myers, MyersBuilder};

use crate::error::{PhazeError, Result};

/// A CRISPR direct-repeat consensus.
#[derive(Clone, Debug, PartialEq)]
pub struct RepeatMotif {
    /// Short stable name (e.g. `"ecoli_crispr1"`).
    pub name: &'static str,
    /// Cas subtype associated with arrays carrying this repeat.
    pub cas_type: &'static str,
    /// Uppercase repeat sequence, at most 64 nt.
    pub sequence: &'static str,
}

/// A named gene signature with a scoring weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    /// Lowercase gene identifier reported on a hit.
    pub name: &'static str,
    /// Uppercase signature sequence.
    pub sequence: &'static str,
    /// Contribution to an aggregate score (unused by presence-only callers).
    pub weight: f64,
}

/// Count non-overlapping approximate copies of `repeat` in `text`.
///
/// A copy is counted at the first end position reaching `max_edits` or better;
/// the next copy must end at least one repeat length later. Repeats longer than
/// 64 nt or empty repeats yield 0.
pub fn count_repeat_copies(text: &[u8], repeat: &str, max_edits: u8) -> usize {
    let pattern = repeat.as_bytes();
    if pattern.is_empty() || pattern.len() > 64 || text.len() + usize::from(max_edits) < pattern.len() {
        return 0;
    }
    let myers: Myers<u64> = MyersBuilder::new().build_64(pattern.iter().copied());
    let mut copies = 0;
    let mut next_allowed_end = 0usize;
    for (end, _dist) in myers.find_all_end(text, max_edits) {
        if end >= next_allowed_end {
            copies += 1;
            next_allowed_end = end + pattern.len();
        }
    }
    copies
}

/// Exact multi-pattern scanner over a fixed signature panel.
pub struct SignatureScanner {
    panel: &'static [Signature],
    ac: AhoCorasick,
}

impl SignatureScanner {
    /// Build an automaton across every signature in `panel`.
    pub fn new(panel: &'static [Signature]) -> Result<Self> {
        let ac = AhoCorasickBuilder::new()
            .kind(Some(AhoCorasickKind::DFA))
            .match_kind(MatchKind::Standard)
            .build(panel.iter().map(|s| s.sequence.as_bytes()))
            .map_err(|e| PhazeError::InvalidInput(format!("signature panel: {e}")))?;
        Ok(Self { panel, ac })
    }

    /// Signatures found in `text`, each reported once, in order of first occurrence.
    pub fn scan(&self, text: &[u8]) -> Vec<&'static Signature> {
        let mut seen = vec![false; self.panel.len()];
        let mut hits = Vec::new();
        for m in self.ac.find_overlapping_iter(text) {
            let idx = m.pattern().as_usize();
            if !seen[idx] {
                seen[idx] = true;
                hits.push(&self.panel[idx]);
            }
        }
        hits
    }
}
