//! CRISPR array detection from direct-repeat copies.
//!
//! Each known repeat is counted on both strands with Myers matching; an array
//! is present when the best-supported repeat reaches `min_repeats` copies.

use std::cmp::Reverse;

use bio::alphabets::dna::revcomp;

use super::CrisprResult;
use crate::config::CrisprConfig;
use crate::data::markers::CRISPR_REPEATS;
use crate::detect::count_repeat_copies;

pub fn scan_crispr(seq: &str, config: &CrisprConfig) -> CrisprResult {
    if seq.is_empty() {
        return CrisprResult::absent();
    }
    let forward = seq.as_bytes();
    let reverse = revcomp(forward);

    let best = CRISPR_REPEATS
        .iter()
        .map(|r| {
            let copies = count_repeat_copies(forward, r.sequence, config.max_edits)
                .max(count_repeat_copies(&reverse, r.sequence, config.max_edits));
            (r, copies)
        })
        .min_by_key(|(_, copies)| Reverse(*copies));

    match best {
        Some((repeat, copies)) if copies >= config.min_repeats => CrisprResult {
            present: true,
            repeat_hits: copies,
            cas_type: repeat.cas_type.to_string(),
        },
        Some((_, copies)) => CrisprResult { repeat_hits: copies, ..CrisprResult::absent() },
        None => CrisprResult::absent(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::markers::{REPEAT_ECOLI_I_E, REPEAT_SPY_II_A};

    const SPACERS: [&str; 3] = [
        "ACGATCGATTTACGGCATCAGGCTAAGCTTAC",
        "TTGCAGGATCCATAGCTAGGACTTAACCGATC",
        "CAATGCCGTAGATTCGACATTGGACAGTACCA",
    ];

    fn array(repeat: &str, copies: usize) -> String {
        let mut s = String::from(SPACERS[0]);
        for i in 0..copies {
            s.push_str(repeat);
            s.push_str(SPACERS[(i + 1) % SPACERS.len()]);
        }
        s
    }

    #[test]
    fn detects_array_and_cas_type() {
        let seq = array(REPEAT_SPY_II_A.sequence, 3);
        let r = scan_crispr(&seq, &CrisprConfig::default());
        assert!(r.present);
        assert_eq!(r.repeat_hits, 3);
        assert_eq!(r.cas_type, "Type II-A");
    }

    #[test]
    fn detects_array_on_reverse_strand() {
        let seq = array(REPEAT_ECOLI_I_E.sequence, 2);
        let rc = String::from_utf8(revcomp(seq.as_bytes())).unwrap();
        let r = scan_crispr(&rc, &CrisprConfig::default());
        assert!(r.present);
        assert_eq!(r.cas_type, "Type I-E");
    }

    #[test]
    fn single_repeat_is_not_an_array() {
        let seq = array(REPEAT_SPY_II_A.sequence, 1);
        let r = scan_crispr(&seq, &CrisprConfig::default());
        assert!(!r.present);
        assert_eq!(r.repeat_hits, 1);
        assert_eq!(r.cas_type, "None");
    }

    #[test]
    fn empty_sequence_is_absent() {
        assert_eq!(scan_crispr("", &CrisprConfig::default()), CrisprResult::absent());
    }
}
