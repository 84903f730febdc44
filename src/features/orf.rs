//! Forward-strand open reading frame finder.
//!
//! Uses `bio`'s codon-state finder with the standard start (`ATG`) and stop
//! codons. When several in-frame starts share one stop, only the outermost
//! (longest) ORF is kept.

use bio::seq_analysis::orf::{Finder, Orf};

use super::OrfResult;

/// Find ORFs of at least `min_len` nucleotides (start codon through stop codon),
/// in discovery order.
pub fn find_orfs(seq: &str, min_len: usize) -> OrfResult {
    let bytes = seq.as_bytes();
    // The finder measures from the last base of the start codon and keeps
    // strictly longer spans.
    let finder = Finder::new(vec![b"ATG"], vec![b"TAA", b"TAG", b"TGA"], min_len.saturating_sub(3));
    let mut hits: Vec<Orf> = finder.find_all(bytes).collect();
    hits.dedup_by_key(|o| o.end);
    let orfs = hits
        .iter()
        .map(|o| String::from_utf8_lossy(&bytes[o.start..o.end]).into_owned())
        .collect();
    OrfResult::new(orfs)
}
