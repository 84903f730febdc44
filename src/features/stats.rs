//! Sequence length and GC content.

use bio::seq_analysis::gc::gc_content;

use super::{round_to, SequenceStats};

/// Length in symbols and GC percentage (two decimals). Empty input gives zeros.
pub fn basic_stats(seq: &str) -> SequenceStats {
    let length = seq.len();
    if length == 0 {
        return SequenceStats { length, gc_content: 0.0 };
    }
    let gc = f64::from(gc_content(seq.as_bytes())) * 100.0;
    SequenceStats { length, gc_content: round_to(gc, 2) }
}
