//! Sequence normalisation.
//!
//! Raw input may be pasted text or a FASTA file: header lines (`>`) and blank
//! lines are dropped, every remaining line is trimmed, and the lines are joined
//! and upper-cased. The alphabet is not validated; unexpected symbols are passed
//! through to the providers.

/// Normalise raw sequence text into a single uppercase string.
///
/// Total and pure: empty input yields an empty string, and the function is
/// idempotent.
///
/// # Examples
/// ```
/// assert_eq!(phazegen::normalize::normalize_sequence(">seq1\nATGC atgc\n\nggcc\n"), "ATGC ATGCGGCC");
/// ```
pub fn normalize_sequence(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('>') {
            continue;
        }
        out.push_str(line);
    }
    out.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_header_and_whitespace() {
        assert_eq!(normalize_sequence(">seq1\nATGCATGCATGC\n"), "ATGCATGCATGC");
        assert_eq!(normalize_sequence("  acgt \r\n>h2 desc\n  tt\n"), "ACGTTT");
    }

    #[test]
    fn empty_and_header_only_inputs() {
        assert_eq!(normalize_sequence(""), "");
        assert_eq!(normalize_sequence(">only a header\n\n"), "");
    }

    #[test]
    fn malformed_symbols_pass_through() {
        assert_eq!(normalize_sequence("acgn-x*"), "ACGN-X*");
    }

    proptest! {
        #[test]
        fn idempotent(raw in "[ACGTNacgtn> \n\t]{0,200}") {
            let once = normalize_sequence(&raw);
            prop_assert_eq!(normalize_sequence(&once), once.clone());
        }

        #[test]
        fn output_symbols_come_from_input(raw in "[ACGTacgt> \n]{0,200}") {
            let upper = raw.to_uppercase();
            let out = normalize_sequence(&raw);
            prop_assert!(out.chars().all(|c| upper.contains(c)));
            prop_assert!(!out.contains('\n'));
        }
    }
}
