//! Resistance-gene calls from signature hits.
//!
//! ORFs are scanned first; a sequence with no ORFs (short contigs, partial
//! genes) is scanned whole. Each gene is reported once, in discovery order.

use super::{ResistanceGene, ResistanceResult};
use crate::detect::{Signature, SignatureScanner};

pub fn predict_resistance(scanner: &SignatureScanner, seq: &str, orfs: &[String]) -> ResistanceResult {
    let mut genes: Vec<ResistanceGene> = Vec::new();
    if orfs.is_empty() {
        record_hits(&mut genes, scanner.scan(seq.as_bytes()));
    } else {
        for orf in orfs {
            record_hits(&mut genes, scanner.scan(orf.as_bytes()));
        }
    }
    ResistanceResult::new(genes)
}

fn record_hits(genes: &mut Vec<ResistanceGene>, hits: Vec<&'static Signature>) {
    for sig in hits {
        let gene = sig.name.to_ascii_lowercase();
        if !genes.iter().any(|g| g.gene == gene) {
            genes.push(ResistanceGene { gene });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::markers::RESISTANCE_MARKERS;

    fn scanner() -> SignatureScanner {
        SignatureScanner::new(RESISTANCE_MARKERS).unwrap()
    }

    fn sig(name: &str) -> &'static str {
        RESISTANCE_MARKERS.iter().find(|s| s.name == name).unwrap().sequence
    }

    #[test]
    fn scans_orfs_in_order_and_dedups() {
        let orfs = vec![
            format!("ATG{}TAA", sig("aacc1")),
            format!("ATG{}{}TAA", sig("blakpc"), sig("aacc1")),
        ];
        let r = predict_resistance(&scanner(), "", &orfs);
        let names: Vec<_> = r.gene_names().collect();
        assert_eq!(names, vec!["aacc1", "blakpc"]);
        assert_eq!(r.total_resistance_genes, 2);
    }

    #[test]
    fn falls_back_to_whole_sequence_without_orfs() {
        let seq = format!("CCCC{}GGGG", sig("mcr-1"));
        let r = predict_resistance(&scanner(), &seq, &[]);
        assert_eq!(r.genes, vec![ResistanceGene { gene: "mcr-1".into() }]);
    }

    #[test]
    fn orf_scan_ignores_intergenic_hits() {
        let seq = format!("{}CCCC", sig("sul1"));
        let orfs = vec!["ATGGCTGCTTAA".to_string()];
        assert_eq!(predict_resistance(&scanner(), &seq, &orfs), ResistanceResult::default());
    }

    #[test]
    fn identifiers_are_lowercase() {
        assert!(RESISTANCE_MARKERS.iter().all(|s| s.name == s.name.to_ascii_lowercase()));
    }
}
