//! Motif tables scanned by the built-in feature providers.
//!
//! - **CRISPR direct repeats**: consensus repeats of well-characterised arrays,
//!   tagged with the Cas subtype they travel with.
//! - **Resistance signatures**: fixed 24-mers standing in for a resistance gene
//!   panel. Gene identifiers are lowercase, as reported downstream.
//! - **Virulence signatures**: fixed 24-mers for a virulence-factor panel, each
//!   with the weight it adds to the virulence score.
//!
//! Sequences are uppercase DNA. The signature panels are screening stubs, not
//! curated references; swap in a real database by implementing
//! [`crate::features::FeatureProvider`].
use crate::detect::{RepeatMotif, Signature};

/// E. coli K-12 CRISPR-I repeat.
pub const REPEAT_ECOLI_I_E: RepeatMotif = RepeatMotif {
    name: "ecoli_crispr1",
    cas_type: "Type I-E",
    sequence: "GTGTTCCCCGCGCCAGCGGGGATAAACCG",
};

/// Yersinia/Pseudomonas Csy-type repeat.
pub const REPEAT_YPIII_I_F: RepeatMotif = RepeatMotif {
    name: "ypest_crispr_yp1",
    cas_type: "Type I-F",
    sequence: "GTTCACTGCCGTACAGGCAGCTTAGAAA",
};

/// S. pyogenes SF370 repeat (Cas9 system).
pub const REPEAT_SPY_II_A: RepeatMotif = RepeatMotif {
    name: "spy_crispr01",
    cas_type: "Type II-A",
    sequence: "GTTTTAGAGCTATGCTGTTTTGAATGGTCCCAAAAC",
};

pub const CRISPR_REPEATS: &[RepeatMotif] = &[REPEAT_ECOLI_I_E, REPEAT_YPIII_I_F, REPEAT_SPY_II_A];

pub const RESISTANCE_MARKERS: &[Signature] = &[
    Signature { name: "blakpc", sequence: "GCTGTTGTTTGTCGGCGTCGCGGC", weight: 1.0 },
    Signature { name: "blandm", sequence: "ATGGAATTGCCCAATATTATGCAC", weight: 1.0 },
    Signature { name: "blactx-m", sequence: "ATGGTTAAAAAATCACTGCGCCAG", weight: 1.0 },
    Signature { name: "aacc1", sequence: "ATGTTACGCAGCAGCAACGATGTT", weight: 1.0 },
    Signature { name: "aph(3')-ia", sequence: "ATGAGCCATATTCAACGGGAAACG", weight: 1.0 },
    Signature { name: "tet(a)", sequence: "ATGAAACCCAACAGACCCCTGATC", weight: 1.0 },
    Signature { name: "sul1", sequence: "ATGGTGACGGTGTTCGGCATTCTG", weight: 1.0 },
    Signature { name: "mcr-1", sequence: "ATGATGCAGCATACTTCTGTGTGG", weight: 1.0 },
    Signature { name: "qnrs1", sequence: "ATGGAAACCTACAATCATACATAT", weight: 1.0 },
];

pub const VIRULENCE_MARKERS: &[Signature] = &[
    Signature { name: "stx2", sequence: "ATGAAGTGTATATTATTTAAATGG", weight: 35.0 },
    Signature { name: "eae", sequence: "ATGATTACTCATGGTTTTTATGCC", weight: 25.0 },
    Signature { name: "hlya", sequence: "ATGCCAACAATAACCACTGCACAA", weight: 20.0 },
    Signature { name: "iuta", sequence: "ATGATGATTTCAAAGAAATACACG", weight: 10.0 },
    Signature { name: "fimh", sequence: "ATGAAACGAGTTATTACCCTGTTT", weight: 10.0 },
];
