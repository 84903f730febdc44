//! Registry of therapeutic candidates scored by the trial engine.
//!
//! The registry is a read-only `&'static` slice shared by every concurrent
//! invocation without synchronisation. Declaration order matters: phages come
//! first, then antibiotics, and ties in the ranked output keep this order.
use crate::data::antibiotics::*;
use crate::data::phages::*;
use crate::therapy::{Therapeutic, TherapyKind};

pub const PHAGES: &[Therapeutic] = &[T4_LIKE, LAMBDA_ZETA, PODOVIRIDAE_RAPID, M13_MOD, JUMBO_P660];

pub const ANTIBIOTICS: &[Therapeutic] = &[MEROPENEM, CIPROFLOXACIN, GENTAMICIN, POLYMYXIN_B];

/// Full library in trial order.
pub const CATALOG: &[Therapeutic] = &[
    // Phages
    T4_LIKE,
    LAMBDA_ZETA,
    PODOVIRIDAE_RAPID,
    M13_MOD,
    JUMBO_P660,
    // Antibiotics
    MEROPENEM,
    CIPROFLOXACIN,
    GENTAMICIN,
    POLYMYXIN_B,
];

/// Catalog entries of one family, in declaration order.
pub fn of_kind(kind: TherapyKind) -> &'static [Therapeutic] {
    match kind {
        TherapyKind::Phage => PHAGES,
        TherapyKind::Antibiotic => ANTIBIOTICS,
    }
}
