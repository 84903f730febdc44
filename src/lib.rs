#![forbid(unsafe_code)]
//! # phazegen
//!
//! Genome analysis and in-silico therapeutic trials for bacterial pathogens.
//! A raw DNA sequence goes through a staged feature pipeline (statistics, ORFs,
//! CRISPR arrays, resistance and virulence markers, risk scores) and the
//! resulting defense profile is used to rank a fixed catalog of phages and
//! antibiotics.
//!
//! ## Highlights
//! - **Static catalog**: therapeutics are embedded as `&'static` constants.
//! - **Pluggable providers**: every feature algorithm sits behind
//!   [`features::FeatureProvider`]; [`features::BuiltinProviders`] is the default.
//! - **Reproducible on request**: pass a seeded RNG to
//!   [`pipeline::Pipeline::run_with_rng`] or [`trial::run_trials`].
//!
//! ## Examples
//! ```rust
//! for t in phazegen::list_therapeutics() { println!("{} ({})", t.name, t.kind()); }
//!
//! let payload = phazegen::analyze(">seq1\nATGCATGCATGC\n").unwrap();
//! assert_eq!(payload.metadata.length, 12);
//! assert_eq!(payload.therapeutics.len(), 9);
//! ```

pub mod catalog;
pub mod config;
pub mod detect;
pub mod error;
pub mod features;
pub mod normalize;
pub mod payload;
pub mod pipeline;
pub mod report;
pub mod seqio;
pub mod therapy;
pub mod trial;
pub mod data { pub mod antibiotics; pub mod markers; pub mod phages; }

use therapy::{Therapeutic, TherapyKind};

/// Return the static therapeutic catalog (phages first, then antibiotics).
pub fn list_therapeutics() -> &'static [Therapeutic] { catalog::CATALOG }

/// Look up a therapeutic by name (case-insensitive).
///
/// # Examples
/// ```rust
/// let t = phazegen::get_therapeutic("meropenem").unwrap();
/// assert_eq!(t.target, "Cell Wall (PBP)");
/// ```
pub fn get_therapeutic(name: &str) -> Option<&'static Therapeutic> {
    catalog::CATALOG.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Convert a [`TherapyKind`] into the label used in results: `Phage` or `Antibiotic`.
pub fn kind_to_str(k: TherapyKind) -> &'static str {
    match k {
        TherapyKind::Phage => "Phage",
        TherapyKind::Antibiotic => "Antibiotic",
    }
}

/// Analyze `raw` with the default configuration and the thread-local RNG.
pub fn analyze(raw: &str) -> error::Result<payload::AnalysisPayload> {
    pipeline::Pipeline::new(config::Config::default())?.run(raw)
}

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
