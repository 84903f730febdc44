//! Lytic phage candidates of the virtual therapeutic library.
//!
//! Efficiencies are base lysis probabilities in `[0, 1]` against a fully
//! susceptible host; the trial engine scales them to percentages and applies
//! CRISPR interference on top.

use crate::therapy::{Agent, Therapeutic};

/// Broad-host-range T4-like myovirus adsorbing to outer membrane porin C.
pub const T4_LIKE: Therapeutic = Therapeutic {
    name: "T4-Like Coliphage",
    target: "OmpC Receptor",
    agent: Agent::Phage { efficiency: 0.95 },
};

/// Lambda derivative using the maltoporin receptor.
pub const LAMBDA_ZETA: Therapeutic = Therapeutic {
    name: "Lambda-Zeta Variant",
    target: "LamB Receptor",
    agent: Agent::Phage { efficiency: 0.88 },
};

pub const PODOVIRIDAE_RAPID: Therapeutic = Therapeutic {
    name: "Podoviridae Rapid Lysis",
    target: "LPS Layer",
    agent: Agent::Phage { efficiency: 0.92 },
};

/// Engineered filamentous phage; male-specific, so the weakest lytic option.
pub const M13_MOD: Therapeutic = Therapeutic {
    name: "Filamentous M13-Mod",
    target: "F-Pilus",
    agent: Agent::Phage { efficiency: 0.65 },
};

pub const JUMBO_P660: Therapeutic = Therapeutic {
    name: "Novel Jumbo Phage P-660",
    target: "Flagella",
    agent: Agent::Phage { efficiency: 0.99 },
};
