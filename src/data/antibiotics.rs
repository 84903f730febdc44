//! Antibiotic candidates of the virtual therapeutic library.
//!
//! Antibiotics carry a drug class instead of an efficiency; the trial engine
//! scores them from fixed constants keyed on class and resistance genes.

use crate::therapy::{Agent, DrugClass, Therapeutic};

/// Carbapenem; defeated by carbapenemase-type beta-lactamases (`bla*`).
pub const MEROPENEM: Therapeutic = Therapeutic {
    name: "Meropenem",
    target: "Cell Wall (PBP)",
    agent: Agent::Antibiotic { class: DrugClass::Carbapenem },
};

pub const CIPROFLOXACIN: Therapeutic = Therapeutic {
    name: "Ciprofloxacin",
    target: "DNA Gyrase",
    agent: Agent::Antibiotic { class: DrugClass::Fluoroquinolone },
};

/// Aminoglycoside; defeated by acetyl-/phosphotransferases (`aac*`, `aph*`).
pub const GENTAMICIN: Therapeutic = Therapeutic {
    name: "Gentamicin",
    target: "Ribosome 30S",
    agent: Agent::Antibiotic { class: DrugClass::Aminoglycoside },
};

pub const POLYMYXIN_B: Therapeutic = Therapeutic {
    name: "Polymyxin B",
    target: "Cell Membrane",
    agent: Agent::Antibiotic { class: DrugClass::Polymyxin },
};
