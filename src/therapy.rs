//! Core types for **therapeutic candidates**, **defense profiles** and **trial results**.
//!
//! Catalog entries live in the binary as constants (see [`crate::catalog`]), so
//! [`Therapeutic`] holds `&'static str` fields and is `const`-constructible.
//! Trial inputs and outputs are owned and serde-serializable because they cross
//! the library boundary as JSON.
use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Family of a therapeutic candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TherapyKind {
    Phage,
    Antibiotic,
}

impl fmt::Display for TherapyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::kind_to_str(*self))
    }
}

/// Pharmacological class of an antibiotic.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DrugClass {
    Carbapenem,
    Fluoroquinolone,
    Aminoglycoside,
    Polymyxin,
}

impl fmt::Display for DrugClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DrugClass::Carbapenem => "Carbapenem",
            DrugClass::Fluoroquinolone => "Fluoroquinolone",
            DrugClass::Aminoglycoside => "Aminoglycoside",
            DrugClass::Polymyxin => "Polymyxin",
        };
        f.write_str(s)
    }
}

/// What the trial engine needs to score a candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Agent {
    /// Lytic phage with a base lysis efficiency in `[0, 1]`.
    Phage { efficiency: f64 },
    /// Small-molecule antibiotic of a given class.
    Antibiotic { class: DrugClass },
}

/// A single catalog entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Therapeutic {
    /// Display name (e.g. `"T4-Like Coliphage"`, `"Meropenem"`).
    pub name: &'static str,
    /// Bacterial structure the agent acts on (receptor, enzyme, membrane).
    pub target: &'static str,
    pub agent: Agent,
}

impl Therapeutic {
    pub fn kind(&self) -> TherapyKind {
        match self.agent {
            Agent::Phage { .. } => TherapyKind::Phage,
            Agent::Antibiotic { .. } => TherapyKind::Antibiotic,
        }
    }

    /// Base efficiency for phages, `None` for antibiotics.
    pub fn efficiency(&self) -> Option<f64> {
        match self.agent {
            Agent::Phage { efficiency } => Some(efficiency),
            Agent::Antibiotic { .. } => None,
        }
    }

    /// Drug class for antibiotics, `None` for phages.
    pub fn class(&self) -> Option<DrugClass> {
        match self.agent {
            Agent::Antibiotic { class } => Some(class),
            Agent::Phage { .. } => None,
        }
    }
}

/// Whether a CRISPR array was detected in the host genome.
///
/// Deserializes leniently: `"Present"` (any case) is [`CrisprStatus::Present`],
/// anything else is [`CrisprStatus::Absent`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum CrisprStatus {
    Present,
    #[default]
    Absent,
}

impl CrisprStatus {
    pub fn from_present(present: bool) -> Self {
        if present { CrisprStatus::Present } else { CrisprStatus::Absent }
    }

    pub fn is_present(self) -> bool {
        matches!(self, CrisprStatus::Present)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CrisprStatus::Present => "Present",
            CrisprStatus::Absent => "Absent",
        }
    }
}

impl From<String> for CrisprStatus {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::str::FromStr for CrisprStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            other => Err(format!("Unknown CRISPR status: {}", other)),
        }
    }
}

impl fmt::Display for CrisprStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bacterial defenses the trial engine scores candidates against.
///
/// Missing keys default to "no resistance genes" and [`CrisprStatus::Absent`].
/// Genes may be given as plain strings or as `{ "gene": "..." }` records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DefenseProfile {
    #[serde(default, deserialize_with = "gene_names")]
    pub resistance_genes: Vec<String>,
    #[serde(default)]
    pub crispr_status: CrisprStatus,
}

impl DefenseProfile {
    pub fn new<I, S>(genes: I, crispr_status: CrisprStatus) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resistance_genes: genes.into_iter().map(Into::into).collect(),
            crispr_status,
        }
    }
}

fn gene_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum GeneEntry {
        Name(String),
        Record { gene: String },
    }

    let entries = Option::<Vec<GeneEntry>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(|e| match e {
            GeneEntry::Name(g) | GeneEntry::Record { gene: g } => g,
        })
        .collect())
}

/// Outcome label of a trial.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TrialStatus {
    Effective,
    Resistant,
}

impl fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrialStatus::Effective => "Effective",
            TrialStatus::Resistant => "Resistant",
        })
    }
}

/// Scored outcome of one candidate in one trial run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    #[serde(rename = "type")]
    pub kind: TherapyKind,
    pub name: String,
    pub target: String,
    /// Success probability, one decimal, within `[0, 99]`.
    pub success_prob: f64,
    pub status: TrialStatus,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crispr_status_parses_leniently() {
        assert_eq!(CrisprStatus::from("Present".to_string()), CrisprStatus::Present);
        assert_eq!(CrisprStatus::from("present".to_string()), CrisprStatus::Present);
        assert_eq!(CrisprStatus::from("Absent".to_string()), CrisprStatus::Absent);
        assert_eq!(CrisprStatus::from("unknown".to_string()), CrisprStatus::Absent);
        assert!("maybe".parse::<CrisprStatus>().is_err());
    }

    #[test]
    fn defense_profile_defaults_missing_keys() {
        let p: DefenseProfile = serde_json::from_str("{}").unwrap();
        assert!(p.resistance_genes.is_empty());
        assert_eq!(p.crispr_status, CrisprStatus::Absent);

        let p: DefenseProfile = serde_json::from_str(r#"{"resistance_genes": null}"#).unwrap();
        assert!(p.resistance_genes.is_empty());
    }

    #[test]
    fn defense_profile_accepts_records_and_strings() {
        let p: DefenseProfile = serde_json::from_str(
            r#"{"resistance_genes": [{"gene": "blaKPC"}, "aacC1"], "crispr_status": "Present"}"#,
        )
        .unwrap();
        assert_eq!(p.resistance_genes, vec!["blaKPC", "aacC1"]);
        assert!(p.crispr_status.is_present());
    }

    #[test]
    fn trial_result_serializes_type_key() {
        let r = TrialResult {
            kind: TherapyKind::Antibiotic,
            name: "Meropenem".into(),
            target: "Cell Wall (PBP)".into(),
            success_prob: 10.0,
            status: TrialStatus::Resistant,
            notes: "Enzymatic degradation (Beta-lactamase)".into(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["type"], "Antibiotic");
        assert_eq!(v["status"], "Resistant");
        assert_eq!(v["success_prob"], 10.0);
    }
}
