//! Classification taxonomies for ESG disclosure documents.
//!
//! Two label sets exist. The full taxonomy distinguishes seven document
//! types; the collapsed taxonomy only separates miscellaneous ESG material
//! from noise. A model is trained against exactly one of them and the run
//! must be configured with the same one.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{EsgdocError, Result};

const SEVEN_CLASS_LABELS: &[&str] = &["AR", "CSR", "CC", "COC", "MISC", "POLICY", "NOISE"];
const TWO_CLASS_LABELS: &[&str] = &["MISC", "NOISE"];

/// The label set a model was trained against.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Taxonomy {
    /// AR, CSR, CC, COC, MISC, POLICY, NOISE
    #[default]
    Seven,
    /// MISC, NOISE
    Two,
}

impl Taxonomy {
    /// The labels of this taxonomy, in class-index order.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            Taxonomy::Seven => SEVEN_CLASS_LABELS,
            Taxonomy::Two => TWO_CLASS_LABELS,
        }
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.labels().len()
    }

    /// Taxonomies are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Map a class index to its label.
    pub fn label(&self, index: usize) -> Option<&'static str> {
        self.labels().get(index).copied()
    }

    /// Map a label to its class index.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels().iter().position(|l| *l == label)
    }

    /// Check that a label belongs to this taxonomy.
    pub fn require(&self, label: &str) -> Result<usize> {
        self.index_of(label).ok_or_else(|| {
            EsgdocError::configuration(format!(
                "label '{label}' is not part of the {self} taxonomy {{{}}}",
                self.labels().join(", ")
            ))
        })
    }

    /// Check whether a list of class values equals this taxonomy, in order.
    pub fn matches(&self, values: &[String]) -> bool {
        values.len() == self.len() && values.iter().zip(self.labels()).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Taxonomy::Seven => write!(f, "seven-class"),
            Taxonomy::Two => write!(f, "two-class"),
        }
    }
}

impl FromStr for Taxonomy {
    type Err = EsgdocError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "seven" | "7" => Ok(Taxonomy::Seven),
            "two" | "2" => Ok(Taxonomy::Two),
            other => Err(EsgdocError::configuration(format!(
                "unknown taxonomy '{other}' (expected 'seven' or 'two')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_order() {
        assert_eq!(Taxonomy::Seven.label(0), Some("AR"));
        assert_eq!(Taxonomy::Seven.label(6), Some("NOISE"));
        assert_eq!(Taxonomy::Seven.label(7), None);
        assert_eq!(Taxonomy::Two.labels(), &["MISC", "NOISE"]);
    }

    #[test]
    fn test_index_of() {
        assert_eq!(Taxonomy::Seven.index_of("CSR"), Some(1));
        assert_eq!(Taxonomy::Two.index_of("NOISE"), Some(1));
        assert_eq!(Taxonomy::Two.index_of("CSR"), None);
    }

    #[test]
    fn test_require_rejects_foreign_label() {
        assert!(Taxonomy::Seven.require("POLICY").is_ok());
        let err = Taxonomy::Two.require("POLICY").unwrap_err();
        assert!(matches!(err, EsgdocError::Configuration(_)));
    }

    #[test]
    fn test_matches_is_order_sensitive() {
        let two = vec!["MISC".to_string(), "NOISE".to_string()];
        let swapped = vec!["NOISE".to_string(), "MISC".to_string()];
        assert!(Taxonomy::Two.matches(&two));
        assert!(!Taxonomy::Two.matches(&swapped));
        assert!(!Taxonomy::Seven.matches(&two));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("seven".parse::<Taxonomy>().unwrap(), Taxonomy::Seven);
        assert_eq!("2".parse::<Taxonomy>().unwrap(), Taxonomy::Two);
        assert!("five".parse::<Taxonomy>().is_err());
    }
}
