//! Linear support vector classifier.
//!
//! One linear machine per class (one-vs-rest). Numeric attributes are
//! standardized before weighting. The margins are turned into a
//! distribution with a softmax.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::classifier::{ProbabilisticClassifier, softmax};
use super::vectorizer::FeatureRow;
use crate::error::{EsgdocError, Result};

/// Weights of one class's machine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassWeights {
    pub bias: f64,
    pub terms: BTreeMap<String, f64>,
    pub numeric: BTreeMap<String, f64>,
}

/// Mean and standard deviation used to standardize a numeric attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Standardization {
    pub mean: f64,
    pub std_dev: f64,
}

impl Standardization {
    fn apply(&self, x: f64) -> f64 {
        if self.std_dev > 0.0 {
            (x - self.mean) / self.std_dev
        } else {
            x - self.mean
        }
    }
}

/// One-vs-rest linear SVM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSvm {
    machines: Vec<ClassWeights>,
    scaling: BTreeMap<String, Standardization>,
}

impl LinearSvm {
    /// Create a classifier from one weight vector per class.
    pub fn new(
        machines: Vec<ClassWeights>,
        scaling: BTreeMap<String, Standardization>,
    ) -> Result<Self> {
        let svm = LinearSvm { machines, scaling };
        svm.check()?;
        Ok(svm)
    }

    /// Check the internal consistency of the parameters.
    pub fn check(&self) -> Result<()> {
        if self.machines.is_empty() {
            return Err(EsgdocError::model("linear svm has no classes"));
        }
        let finite = self.machines.iter().all(|m| {
            m.bias.is_finite()
                && m.terms.values().all(|w| w.is_finite())
                && m.numeric.values().all(|w| w.is_finite())
        });
        if !finite {
            return Err(EsgdocError::model("linear svm weights must be finite"));
        }
        Ok(())
    }

    /// Raw margin of every class.
    pub fn margins(&self, row: &FeatureRow) -> Vec<f64> {
        self.machines
            .iter()
            .map(|machine| {
                let mut margin = machine.bias;
                for (term, weight) in &machine.terms {
                    margin += weight * row.term(term);
                }
                for (name, weight) in &machine.numeric {
                    if let Some(x) = row.numeric(name) {
                        let x = match self.scaling.get(name) {
                            Some(scaling) => scaling.apply(x),
                            None => x,
                        };
                        margin += weight * x;
                    }
                }
                margin
            })
            .collect()
    }
}

impl ProbabilisticClassifier for LinearSvm {
    fn distribution(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        softmax(&self.margins(row))
    }

    fn num_classes(&self) -> usize {
        self.machines.len()
    }

    fn name(&self) -> &'static str {
        "linear_svm"
    }
}
