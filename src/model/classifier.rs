//! Probabilistic classifier trait and shared helpers.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::vectorizer::FeatureRow;
use crate::error::{EsgdocError, Result};

/// Tolerance for a distribution's sum.
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// The outcome of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Index of the most probable class.
    pub label_index: usize,
    /// Posterior probability of every class, in class-index order.
    pub distribution: Vec<f64>,
}

impl Prediction {
    /// Probability of the predicted class.
    pub fn probability(&self) -> f64 {
        self.distribution[self.label_index]
    }
}

/// A classifier producing a posterior distribution over classes.
///
/// Implementations of this trait back a loaded model. The batch driver only
/// ever sees this trait.
pub trait ProbabilisticClassifier: Send + Sync + Debug {
    /// Compute the posterior distribution for a row.
    ///
    /// The returned vector has `num_classes()` entries summing to 1.
    fn distribution(&self, row: &FeatureRow) -> Result<Vec<f64>>;

    /// Number of classes this classifier distinguishes.
    fn num_classes(&self) -> usize;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &'static str;

    /// Predict the most probable class.
    ///
    /// Ties go to the lowest class index.
    fn predict(&self, row: &FeatureRow) -> Result<Prediction> {
        let distribution = self.distribution(row)?;
        let label_index = argmax(&distribution).ok_or_else(|| {
            EsgdocError::model(format!("{} returned an empty distribution", self.name()))
        })?;
        Ok(Prediction {
            label_index,
            distribution,
        })
    }
}

/// Index of the largest value; the first one wins ties. NaN never wins.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Turn scores (log-space or margins) into probabilities.
pub fn softmax(scores: &[f64]) -> Result<Vec<f64>> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return Err(EsgdocError::model("cannot normalize non-finite scores"));
    }

    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    Ok(exps.into_iter().map(|e| e / sum).collect())
}

/// Scale non-negative weights to sum to 1; all-zero weights become uniform.
pub fn normalize(weights: &[f64]) -> Result<Vec<f64>> {
    if weights.is_empty() {
        return Err(EsgdocError::model("cannot normalize an empty distribution"));
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(EsgdocError::model(format!(
            "invalid class weights {weights:?}"
        )));
    }

    let sum: f64 = weights.iter().sum();
    if sum == 0.0 {
        let uniform = 1.0 / weights.len() as f64;
        return Ok(vec![uniform; weights.len()]);
    }
    Ok(weights.iter().map(|w| w / sum).collect())
}

/// Check that a distribution is a proper probability distribution.
pub fn check_distribution(distribution: &[f64]) -> Result<()> {
    if let Some(p) = distribution
        .iter()
        .find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0)
    {
        return Err(EsgdocError::model(format!(
            "probability {p} outside [0, 1]"
        )));
    }
    let sum: f64 = distribution.iter().sum();
    if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
        return Err(EsgdocError::model(format!(
            "distribution sums to {sum}, expected 1"
        )));
    }
    Ok(())
}
