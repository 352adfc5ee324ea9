//! Naive Bayes classifier.
//!
//! Word features follow a multinomial model with Laplace smoothing; numeric
//! attributes follow one Gaussian per class. Words that never occurred in
//! training are ignored.

use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::classifier::{
    DISTRIBUTION_TOLERANCE, ProbabilisticClassifier, check_distribution, normalize, softmax,
};
use super::vectorizer::FeatureRow;
use crate::error::{EsgdocError, Result};

/// Smallest standard deviation used when evaluating a Gaussian.
const MIN_STD_DEV: f64 = 1e-6;

/// Per-class normal distribution of a numeric attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    pub mean: f64,
    pub std_dev: f64,
}

impl Gaussian {
    /// Log density at `x`.
    pub fn log_density(&self, x: f64) -> f64 {
        let std_dev = self.std_dev.max(MIN_STD_DEV);
        let z = (x - self.mean) / std_dev;
        -0.5 * z * z - (std_dev * (2.0 * PI).sqrt()).ln()
    }
}

/// Naive Bayes over word counts and numeric attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayes {
    /// Class prior probabilities.
    priors: Vec<f64>,
    /// Per class: word -> occurrences in the training documents of that class.
    word_counts: Vec<BTreeMap<String, f64>>,
    /// Per numeric attribute: one Gaussian per class.
    gaussians: BTreeMap<String, Vec<Gaussian>>,
    /// Number of distinct words over all classes.
    vocabulary_size: usize,
    /// Per class: total word occurrences.
    class_totals: Vec<f64>,
}

impl NaiveBayes {
    /// Create a classifier from trained statistics.
    ///
    /// Priors are normalized; they must be non-negative and not all zero.
    pub fn new(
        priors: Vec<f64>,
        word_counts: Vec<BTreeMap<String, f64>>,
        gaussians: BTreeMap<String, Vec<Gaussian>>,
    ) -> Result<Self> {
        if priors.iter().all(|p| *p == 0.0) {
            return Err(EsgdocError::model("naive bayes priors are all zero"));
        }
        let priors = normalize(&priors)?;
        let vocabulary_size = vocabulary_size(&word_counts);
        let class_totals = class_totals(&word_counts);

        let classifier = NaiveBayes {
            priors,
            word_counts,
            gaussians,
            vocabulary_size,
            class_totals,
        };
        classifier.check()?;
        Ok(classifier)
    }

    /// Check the internal consistency of the parameters.
    ///
    /// Deserialized models are validated here only, so this repeats what
    /// `new` establishes and recomputes the derived word totals.
    pub fn check(&self) -> Result<()> {
        let classes = self.priors.len();
        if classes == 0 {
            return Err(EsgdocError::model("naive bayes has no classes"));
        }
        check_distribution(&self.priors)
            .map_err(|e| EsgdocError::model(format!("invalid naive bayes priors: {e}")))?;
        if self.word_counts.len() != classes || self.class_totals.len() != classes {
            return Err(EsgdocError::model(format!(
                "naive bayes has {classes} priors but {} word count tables",
                self.word_counts.len()
            )));
        }
        if self
            .word_counts
            .iter()
            .flat_map(|counts| counts.values())
            .any(|c| !c.is_finite() || *c < 0.0)
        {
            return Err(EsgdocError::model("naive bayes word counts must be non-negative"));
        }
        if self.vocabulary_size != vocabulary_size(&self.word_counts) {
            return Err(EsgdocError::model(format!(
                "naive bayes vocabulary size {} does not match its word count tables",
                self.vocabulary_size
            )));
        }
        let totals_match = class_totals(&self.word_counts)
            .iter()
            .zip(&self.class_totals)
            .all(|(expected, stored)| (expected - stored).abs() <= DISTRIBUTION_TOLERANCE);
        if !totals_match {
            return Err(EsgdocError::model(
                "naive bayes class totals do not match its word count tables",
            ));
        }
        for (name, per_class) in &self.gaussians {
            if per_class.len() != classes {
                return Err(EsgdocError::model(format!(
                    "attribute '{name}' has {} gaussians, expected {classes}",
                    per_class.len()
                )));
            }
            if per_class
                .iter()
                .any(|g| !g.mean.is_finite() || !g.std_dev.is_finite() || g.std_dev < 0.0)
            {
                return Err(EsgdocError::model(format!(
                    "attribute '{name}' has a gaussian with a non-finite mean or invalid deviation"
                )));
            }
        }
        Ok(())
    }

    fn in_vocabulary(&self, term: &str) -> bool {
        self.word_counts.iter().any(|counts| counts.contains_key(term))
    }
}

fn vocabulary_size(word_counts: &[BTreeMap<String, f64>]) -> usize {
    word_counts
        .iter()
        .flat_map(|counts| counts.keys())
        .collect::<BTreeSet<_>>()
        .len()
}

fn class_totals(word_counts: &[BTreeMap<String, f64>]) -> Vec<f64> {
    word_counts
        .iter()
        .map(|counts| counts.values().sum())
        .collect()
}

impl ProbabilisticClassifier for NaiveBayes {
    fn distribution(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        let vocabulary = self.vocabulary_size as f64;

        let scores: Vec<f64> = (0..self.priors.len())
            .map(|class| {
                let mut score = self.priors[class].ln();

                let denominator = self.class_totals[class] + vocabulary;
                for (term, weight) in &row.terms {
                    if !self.in_vocabulary(term) {
                        continue;
                    }
                    let count = self.word_counts[class].get(term).copied().unwrap_or(0.0);
                    score += weight * ((count + 1.0) / denominator).ln();
                }

                for (name, per_class) in &self.gaussians {
                    if let Some(x) = row.numeric(name) {
                        score += per_class[class].log_density(x);
                    }
                }

                score
            })
            .collect();

        softmax(&scores)
    }

    fn num_classes(&self) -> usize {
        self.priors.len()
    }

    fn name(&self) -> &'static str {
        "naive_bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::classifier::check_distribution;

    fn counts(words: &[(&str, f64)]) -> BTreeMap<String, f64> {
        words.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    fn row(words: &[&str]) -> FeatureRow {
        FeatureRow {
            terms: words.iter().map(|w| (w.to_string(), 1.0)).collect(),
            numeric: BTreeMap::new(),
        }
    }

    fn classifier() -> NaiveBayes {
        NaiveBayes::new(
            vec![0.5, 0.5],
            vec![
                counts(&[("sustainability", 8.0), ("stakeholders", 6.0)]),
                counts(&[("copyright", 5.0), ("navigation", 5.0)]),
            ],
            BTreeMap::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_words_drive_prediction() {
        let nb = classifier();

        let prediction = nb.predict(&row(&["sustainability", "stakeholders"])).unwrap();
        assert_eq!(prediction.label_index, 0);
        check_distribution(&prediction.distribution).unwrap();

        let prediction = nb.predict(&row(&["navigation"])).unwrap();
        assert_eq!(prediction.label_index, 1);
    }

    #[test]
    fn test_unknown_words_fall_back_to_priors() {
        let nb = NaiveBayes::new(
            vec![3.0, 1.0],
            vec![counts(&[("policy", 1.0)]), counts(&[("cookie", 1.0)])],
            BTreeMap::new(),
        )
        .unwrap();

        let distribution = nb.distribution(&row(&["unseen"])).unwrap();
        assert!((distribution[0] - 0.75).abs() < 1e-12);
        assert!((distribution[1] - 0.25).abs() < 1e-12);

        let distribution = nb.distribution(&FeatureRow::default()).unwrap();
        assert!((distribution[0] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_attribute() {
        let mut gaussians = BTreeMap::new();
        gaussians.insert(
            "length".to_string(),
            vec![
                Gaussian {
                    mean: 200.0,
                    std_dev: 50.0,
                },
                Gaussian {
                    mean: 3.0,
                    std_dev: 2.0,
                },
            ],
        );
        let nb = NaiveBayes::new(vec![0.5, 0.5], vec![counts(&[]), counts(&[])], gaussians).unwrap();

        let mut short = FeatureRow::default();
        short.numeric.insert("length".to_string(), 2.0);
        assert_eq!(nb.predict(&short).unwrap().label_index, 1);

        let mut long = FeatureRow::default();
        long.numeric.insert("length".to_string(), 180.0);
        let prediction = nb.predict(&long).unwrap();
        assert_eq!(prediction.label_index, 0);
        check_distribution(&prediction.distribution).unwrap();
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(NaiveBayes::new(vec![0.0, 0.0], vec![counts(&[]), counts(&[])], BTreeMap::new()).is_err());
        assert!(NaiveBayes::new(vec![0.5, 0.5], vec![counts(&[])], BTreeMap::new()).is_err());
        assert!(NaiveBayes::new(vec![], vec![], BTreeMap::new()).is_err());

        let mut gaussians = BTreeMap::new();
        gaussians.insert(
            "length".to_string(),
            vec![Gaussian {
                mean: 0.0,
                std_dev: 1.0,
            }],
        );
        assert!(NaiveBayes::new(vec![0.5, 0.5], vec![counts(&[]), counts(&[])], gaussians).is_err());
    }

    #[test]
    fn test_check_catches_tampered_parameters() {
        let mut nb = classifier();
        nb.priors = vec![-0.5, 1.5];
        assert!(nb.check().is_err());

        let mut nb = classifier();
        nb.priors = vec![0.0, 0.0];
        assert!(nb.check().is_err());

        let mut nb = classifier();
        nb.class_totals[0] += 1.0;
        assert!(nb.check().is_err());

        let mut nb = classifier();
        nb.vocabulary_size = 1;
        assert!(nb.check().is_err());

        let mut nb = classifier();
        nb.gaussians.insert(
            "length".to_string(),
            vec![
                Gaussian {
                    mean: f64::NAN,
                    std_dev: 1.0,
                },
                Gaussian {
                    mean: 0.0,
                    std_dev: 1.0,
                },
            ],
        );
        assert!(nb.check().is_err());

        assert!(classifier().check().is_ok());
    }
}
