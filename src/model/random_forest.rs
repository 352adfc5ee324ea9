//! Random forest classifier.
//!
//! Each tree routes a row through threshold splits to a leaf holding the
//! class counts of the training rows that reached it. The forest averages
//! the normalized leaf distributions of its trees.

use serde::{Deserialize, Serialize};

use super::classifier::{ProbabilisticClassifier, normalize};
use super::vectorizer::FeatureRow;
use crate::error::{EsgdocError, Result};

/// The feature a split tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitFeature {
    /// A word feature; absent words are zero.
    Term(String),
    /// A numeric attribute; a missing value goes left.
    Numeric(String),
}

impl SplitFeature {
    fn value(&self, row: &FeatureRow) -> Option<f64> {
        match self {
            SplitFeature::Term(term) => Some(row.term(term)),
            SplitFeature::Numeric(name) => row.numeric(name),
        }
    }
}

/// A decision tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// Rows with `feature <= threshold` go left.
    Split {
        feature: SplitFeature,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        class_counts: Vec<f64>,
    },
}

impl TreeNode {
    /// Leaf reached by a row.
    pub fn route(&self, row: &FeatureRow) -> &[f64] {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { class_counts } => return class_counts,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = match feature.value(row) {
                        Some(value) if value > *threshold => right,
                        _ => left,
                    };
                }
            }
        }
    }

    fn check(&self, num_classes: usize) -> Result<()> {
        match self {
            TreeNode::Leaf { class_counts } => {
                if class_counts.len() != num_classes {
                    return Err(EsgdocError::model(format!(
                        "leaf has {} class counts, expected {num_classes}",
                        class_counts.len()
                    )));
                }
                normalize(class_counts).map(|_| ())
            }
            TreeNode::Split {
                threshold,
                left,
                right,
                ..
            } => {
                if !threshold.is_finite() {
                    return Err(EsgdocError::model("split threshold must be finite"));
                }
                left.check(num_classes)?;
                right.check(num_classes)
            }
        }
    }
}

/// An ensemble of decision trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    num_classes: usize,
    trees: Vec<TreeNode>,
}

impl RandomForest {
    /// Create a forest from its trees.
    pub fn new(num_classes: usize, trees: Vec<TreeNode>) -> Result<Self> {
        let forest = RandomForest { num_classes, trees };
        forest.check()?;
        Ok(forest)
    }

    /// Check the internal consistency of the trees.
    pub fn check(&self) -> Result<()> {
        if self.num_classes == 0 {
            return Err(EsgdocError::model("random forest has no classes"));
        }
        if self.trees.is_empty() {
            return Err(EsgdocError::model("random forest has no trees"));
        }
        for tree in &self.trees {
            tree.check(self.num_classes)?;
        }
        Ok(())
    }

    /// Number of trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Whether the forest has no trees.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl ProbabilisticClassifier for RandomForest {
    fn distribution(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        let mut sum = vec![0.0; self.num_classes];
        for tree in &self.trees {
            let leaf = normalize(tree.route(row))?;
            for (total, p) in sum.iter_mut().zip(leaf) {
                *total += p;
            }
        }
        normalize(&sum)
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn name(&self) -> &'static str {
        "random_forest"
    }
}
