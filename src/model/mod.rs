//! Trained model artifacts.
//!
//! A model artifact bundles everything needed to classify one instance:
//!
//! - metadata describing where the model came from;
//! - the attribute [`ModelSchema`] it was trained on;
//! - the word vector settings used to turn string attributes into features;
//! - one [`Classifier`] variant.
//!
//! Artifacts are stored as JSON, or as bincode when the file name ends in
//! `.bin`. A model is loaded once per batch and shared read-only between
//! workers.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

pub mod classifier;
pub mod naive_bayes;
pub mod random_forest;
pub mod schema;
pub mod svm;
pub mod vectorizer;

pub use classifier::{Prediction, ProbabilisticClassifier};
pub use naive_bayes::NaiveBayes;
pub use random_forest::RandomForest;
pub use schema::{Attribute, AttributeKind, AttributeValue, Instance, ModelSchema};
pub use svm::LinearSvm;
pub use vectorizer::{FeatureRow, VectorizerSettings, WordVectorizer};

use crate::error::{EsgdocError, Result};
use crate::features::ExtractorKind;
use crate::label::Taxonomy;

/// Descriptive information about a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub description: Option<String>,
}

impl ModelMetadata {
    /// Metadata stamped with the current time.
    pub fn new<S: Into<String>>(name: S) -> Self {
        ModelMetadata {
            name: name.into(),
            created_at: Utc::now(),
            description: None,
        }
    }
}

/// The classifier variants a model can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Classifier {
    NaiveBayes(NaiveBayes),
    LinearSvm(LinearSvm),
    RandomForest(RandomForest),
}

impl Classifier {
    fn inner(&self) -> &dyn ProbabilisticClassifier {
        match self {
            Classifier::NaiveBayes(c) => c,
            Classifier::LinearSvm(c) => c,
            Classifier::RandomForest(c) => c,
        }
    }

    /// Check the variant's parameters.
    pub fn check(&self) -> Result<()> {
        match self {
            Classifier::NaiveBayes(c) => c.check(),
            Classifier::LinearSvm(c) => c.check(),
            Classifier::RandomForest(c) => c.check(),
        }
    }
}

impl ProbabilisticClassifier for Classifier {
    fn distribution(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        self.inner().distribution(row)
    }

    fn num_classes(&self) -> usize {
        self.inner().num_classes()
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}

/// The serialized form of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub metadata: ModelMetadata,
    pub schema: ModelSchema,
    pub vectorizer: VectorizerSettings,
    pub classifier: Classifier,
}

/// A loaded, ready to use model.
#[derive(Debug, Clone)]
pub struct Model {
    metadata: ModelMetadata,
    schema: ModelSchema,
    vectorizer: WordVectorizer,
    classifier: Classifier,
}

impl Model {
    /// Assemble a model and check that its parts agree.
    pub fn new(
        metadata: ModelMetadata,
        schema: ModelSchema,
        vectorizer: VectorizerSettings,
        classifier: Classifier,
    ) -> Result<Self> {
        schema.check()?;
        classifier.check()?;
        if classifier.num_classes() != schema.num_classes() {
            return Err(EsgdocError::model(format!(
                "{} distinguishes {} classes but the schema declares {}",
                classifier.name(),
                classifier.num_classes(),
                schema.num_classes()
            )));
        }

        Ok(Model {
            metadata,
            schema,
            vectorizer: WordVectorizer::new(vectorizer)?,
            classifier,
        })
    }

    /// Build a model from its serialized form.
    pub fn from_file(file: ModelFile) -> Result<Self> {
        Model::new(file.metadata, file.schema, file.vectorizer, file.classifier)
    }

    /// The serialized form of this model.
    pub fn to_file(&self) -> ModelFile {
        ModelFile {
            metadata: self.metadata.clone(),
            schema: self.schema.clone(),
            vectorizer: self.vectorizer.settings(),
            classifier: self.classifier.clone(),
        }
    }

    /// Load a model artifact.
    ///
    /// Any failure (missing file, undecodable content, inconsistent
    /// parameters) is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            EsgdocError::configuration(format!("cannot read model {}: {e}", path.display()))
        })?;

        let file: ModelFile = if is_binary(path) {
            bincode::deserialize(&bytes).map_err(|e| {
                EsgdocError::configuration(format!("invalid model {}: {e}", path.display()))
            })?
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                EsgdocError::configuration(format!("invalid model {}: {e}", path.display()))
            })?
        };

        let model = Model::from_file(file).map_err(|e| {
            EsgdocError::configuration(format!("invalid model {}: {e}", path.display()))
        })?;
        debug!(
            "Loaded {} model '{}' from {}",
            model.classifier.name(),
            model.metadata.name,
            path.display()
        );
        Ok(model)
    }

    /// Save this model, as bincode if the path ends in `.bin`, JSON otherwise.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = self.to_file();
        let bytes = if is_binary(path) {
            bincode::serialize(&file)?
        } else {
            serde_json::to_vec_pretty(&file)?
        };
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Check that this model fits a pipeline configuration.
    ///
    /// The class values must equal the taxonomy's labels in order, and the
    /// feature attributes must be those the extractor produces.
    pub fn validate(&self, taxonomy: Taxonomy, extractor: ExtractorKind) -> Result<()> {
        let class_values = self.schema.class_values()?;
        if !taxonomy.matches(class_values) {
            return Err(EsgdocError::configuration(format!(
                "model '{}' was trained on classes {{{}}}, not the {taxonomy} taxonomy {{{}}}",
                self.metadata.name,
                class_values.join(", "),
                taxonomy.labels().join(", ")
            )));
        }

        let expected = ModelSchema::for_pipeline(taxonomy, extractor);
        if self.schema.feature_kinds() != expected.feature_kinds() {
            return Err(EsgdocError::configuration(format!(
                "model '{}' expects attributes {:?}, the {extractor} extractor produces {:?}",
                self.metadata.name,
                self.schema.feature_kinds(),
                expected.feature_kinds()
            )));
        }

        if self.classifier.num_classes() != taxonomy.len() {
            return Err(EsgdocError::configuration(format!(
                "model '{}' distinguishes {} classes, the {taxonomy} taxonomy has {}",
                self.metadata.name,
                self.classifier.num_classes(),
                taxonomy.len()
            )));
        }

        Ok(())
    }

    /// Classify one instance.
    pub fn predict(&self, instance: &Instance) -> Result<Prediction> {
        let row = self.vectorizer.vectorize(&self.schema, instance)?;
        self.classifier.predict(&row)
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn vectorizer_settings(&self) -> VectorizerSettings {
        self.vectorizer.settings()
    }
}

fn is_binary(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bin"))
}
