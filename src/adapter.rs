//! Classification of feature vectors with a loaded model.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{EsgdocError, Result};
use crate::features::FeatureVector;
use crate::label::Taxonomy;
use crate::model::classifier::check_distribution;
use crate::model::{AttributeKind, AttributeValue, Instance, Model};

/// The label assigned to one document.
///
/// The label always names a member of the adapter's taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub file_name: String,
    pub label: &'static str,
    /// Posterior probability of `label`.
    pub probability: f64,
}

/// Wraps a model and maps its predictions onto a taxonomy.
#[derive(Debug, Clone)]
pub struct ClassifierAdapter {
    model: Arc<Model>,
    taxonomy: Taxonomy,
}

impl ClassifierAdapter {
    /// Create an adapter for a model validated against `taxonomy`.
    pub fn new(model: Arc<Model>, taxonomy: Taxonomy) -> Self {
        ClassifierAdapter { model, taxonomy }
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    pub fn taxonomy(&self) -> Taxonomy {
        self.taxonomy
    }

    /// Build the single-row instance for a feature vector, in schema order.
    pub fn instance(&self, vector: &FeatureVector) -> Result<Instance> {
        let schema = self.model.schema();
        let mut values = Vec::with_capacity(schema.attributes.len());

        for (i, attribute) in schema.attributes.iter().enumerate() {
            if i == schema.class_index {
                values.push(AttributeValue::Missing);
                continue;
            }
            let value = match &attribute.kind {
                AttributeKind::String => AttributeValue::Text(vector.text_value()),
                AttributeKind::Numeric => match vector.numeric_value() {
                    Some(v) => AttributeValue::Numeric(v),
                    None => {
                        return Err(EsgdocError::schema(format!(
                            "{} features have no value for numeric attribute '{}'",
                            vector.kind(),
                            attribute.name
                        )));
                    }
                },
                AttributeKind::Nominal { .. } => {
                    return Err(EsgdocError::schema(format!(
                        "nominal attribute '{}' cannot be filled from document features",
                        attribute.name
                    )));
                }
            };
            values.push(value);
        }

        Ok(Instance { values })
    }

    /// Classify one document's feature vector.
    ///
    /// Every failure is reported as [`EsgdocError::ClassificationFailed`]
    /// naming the file.
    pub fn classify(&self, file_name: &str, vector: &FeatureVector) -> Result<ClassificationResult> {
        self.classify_inner(file_name, vector)
            .map_err(|e| match e {
                EsgdocError::ClassificationFailed { .. } => e,
                other => EsgdocError::classification_failed(file_name, other.to_string()),
            })
    }

    fn classify_inner(&self, file_name: &str, vector: &FeatureVector) -> Result<ClassificationResult> {
        let instance = self.instance(vector)?;
        let prediction = self.model.predict(&instance)?;

        if prediction.distribution.len() != self.taxonomy.len() {
            return Err(EsgdocError::model(format!(
                "distribution has {} entries for {} labels",
                prediction.distribution.len(),
                self.taxonomy.len()
            )));
        }
        check_distribution(&prediction.distribution)?;

        let label = self.taxonomy.label(prediction.label_index).ok_or_else(|| {
            EsgdocError::model(format!(
                "label index {} outside the {} taxonomy",
                prediction.label_index, self.taxonomy
            ))
        })?;

        Ok(ClassificationResult {
            file_name: file_name.to_string(),
            label,
            probability: prediction.probability(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::features::{ExtractorKind, KeywordSet, TextWithLength};
    use crate::model::naive_bayes::Gaussian;
    use crate::model::{Classifier, ModelMetadata, ModelSchema, NaiveBayes, VectorizerSettings};

    fn raw_text_model() -> Arc<Model> {
        let mut misc = BTreeMap::new();
        misc.insert("sustainability".to_string(), 4.0);
        let mut noise = BTreeMap::new();
        noise.insert("cookies".to_string(), 4.0);

        let mut gaussians = BTreeMap::new();
        gaussians.insert(
            "length".to_string(),
            vec![
                Gaussian {
                    mean: 40.0,
                    std_dev: 20.0,
                },
                Gaussian {
                    mean: 2.0,
                    std_dev: 1.0,
                },
            ],
        );

        let model = Model::new(
            ModelMetadata::new("raw"),
            ModelSchema::for_pipeline(Taxonomy::Two, ExtractorKind::RawText),
            VectorizerSettings::default(),
            Classifier::NaiveBayes(
                NaiveBayes::new(vec![0.5, 0.5], vec![misc, noise], gaussians).unwrap(),
            ),
        )
        .unwrap();
        Arc::new(model)
    }

    #[test]
    fn test_classify_raw_text() {
        let adapter = ClassifierAdapter::new(raw_text_model(), Taxonomy::Two);
        let vector = FeatureVector::TextWithLength(TextWithLength {
            text: "Accept cookies. Cookies policy.".to_string(),
            length: 2,
        });

        let result = adapter.classify("c.pdf", &vector).unwrap();
        assert_eq!(result.file_name, "c.pdf");
        assert_eq!(result.label, "NOISE");
        assert!(Taxonomy::Two.labels().contains(&result.label));
        assert!(result.probability > 0.5 && result.probability <= 1.0);
    }

    #[test]
    fn test_instance_order() {
        let adapter = ClassifierAdapter::new(raw_text_model(), Taxonomy::Two);
        let vector = FeatureVector::TextWithLength(TextWithLength {
            text: "x".to_string(),
            length: 7,
        });
        let instance = adapter.instance(&vector).unwrap();
        assert_eq!(
            instance.values,
            vec![
                AttributeValue::Text("x".to_string()),
                AttributeValue::Numeric(7.0),
                AttributeValue::Missing,
            ]
        );
    }

    #[test]
    fn test_wrong_vector_kind_fails_the_document() {
        let adapter = ClassifierAdapter::new(raw_text_model(), Taxonomy::Two);
        let vector = FeatureVector::KeywordSet(KeywordSet::default());

        let err = adapter.classify("a.pdf", &vector).unwrap_err();
        match err {
            EsgdocError::ClassificationFailed { file, .. } => assert_eq!(file, "a.pdf"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_taxonomy_mismatch_fails_the_document() {
        let adapter = ClassifierAdapter::new(raw_text_model(), Taxonomy::Seven);
        let vector = FeatureVector::TextWithLength(TextWithLength {
            text: "sustainability".to_string(),
            length: 1,
        });
        assert!(matches!(
            adapter.classify("a.pdf", &vector).unwrap_err(),
            EsgdocError::ClassificationFailed { .. }
        ));
    }
}
