//! Conversion of schema instances into sparse feature rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::schema::{AttributeKind, AttributeValue, Instance, ModelSchema};
use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::error::{EsgdocError, Result};

/// Sparse numeric view of an instance.
///
/// String attributes contribute word features to `terms`; numeric and
/// nominal attributes contribute one entry each to `numeric`, keyed by
/// attribute name. Ordered maps keep every sum over a row deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRow {
    pub terms: BTreeMap<String, f64>,
    pub numeric: BTreeMap<String, f64>,
}

impl FeatureRow {
    /// Value of a word feature; absent words are zero.
    pub fn term(&self, term: &str) -> f64 {
        self.terms.get(term).copied().unwrap_or(0.0)
    }

    /// Value of a numeric attribute, if present.
    pub fn numeric(&self, name: &str) -> Option<f64> {
        self.numeric.get(name).copied()
    }
}

/// Word vector settings stored with a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizerSettings {
    /// Lowercase words before counting.
    pub lowercase: bool,
    /// Use word counts instead of word presence.
    pub word_counts: bool,
}

impl Default for VectorizerSettings {
    fn default() -> Self {
        VectorizerSettings {
            lowercase: true,
            word_counts: false,
        }
    }
}

/// Turns string attributes into word features.
#[derive(Debug, Clone)]
pub struct WordVectorizer {
    settings: VectorizerSettings,
    analyzer: StandardAnalyzer,
}

impl WordVectorizer {
    /// Create a vectorizer from stored settings.
    pub fn new(settings: VectorizerSettings) -> Result<Self> {
        let analyzer = StandardAnalyzer::with_lowercase(settings.lowercase)?;
        Ok(WordVectorizer { settings, analyzer })
    }

    /// The settings this vectorizer was built from.
    pub fn settings(&self) -> VectorizerSettings {
        self.settings
    }

    /// Add the words of a text to a term map.
    pub fn add_words(&self, text: &str, terms: &mut BTreeMap<String, f64>) -> Result<()> {
        for token in self.analyzer.analyze(text)? {
            let value = terms.entry(token.text).or_insert(0.0);
            if self.settings.word_counts {
                *value += 1.0;
            } else {
                *value = 1.0;
            }
        }
        Ok(())
    }

    /// Vectorize an instance that fits `schema`.
    ///
    /// Missing values contribute nothing.
    pub fn vectorize(&self, schema: &ModelSchema, instance: &Instance) -> Result<FeatureRow> {
        schema.check_instance(instance)?;

        let mut row = FeatureRow::default();
        for (i, attribute) in schema.feature_attributes() {
            match (&attribute.kind, &instance.values[i]) {
                (_, AttributeValue::Missing) => {}
                (AttributeKind::String, AttributeValue::Text(text)) => {
                    self.add_words(text, &mut row.terms)?;
                }
                (AttributeKind::Numeric, AttributeValue::Numeric(value)) => {
                    row.numeric.insert(attribute.name.clone(), *value);
                }
                (AttributeKind::Nominal { values }, AttributeValue::Text(value)) => {
                    let index = values.iter().position(|v| v == value).ok_or_else(|| {
                        EsgdocError::schema(format!(
                            "'{value}' is not a value of '{}'",
                            attribute.name
                        ))
                    })?;
                    row.numeric.insert(attribute.name.clone(), index as f64);
                }
                (kind, value) => {
                    return Err(EsgdocError::schema(format!(
                        "cannot vectorize {value:?} as {kind:?}"
                    )));
                }
            }
        }

        Ok(row)
    }
}
