//! Attribute schema of a trained model.
//!
//! A schema is the ordered list of attributes a model was trained on, in
//! the layout of a Weka relation: every attribute is a string, numeric or
//! nominal attribute and exactly one nominal attribute is the class.
//! Instances handed to a model must follow the same order and types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EsgdocError, Result};
use crate::features::ExtractorKind;
use crate::label::Taxonomy;

/// Name of the string attribute holding the document features.
pub const TEXT_ATTRIBUTE: &str = "text";
/// Name of the numeric attribute holding the sentence count.
pub const LENGTH_ATTRIBUTE: &str = "length";
/// Name of the class attribute.
pub const CLASS_ATTRIBUTE: &str = "class";

/// The type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    String,
    Numeric,
    Nominal { values: Vec<String> },
}

/// A named attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

impl Attribute {
    /// Create a string attribute.
    pub fn string<S: Into<String>>(name: S) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::String,
        }
    }

    /// Create a numeric attribute.
    pub fn numeric<S: Into<String>>(name: S) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Numeric,
        }
    }

    /// Create a nominal attribute.
    pub fn nominal<S: Into<String>>(name: S, values: Vec<String>) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Nominal { values },
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AttributeKind::String => write!(f, "@attribute {} string", self.name),
            AttributeKind::Numeric => write!(f, "@attribute {} numeric", self.name),
            AttributeKind::Nominal { values } => {
                write!(f, "@attribute {} {{{}}}", self.name, values.join(", "))
            }
        }
    }
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Text(String),
    Numeric(f64),
    Missing,
}

/// One row of attribute values, in schema order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Instance {
    pub values: Vec<AttributeValue>,
}

/// Ordered attributes plus the position of the class attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    pub relation: String,
    pub attributes: Vec<Attribute>,
    pub class_index: usize,
}

impl ModelSchema {
    /// The schema a pipeline configuration produces.
    ///
    /// Keyword pipelines have a single `text` string attribute; raw-text
    /// pipelines add a numeric `length` attribute. The nominal `class`
    /// attribute comes last.
    pub fn for_pipeline(taxonomy: Taxonomy, extractor: ExtractorKind) -> Self {
        let (relation, mut attributes) = match extractor {
            ExtractorKind::Keyword => (
                "kw-based-classification",
                vec![Attribute::string(TEXT_ATTRIBUTE)],
            ),
            ExtractorKind::RawText => (
                "text-based-classification",
                vec![
                    Attribute::string(TEXT_ATTRIBUTE),
                    Attribute::numeric(LENGTH_ATTRIBUTE),
                ],
            ),
        };

        let labels = taxonomy.labels().iter().map(|l| l.to_string()).collect();
        attributes.push(Attribute::nominal(CLASS_ATTRIBUTE, labels));

        ModelSchema {
            relation: relation.to_string(),
            class_index: attributes.len() - 1,
            attributes,
        }
    }

    /// Check the schema's own consistency.
    pub fn check(&self) -> Result<()> {
        if self.class_index >= self.attributes.len() {
            return Err(EsgdocError::schema(format!(
                "class index {} out of range for {} attributes",
                self.class_index,
                self.attributes.len()
            )));
        }
        match &self.attributes[self.class_index].kind {
            AttributeKind::Nominal { values } if !values.is_empty() => Ok(()),
            AttributeKind::Nominal { .. } => {
                Err(EsgdocError::schema("class attribute has no values"))
            }
            _ => Err(EsgdocError::schema(format!(
                "class attribute '{}' is not nominal",
                self.attributes[self.class_index].name
            ))),
        }
    }

    /// The class attribute.
    pub fn class_attribute(&self) -> Result<&Attribute> {
        self.attributes.get(self.class_index).ok_or_else(|| {
            EsgdocError::schema(format!("class index {} out of range", self.class_index))
        })
    }

    /// The values of the class attribute, in class-index order.
    pub fn class_values(&self) -> Result<&[String]> {
        match &self.class_attribute()?.kind {
            AttributeKind::Nominal { values } => Ok(values),
            _ => Err(EsgdocError::schema("class attribute is not nominal")),
        }
    }

    /// Number of classes.
    pub fn num_classes(&self) -> usize {
        self.class_values().map(|v| v.len()).unwrap_or(0)
    }

    /// Iterate over the non-class attributes with their positions.
    pub fn feature_attributes(&self) -> impl Iterator<Item = (usize, &Attribute)> {
        self.attributes
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != self.class_index)
    }

    /// The kinds of the non-class attributes, in order.
    pub fn feature_kinds(&self) -> Vec<&AttributeKind> {
        self.feature_attributes().map(|(_, a)| &a.kind).collect()
    }

    /// Check that an instance fits this schema.
    ///
    /// The class slot must be missing; every other value must match its
    /// attribute type. Nominal values must be one of the declared values.
    pub fn check_instance(&self, instance: &Instance) -> Result<()> {
        if instance.values.len() != self.attributes.len() {
            return Err(EsgdocError::schema(format!(
                "instance has {} values, schema '{}' has {} attributes",
                instance.values.len(),
                self.relation,
                self.attributes.len()
            )));
        }

        for (i, (attribute, value)) in self.attributes.iter().zip(&instance.values).enumerate() {
            if i == self.class_index {
                if *value != AttributeValue::Missing {
                    return Err(EsgdocError::schema("class value must be missing"));
                }
                continue;
            }
            let fits = match (&attribute.kind, value) {
                (_, AttributeValue::Missing) => true,
                (AttributeKind::String, AttributeValue::Text(_)) => true,
                (AttributeKind::Numeric, AttributeValue::Numeric(v)) => v.is_finite(),
                (AttributeKind::Nominal { values }, AttributeValue::Text(v)) => values.contains(v),
                _ => false,
            };
            if !fits {
                return Err(EsgdocError::schema(format!(
                    "value {value:?} does not fit attribute '{}'",
                    attribute.name
                )));
            }
        }

        Ok(())
    }

    /// Render the ARFF header for this schema.
    pub fn arff_header(&self) -> String {
        let mut header = format!("@relation {}\n\n", self.relation);
        for attribute in &self.attributes {
            header.push_str(&attribute.to_string());
            header.push('\n');
        }
        header.push_str("\n@data\n");
        header
    }
}
