//! Linguistic labels and variables
//!
//! A [`Label`] is a named fuzzy set bound to a dataset attribute ("young"
//! over `yearBuilt`). A [`LinguisticVariable`] groups the labels partitioning
//! one attribute's domain into named fuzzy regions.

use std::fmt;

use crate::fuzzy::FuzzySet;

/// A named fuzzy set bound to a source attribute
#[derive(Debug, Clone)]
pub struct Label {
    name: String,
    fuzzy_set: FuzzySet,
    attribute: String,
}

impl Label {
    /// Create a label over an attribute
    pub fn new(name: impl Into<String>, fuzzy_set: FuzzySet, attribute: impl Into<String>) -> Self {
        Label {
            name: name.into(),
            fuzzy_set,
            attribute: attribute.into(),
        }
    }

    /// The label text used in sentences
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying fuzzy set
    pub fn fuzzy_set(&self) -> &FuzzySet {
        &self.fuzzy_set
    }

    /// The dataset attribute this label evaluates
    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered group of labels sharing one attribute
#[derive(Debug, Clone)]
pub struct LinguisticVariable {
    name: String,
    labels: Vec<Label>,
}

impl LinguisticVariable {
    /// Create a variable from its labels
    pub fn new(name: impl Into<String>, labels: Vec<Label>) -> Self {
        LinguisticVariable {
            name: name.into(),
            labels,
        }
    }

    /// The attribute name the variable describes
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The labels in catalogue order
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Look up a label by name
    pub fn label(&self, name: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.name == name)
    }
}
