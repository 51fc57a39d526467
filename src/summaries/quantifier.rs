//! Linguistic quantifiers
//!
//! A quantifier ("most", "few", "about 100") is a named fuzzy set over a
//! ratio or count universe. Relative quantifiers evaluate proportions in
//! [0, 1]; absolute quantifiers evaluate raw sigma-counts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fuzzy::FuzzySet;

/// Whether a quantifier ranges over proportions or raw counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantifierKind {
    Absolute,
    Relative,
}

impl QuantifierKind {
    /// Parse a catalogue kind tag
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "absolute" => Some(QuantifierKind::Absolute),
            "relative" => Some(QuantifierKind::Relative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuantifierKind::Absolute => "absolute",
            QuantifierKind::Relative => "relative",
        }
    }
}

/// A named fuzzy quantifier
#[derive(Debug, Clone)]
pub struct Quantifier {
    name: String,
    kind: QuantifierKind,
    fuzzy_set: FuzzySet,
}

impl Quantifier {
    /// Create a quantifier
    pub fn new(name: impl Into<String>, kind: QuantifierKind, fuzzy_set: FuzzySet) -> Self {
        Quantifier {
            name: name.into(),
            kind,
            fuzzy_set,
        }
    }

    /// The quantifier text used in sentences
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute or relative
    pub fn kind(&self) -> QuantifierKind {
        self.kind
    }

    /// The fuzzy set over the ratio/count universe
    pub fn fuzzy_set(&self) -> &FuzzySet {
        &self.fuzzy_set
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
