//! Term catalogue
//!
//! Serde-facing definitions for linguistic variables and quantifiers, plus
//! the builders that turn them into runtime [`LinguisticVariable`] and
//! [`Quantifier`] values:
//! - [`TermDef`] - one attribute's universe and its named label shapes
//! - [`QuantifierDef`] - a named quantifier over a continuous ratio or
//!   count universe
//!
//! Label shapes are given as parameter lists: three numbers build a
//! triangular function, four build a trapezoidal one. Variables use a
//! discrete universe listing the attribute's observed values; quantifiers
//! use a sampled continuous universe.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::fuzzy::{FuzzySet, MembershipFunction, Universe};
use crate::summaries::{Label, LinguisticVariable, Quantifier, QuantifierKind};

// ============================================================================
// Definitions
// ============================================================================

/// One linguistic variable as stored in the catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermDef {
    /// Attribute name the variable describes
    pub name: String,
    /// Universe of discourse: the attribute's admissible values
    pub uod: Vec<f64>,
    /// Label name to membership parameters (3 = triangular, 4 = trapezoidal)
    pub ranges: IndexMap<String, Vec<f64>>,
}

/// One quantifier as stored in the catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantifierDef {
    /// Quantifier text used in sentences
    pub name: String,
    /// "relative" or "absolute"
    pub kind: String,
    /// Continuous universe as [start, end, step]
    pub uod: [f64; 3],
    /// Membership parameters (3 = triangular, 4 = trapezoidal)
    pub params: Vec<f64>,
}

// ============================================================================
// Builders
// ============================================================================

impl TermDef {
    /// Parse a definition from a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| EngineError::catalog(format!("invalid term definition: {}", e)))
    }

    /// Build the runtime linguistic variable
    ///
    /// All labels share one discrete universe over `uod` and are bound to
    /// the attribute named by `name`.
    pub fn build(&self) -> Result<LinguisticVariable> {
        if self.uod.is_empty() {
            return Err(EngineError::invalid_term_definition(format!(
                "term '{}' has an empty universe",
                self.name
            )));
        }
        if self.ranges.is_empty() {
            return Err(EngineError::invalid_term_definition(format!(
                "term '{}' defines no labels",
                self.name
            )));
        }

        let universe = Arc::new(Universe::discrete(self.uod.clone()));
        let mut labels = Vec::with_capacity(self.ranges.len());
        for (label_name, params) in &self.ranges {
            let shape = MembershipFunction::from_params(params)?;
            labels.push(Label::new(
                label_name.clone(),
                FuzzySet::new(Arc::clone(&universe), shape),
                self.name.clone(),
            ));
        }
        Ok(LinguisticVariable::new(self.name.clone(), labels))
    }
}

impl QuantifierDef {
    /// Parse a definition from a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| EngineError::catalog(format!("invalid quantifier definition: {}", e)))
    }

    /// Build the runtime quantifier
    pub fn build(&self) -> Result<Quantifier> {
        let kind = QuantifierKind::from_str(&self.kind)
            .ok_or_else(|| EngineError::unknown_quantifier_kind(&self.name, &self.kind))?;
        let [start, end, step] = self.uod;
        let universe = Arc::new(Universe::continuous(start, end, step)?);
        let shape = MembershipFunction::from_params(&self.params)?;
        Ok(Quantifier::new(
            self.name.clone(),
            kind,
            FuzzySet::new(universe, shape),
        ))
    }
}

/// Parse and build a whole catalogue of variables from a JSON array
pub fn variables_from_json_str(content: &str) -> Result<Vec<LinguisticVariable>> {
    let defs: Vec<TermDef> = serde_json::from_str(content)
        .map_err(|e| EngineError::catalog(format!("invalid term catalogue: {}", e)))?;
    defs.iter().map(TermDef::build).collect()
}

/// Parse and build a whole catalogue of quantifiers from a JSON array
pub fn quantifiers_from_json_str(content: &str) -> Result<Vec<Quantifier>> {
    let defs: Vec<QuantifierDef> = serde_json::from_str(content)
        .map_err(|e| EngineError::catalog(format!("invalid quantifier catalogue: {}", e)))?;
    defs.iter().map(QuantifierDef::build).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn year_term() -> TermDef {
        TermDef::from_json_str(
            r#"{
                "name": "yearBuilt",
                "uod": [1950, 1975, 2000, 2020],
                "ranges": {
                    "old": [1950, 1950, 1975, 2000],
                    "young": [1975, 2000, 2020]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_term_build() {
        let variable = year_term().build().unwrap();
        assert_eq!(variable.name(), "yearBuilt");
        assert_eq!(variable.labels().len(), 2);

        let old = variable.label("old").unwrap();
        assert_eq!(old.attribute(), "yearBuilt");
        // trapezoid from four parameters
        assert_eq!(old.fuzzy_set().membership(1960.0), 1.0);
        assert_eq!(old.fuzzy_set().membership(2000.0), 0.0);

        // triangle from three parameters
        let young = variable.label("young").unwrap();
        assert_eq!(young.fuzzy_set().membership(2000.0), 1.0);
    }

    #[test]
    fn test_term_rejects_bad_parameter_count() {
        let def = TermDef::from_json_str(
            r#"{"name": "x", "uod": [0, 1], "ranges": {"bad": [1, 2]}}"#,
        )
        .unwrap();
        let err = def.build().unwrap_err();
        assert_eq!(err.code, ErrorCode::WrongParameterCount);
    }

    #[test]
    fn test_term_rejects_empty_universe() {
        let def =
            TermDef::from_json_str(r#"{"name": "x", "uod": [], "ranges": {"a": [0, 1, 2]}}"#)
                .unwrap();
        let err = def.build().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTermDefinition);
    }

    #[test]
    fn test_quantifier_build() {
        let def = QuantifierDef::from_json_str(
            r#"{
                "name": "most",
                "kind": "relative",
                "uod": [0.0, 1.0, 0.01],
                "params": [0.5, 0.8, 1.0, 1.0]
            }"#,
        )
        .unwrap();
        let most = def.build().unwrap();
        assert_eq!(most.name(), "most");
        assert_eq!(most.kind(), QuantifierKind::Relative);
        assert_eq!(most.fuzzy_set().membership(0.9), 1.0);
    }

    #[test]
    fn test_quantifier_rejects_unknown_kind() {
        let def = QuantifierDef {
            name: "most".to_string(),
            kind: "proportional".to_string(),
            uod: [0.0, 1.0, 0.01],
            params: vec![0.5, 0.8, 1.0, 1.0],
        };
        let err = def.build().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownQuantifierKind);
    }

    #[test]
    fn test_quantifier_rejects_bad_universe() {
        let def = QuantifierDef {
            name: "most".to_string(),
            kind: "relative".to_string(),
            uod: [0.0, 1.0, 0.0],
            params: vec![0.5, 0.8, 1.0, 1.0],
        };
        let err = def.build().unwrap_err();
        assert!(err.code.is_configuration());
    }

    #[test]
    fn test_catalogue_arrays() {
        let variables = variables_from_json_str(
            r#"[{"name": "x", "uod": [0, 1, 2], "ranges": {"low": [0, 0, 1]}}]"#,
        )
        .unwrap();
        assert_eq!(variables.len(), 1);

        let quantifiers = quantifiers_from_json_str(
            r#"[{"name": "few", "kind": "relative", "uod": [0.0, 1.0, 0.01], "params": [0.0, 0.1, 0.3]}]"#,
        )
        .unwrap();
        assert_eq!(quantifiers.len(), 1);

        assert!(variables_from_json_str("not json").is_err());
    }
}
