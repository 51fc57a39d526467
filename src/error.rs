//! Structured Error Handling for lingsum
//!
//! Provides a unified error type hierarchy with:
//! - Error codes for programmatic handling
//! - Structured error payloads (JSON-friendly)
//! - Context preservation through error chains
//!
//! # Error Categories
//!
//! - `ConfigurationError` - Invalid universes, shape parameters, alpha levels,
//!   summarizer lists or weight vectors
//! - `IncompatibilityError` - Set algebra across mismatched universes
//! - `CatalogError` - Malformed term/quantifier definitions
//! - `ConfigError` - Configuration file issues
//!
//! Data-quality problems (missing attribute values, empty populations, zero
//! denominators) are deliberately *not* errors: they degrade to a zero or
//! neutral measure so a batch of many summaries never aborts on one bad
//! combination.
//!
//! # Example
//!
//! ```rust,ignore
//! use lingsum::error::{EngineError, ErrorCode};
//!
//! fn check_alpha(alpha: f64) -> Result<(), EngineError> {
//!     if !(0.0..=1.0).contains(&alpha) {
//!         return Err(EngineError::alpha_out_of_range(alpha)
//!             .with_hint("alpha-cut levels must lie in [0, 1]"));
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, EngineError>;

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Configuration errors (1xxx)
    /// Generic configuration error
    ConfigurationError = 1000,
    /// Universe step is zero or negative
    NonPositiveStep = 1001,
    /// Universe start lies after its end
    InvertedBounds = 1002,
    /// Membership function control points out of order
    InvalidShape = 1003,
    /// Wrong number of shape parameters
    WrongParameterCount = 1004,
    /// Alpha level outside [0, 1]
    AlphaOutOfRange = 1005,
    /// Summary constructed with no summarizers
    EmptySummarizers = 1006,
    /// Custom weight vector is not exactly 11 values
    WeightCountMismatch = 1007,
    /// Normalization requested on a set of height zero
    ZeroHeight = 1008,
    /// Quantifier universe violates its kind's constraints
    InvalidQuantifierUniverse = 1009,

    // Incompatibility errors (2xxx)
    /// Generic incompatibility error
    IncompatibilityError = 2000,
    /// Operand universes are not structurally equal
    UniverseMismatch = 2001,
    /// Operand universes differ in domain type
    DomainTypeMismatch = 2002,

    // Catalogue errors (3xxx)
    /// Generic catalogue error
    CatalogError = 3000,
    /// Quantifier kind is neither "absolute" nor "relative"
    UnknownQuantifierKind = 3001,
    /// Term definition is malformed
    InvalidTermDefinition = 3002,
    /// Attribute named by a definition has no extractor
    UnknownAttribute = 3003,

    // Config errors (4xxx)
    /// Generic config error
    ConfigError = 4000,
    /// Config file not found
    ConfigNotFound = 4001,
    /// Invalid config syntax
    InvalidConfigSyntax = 4002,
    /// Invalid config value
    InvalidConfigValue = 4003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::ConfigurationError => "Configuration error",
            ErrorCode::NonPositiveStep => "Universe step must be positive",
            ErrorCode::InvertedBounds => "Universe start must not exceed end",
            ErrorCode::InvalidShape => "Membership function parameters out of order",
            ErrorCode::WrongParameterCount => "Wrong number of shape parameters",
            ErrorCode::AlphaOutOfRange => "Alpha level outside [0, 1]",
            ErrorCode::EmptySummarizers => "Summary requires at least one summarizer",
            ErrorCode::WeightCountMismatch => "Weight vector must hold exactly 11 values",
            ErrorCode::ZeroHeight => "Cannot normalize a fuzzy set of height zero",
            ErrorCode::InvalidQuantifierUniverse => "Invalid quantifier universe",

            ErrorCode::IncompatibilityError => "Incompatible fuzzy sets",
            ErrorCode::UniverseMismatch => "Fuzzy sets must share the same universe",
            ErrorCode::DomainTypeMismatch => "Fuzzy sets must share the same domain type",

            ErrorCode::CatalogError => "Catalogue error",
            ErrorCode::UnknownQuantifierKind => "Unknown quantifier kind",
            ErrorCode::InvalidTermDefinition => "Invalid term definition",
            ErrorCode::UnknownAttribute => "No extractor for attribute",

            ErrorCode::ConfigError => "Configuration file error",
            ErrorCode::ConfigNotFound => "Configuration file not found",
            ErrorCode::InvalidConfigSyntax => "Invalid configuration syntax",
            ErrorCode::InvalidConfigValue => "Invalid configuration value",
        }
    }

    /// Whether the code belongs to the construction-time configuration family
    pub fn is_configuration(&self) -> bool {
        (1000..2000).contains(&self.code())
    }

    /// Whether the code belongs to the set-algebra incompatibility family
    pub fn is_incompatibility(&self) -> bool {
        (2000..3000).contains(&self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Error Context
// ============================================================================

/// Additional context information for an error
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Key-value pairs of context information
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, String>,
    /// Stack of error causes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl ErrorContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to the context
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a cause to the error chain
    pub fn cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for lingsum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    /// Hint for resolving the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl EngineError {
    /// Create a new error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            hint: None,
        }
    }

    // ========================================================================
    // Factory methods for common error types
    // ========================================================================

    /// Create a generic configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigurationError, message)
    }

    /// Create a non-positive step error
    pub fn non_positive_step(step: f64) -> Self {
        Self::new(
            ErrorCode::NonPositiveStep,
            format!("universe step must be positive, got {}", step),
        )
    }

    /// Create an inverted bounds error
    pub fn inverted_bounds(start: f64, end: f64) -> Self {
        Self::new(
            ErrorCode::InvertedBounds,
            format!("universe start {} exceeds end {}", start, end),
        )
    }

    /// Create an invalid shape error
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidShape, message)
    }

    /// Create a wrong parameter count error
    pub fn wrong_parameter_count(expected: &str, got: usize) -> Self {
        Self::new(
            ErrorCode::WrongParameterCount,
            format!("expected {} shape parameters, got {}", expected, got),
        )
    }

    /// Create an alpha-out-of-range error
    pub fn alpha_out_of_range(alpha: f64) -> Self {
        Self::new(
            ErrorCode::AlphaOutOfRange,
            format!("alpha must be in [0, 1], got {}", alpha),
        )
    }

    /// Create an empty summarizers error
    pub fn empty_summarizers() -> Self {
        Self::new(
            ErrorCode::EmptySummarizers,
            "summary requires at least one summarizer",
        )
    }

    /// Create a weight count mismatch error
    pub fn weight_count(got: usize) -> Self {
        Self::new(
            ErrorCode::WeightCountMismatch,
            format!("expected exactly 11 weights (T1..T11), got {}", got),
        )
    }

    /// Create a zero-height normalization error
    pub fn zero_height() -> Self {
        Self::new(
            ErrorCode::ZeroHeight,
            "fuzzy set has height 0, normalization undefined",
        )
    }

    /// Create a universe mismatch error
    pub fn universe_mismatch() -> Self {
        Self::new(
            ErrorCode::UniverseMismatch,
            "fuzzy sets must share the same universe",
        )
    }

    /// Create a domain type mismatch error
    pub fn domain_type_mismatch() -> Self {
        Self::new(
            ErrorCode::DomainTypeMismatch,
            "fuzzy sets must share the same domain type",
        )
    }

    /// Create a catalogue error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CatalogError, message)
    }

    /// Create an invalid quantifier universe error
    pub fn invalid_quantifier_universe(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidQuantifierUniverse, message)
    }

    /// Create an unknown quantifier kind error
    pub fn unknown_quantifier_kind(name: &str, kind: &str) -> Self {
        Self::new(
            ErrorCode::UnknownQuantifierKind,
            format!("quantifier '{}' has unknown kind '{}'", name, kind),
        )
    }

    /// Create an invalid term definition error
    pub fn invalid_term_definition(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidTermDefinition, message)
    }

    /// Create an unknown attribute error
    pub fn unknown_attribute(attribute: &str) -> Self {
        Self::new(
            ErrorCode::UnknownAttribute,
            format!("no extractor registered for attribute '{}'", attribute),
        )
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Attach a context field
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.field(key, value));
        self
    }

    /// Attach a resolution hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Attach a cause to the error chain
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.cause(cause));
        self
    }

    /// Serialize the error as a JSON value for structured reporting
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({
                "code": self.code.code(),
                "message": self.message,
            })
        })
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for EngineError {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_families() {
        assert!(ErrorCode::AlphaOutOfRange.is_configuration());
        assert!(ErrorCode::EmptySummarizers.is_configuration());
        assert!(ErrorCode::UniverseMismatch.is_incompatibility());
        assert!(!ErrorCode::UniverseMismatch.is_configuration());
        assert!(!ErrorCode::CatalogError.is_incompatibility());
    }

    #[test]
    fn test_display_with_hint() {
        let err = EngineError::alpha_out_of_range(1.5).with_hint("clamp the level");
        let text = err.to_string();
        assert!(text.contains("1005"));
        assert!(text.contains("clamp the level"));
    }

    #[test]
    fn test_context_builders() {
        let err = EngineError::configuration("bad universe")
            .with_context("start", "5")
            .with_context("end", "1")
            .with_cause("catalogue entry rejected");
        let context = err.context.as_ref().unwrap();
        assert_eq!(context.fields.len(), 2);
        assert_eq!(context.causes.len(), 1);
    }

    #[test]
    fn test_json_round_trip() {
        let err = EngineError::weight_count(9);
        let value = err.to_json();
        assert_eq!(value["code"], "WEIGHT_COUNT_MISMATCH");
        let back: EngineError = serde_json::from_value(value).unwrap();
        assert_eq!(back.code, ErrorCode::WeightCountMismatch);
    }
}
