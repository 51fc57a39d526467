//! lingsum - Linguistic Summarization of Numeric Datasets
//!
//! A Rust implementation of fuzzy-set based linguistic summarization:
//! protoform sentences such as "most young houses are cheap" generated and
//! ranked over arbitrary numeric datasets.
//!
//! # Architecture
//!
//! The crate is organized around a small set of closed types:
//!
//! - [`fuzzy::Universe`] - Continuous or discrete domain of discourse
//! - [`fuzzy::MembershipFunction`] - Triangular, trapezoidal or Gaussian shape
//! - [`fuzzy::FuzzySet`] - Zadeh algebra, measures and derived sets
//! - [`summaries::SingleSubjectSummary`] - One-population sentences with the
//!   T1..T11 quality battery and the weighted optimum T*
//! - [`summaries::MultisubjectSummary`] - Four two-population comparison forms
//! - [`engine::SummaryEngine`] - Exhaustive, optionally parallel generation
//!
//! # Features
//!
//! - Fuzzy-set algebra (complement, union, intersection, normalization)
//! - Support, alpha-cuts, sigma-counts, height, convexity checks
//! - Absolute and relative linguistic quantifiers
//! - Eleven quality measures plus a configurable weighted optimum
//! - Soft missing-data policy: bad data ranks a sentence last, it never
//!   aborts a batch
//! - JSON term catalogues and TOML runtime configuration
//! - Deterministic multi-threaded batch generation
//!
//! # Example
//!
//! ```rust,ignore
//! use lingsum::dataset::AttributeTable;
//! use lingsum::engine::SummaryEngine;
//! use lingsum::catalog::{variables_from_json_str, quantifiers_from_json_str};
//!
//! let attributes = AttributeTable::new()
//!     .with("price", |h: &House| h.price)
//!     .with("yearBuilt", |h: &House| h.year_built);
//!
//! let mut engine = SummaryEngine::new(&houses, &attributes);
//! for variable in variables_from_json_str(&catalogue)? {
//!     engine.add_variable(variable)?;
//! }
//! for quantifier in quantifiers_from_json_str(&quantifiers)? {
//!     engine.add_quantifier(quantifier)?;
//! }
//!
//! let mut sentences = engine.single_summaries()?;
//! sentences.sort_by(|a, b| b.optimal_measure.total_cmp(&a.optimal_measure));
//! println!("{}", sentences[0].text);
//! ```

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod summaries;

// Re-export fuzzy core types
pub use fuzzy::{DomainType, FuzzySet, MembershipFunction, Universe};

// Re-export summary types
pub use summaries::{
    Label, LinguisticVariable, MultisubjectForm, MultisubjectSummary, Quantifier, QuantifierKind,
    SingleSubjectSummary, Subpopulation, DEFAULT_WEIGHTS, MEASURE_KEYS,
};

// Re-export dataset types
pub use dataset::{AttributeTable, Extractor, Partition};

// Re-export engine types
pub use engine::{MultisubjectSummaryOutput, SingleSummaryOutput, SummaryEngine};

// Re-export catalogue types
pub use catalog::{
    quantifiers_from_json_str, variables_from_json_str, QuantifierDef, TermDef,
};

// Re-export configuration types
pub use config::{
    ConfigError, GenerationConfig, LingsumConfig, ParallelConfig, WeightsConfig,
};

// Re-export error types
pub use error::{EngineError, ErrorCode, ErrorContext, Result};
