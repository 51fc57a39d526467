//! Universes of discourse
//!
//! A universe describes the domain a fuzzy set is evaluated over. Two kinds
//! exist: continuous intervals materialized by stepping from start to end, and
//! discrete universes wrapping an explicit ordered sample vector.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Kind of domain a universe describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainType {
    Continuous,
    Discrete,
}

/// A universe of discourse over `f64` values
///
/// Universes are immutable once constructed and shared read-only (via `Arc`)
/// across every fuzzy set built on them. Structural equality (`PartialEq`) is
/// the compatibility notion used by the set algebra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Universe {
    /// Continuous interval `[start, end]` sampled at `step`
    Continuous { start: f64, end: f64, step: f64 },
    /// Explicit ordered sample vector
    Discrete { values: Vec<f64> },
}

impl Universe {
    /// Create a continuous universe `[start, end]` sampled at `step`
    ///
    /// Fails when `step <= 0` or `start > end`.
    pub fn continuous(start: f64, end: f64, step: f64) -> Result<Self> {
        if step <= 0.0 {
            return Err(EngineError::non_positive_step(step));
        }
        if start > end {
            return Err(EngineError::inverted_bounds(start, end));
        }
        Ok(Universe::Continuous { start, end, step })
    }

    /// Create a discrete universe from an ordered sample vector
    pub fn discrete(values: Vec<f64>) -> Self {
        Universe::Discrete { values }
    }

    /// The kind of domain this universe describes
    pub fn domain_type(&self) -> DomainType {
        match self {
            Universe::Continuous { .. } => DomainType::Continuous,
            Universe::Discrete { .. } => DomainType::Discrete,
        }
    }

    /// Whether `x` belongs to the domain
    pub fn contains(&self, x: f64) -> bool {
        match self {
            Universe::Continuous { start, end, .. } => x >= *start && x <= *end,
            Universe::Discrete { values } => values.contains(&x),
        }
    }

    /// Materialize the ordered, finite sample sequence
    ///
    /// Continuous universes step ascending from `start` to `end` inclusive;
    /// discrete universes return their values in insertion order.
    pub fn samples(&self) -> Vec<f64> {
        match self {
            Universe::Continuous { start, end, step } => {
                let count = ((end - start) / step).ceil() as usize + 1;
                (0..count)
                    .map(|i| start + i as f64 * step)
                    .filter(|v| v <= end)
                    .collect()
            }
            Universe::Discrete { values } => values.clone(),
        }
    }

    /// Number of samples
    pub fn sample_count(&self) -> usize {
        match self {
            Universe::Continuous { .. } => self.samples().len(),
            Universe::Discrete { values } => values.len(),
        }
    }

    /// Length of the universe: `end - start` for continuous, element count
    /// for discrete
    pub fn length(&self) -> f64 {
        match self {
            Universe::Continuous { start, end, .. } => end - start,
            Universe::Discrete { values } => values.len() as f64,
        }
    }

    /// First sample, if any
    pub fn first(&self) -> Option<f64> {
        match self {
            Universe::Continuous { start, .. } => Some(*start),
            Universe::Discrete { values } => values.first().copied(),
        }
    }

    /// Last sample, if any
    pub fn last(&self) -> Option<f64> {
        match self {
            Universe::Continuous { .. } => self.samples().last().copied(),
            Universe::Discrete { values } => values.last().copied(),
        }
    }

    /// Whether the universe has no samples at all
    pub fn is_empty(&self) -> bool {
        match self {
            Universe::Continuous { .. } => false,
            Universe::Discrete { values } => values.is_empty(),
        }
    }
}
