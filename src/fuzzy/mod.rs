//! Fuzzy-set foundations
//!
//! This module defines the numeric core the summarizers are built on:
//! - [`Universe`] - continuous or discrete domains of discourse
//! - [`MembershipFunction`] - triangular, trapezoidal and gaussian shapes
//! - [`FuzzySet`] - a universe plus a membership expression, with the full
//!   measure battery and the Zadeh set algebra

mod membership;
mod set;
mod universe;

pub use membership::MembershipFunction;
pub use set::FuzzySet;
pub use universe::{DomainType, Universe};
