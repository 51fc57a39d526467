//! Fuzzy sets and their algebra
//!
//! A [`FuzzySet`] couples a shared universe with a membership expression and
//! derives every fuzzy-set measure from them: support, alpha-cuts,
//! sigma-count, height, normality, convexity, and the Zadeh algebra
//! (complement, union, intersection).
//!
//! Derived sets (complements, unions, normalizations) are represented as a
//! closed expression tree rather than boxed closures, so membership
//! evaluation stays total and exhaustively matchable. All measures are lazy
//! views over `universe.samples()`; nothing is cached and nothing mutates,
//! because both the universe and the expression are immutable.

use std::sync::Arc;

use crate::error::{EngineError, Result};
use crate::fuzzy::membership::MembershipFunction;
use crate::fuzzy::universe::Universe;

/// Pointwise membership expression over a universe
#[derive(Debug, Clone, PartialEq)]
enum SetExpr {
    /// A base membership function shape
    Base(MembershipFunction),
    /// Pointwise `1 - mu(x)`
    Complement(Box<SetExpr>),
    /// Pointwise maximum (Zadeh t-conorm)
    Union(Box<SetExpr>, Box<SetExpr>),
    /// Pointwise minimum (Zadeh t-norm)
    Intersection(Box<SetExpr>, Box<SetExpr>),
    /// Memberships rescaled by a constant factor (normalization)
    Scaled { inner: Box<SetExpr>, factor: f64 },
}

impl SetExpr {
    fn eval(&self, x: f64) -> f64 {
        match self {
            SetExpr::Base(f) => f.eval(x),
            SetExpr::Complement(inner) => 1.0 - inner.eval(x),
            SetExpr::Union(a, b) => a.eval(x).max(b.eval(x)),
            SetExpr::Intersection(a, b) => a.eval(x).min(b.eval(x)),
            SetExpr::Scaled { inner, factor } => (inner.eval(x) * factor).min(1.0),
        }
    }
}

/// A fuzzy set: a universe of discourse plus a membership expression
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzySet {
    universe: Arc<Universe>,
    expr: SetExpr,
}

impl FuzzySet {
    /// Create a fuzzy set from a universe and a membership function
    pub fn new(universe: Arc<Universe>, function: MembershipFunction) -> Self {
        FuzzySet {
            universe,
            expr: SetExpr::Base(function),
        }
    }

    /// The universe this set is defined over
    pub fn universe(&self) -> &Arc<Universe> {
        &self.universe
    }

    /// Membership degree of `x`: the expression value inside the universe,
    /// 0 outside it
    pub fn membership(&self, x: f64) -> f64 {
        if self.universe.contains(x) {
            self.expr.eval(x)
        } else {
            0.0
        }
    }

    // ========================================================================
    // Measures
    // ========================================================================

    /// Samples with strictly positive membership
    pub fn support(&self) -> Vec<f64> {
        self.universe
            .samples()
            .into_iter()
            .filter(|&x| self.membership(x) > 0.0)
            .collect()
    }

    /// Samples with membership at least `alpha`
    ///
    /// Fails when `alpha` lies outside `[0, 1]`.
    pub fn alpha_cut(&self, alpha: f64) -> Result<Vec<f64>> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(EngineError::alpha_out_of_range(alpha));
        }
        Ok(self
            .universe
            .samples()
            .into_iter()
            .filter(|&x| self.membership(x) >= alpha)
            .collect())
    }

    /// Fuzzy cardinality: sum of memberships over all samples
    pub fn sigma_count(&self) -> f64 {
        self.universe
            .samples()
            .into_iter()
            .map(|x| self.membership(x))
            .sum()
    }

    /// Maximum membership over all samples, 0 for an empty universe
    pub fn height(&self) -> f64 {
        self.universe
            .samples()
            .into_iter()
            .map(|x| self.membership(x))
            .fold(0.0, f64::max)
    }

    /// Normalized cardinality: `sigma_count() / universe.length()`, 0 when
    /// the universe length is 0
    pub fn degree_of_fuzziness(&self) -> f64 {
        let length = self.universe.length();
        if length == 0.0 {
            return 0.0;
        }
        self.sigma_count() / length
    }

    /// Whether the set reaches full membership somewhere
    pub fn is_normal(&self) -> bool {
        self.height() == 1.0
    }

    /// Whether the membership profile is single-peaked
    ///
    /// Ordered by sample value, memberships must rise (non-strictly) to the
    /// first peak and never rise again after it. Plateaus pass; multi-modal
    /// profiles fail.
    pub fn is_convex(&self) -> bool {
        let mut samples = self.universe.samples();
        samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let degrees: Vec<f64> = samples.iter().map(|&x| self.membership(x)).collect();
        if degrees.len() < 3 {
            return true;
        }

        let max = degrees.iter().cloned().fold(0.0, f64::max);
        let peak = degrees.iter().position(|&d| d == max).unwrap_or(0);

        degrees[..=peak].windows(2).all(|w| w[0] <= w[1])
            && degrees[peak..].windows(2).all(|w| w[0] >= w[1])
    }

    /// First sample achieving `height()`, `None` on an empty universe
    pub fn argmax(&self) -> Option<f64> {
        let samples = self.universe.samples();
        if samples.is_empty() {
            return None;
        }
        let height = self.height();
        samples.into_iter().find(|&x| self.membership(x) == height)
    }

    // ========================================================================
    // Algebra
    // ========================================================================

    /// Pointwise complement `1 - mu(x)` over the same universe
    pub fn complement(&self) -> FuzzySet {
        FuzzySet {
            universe: Arc::clone(&self.universe),
            expr: SetExpr::Complement(Box::new(self.expr.clone())),
        }
    }

    /// Pointwise maximum of two sets over the same universe
    ///
    /// Fails with an incompatibility error unless both universes are
    /// structurally equal and of the same domain type.
    pub fn union(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.check_compatible(other)?;
        Ok(FuzzySet {
            universe: Arc::clone(&self.universe),
            expr: SetExpr::Union(Box::new(self.expr.clone()), Box::new(other.expr.clone())),
        })
    }

    /// Pointwise minimum of two sets over the same universe
    pub fn intersection(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.check_compatible(other)?;
        Ok(FuzzySet {
            universe: Arc::clone(&self.universe),
            expr: SetExpr::Intersection(Box::new(self.expr.clone()), Box::new(other.expr.clone())),
        })
    }

    /// Rescale memberships by `1 / height()` so the result is normal
    ///
    /// Fails when the set has height 0 (nothing to rescale).
    pub fn normalized(&self) -> Result<FuzzySet> {
        let height = self.height();
        if height == 0.0 {
            return Err(EngineError::zero_height());
        }
        if height == 1.0 {
            return Ok(self.clone());
        }
        Ok(FuzzySet {
            universe: Arc::clone(&self.universe),
            expr: SetExpr::Scaled {
                inner: Box::new(self.expr.clone()),
                factor: 1.0 / height,
            },
        })
    }

    fn check_compatible(&self, other: &FuzzySet) -> Result<()> {
        if self.universe.domain_type() != other.universe.domain_type() {
            return Err(EngineError::domain_type_mismatch());
        }
        if *self.universe != *other.universe {
            return Err(EngineError::universe_mismatch());
        }
        Ok(())
    }
}
