//! Membership function shapes
//!
//! Pure numeric functions mapping a domain value to a degree in [0, 1].
//! Shapes form a closed sum type so evaluation stays total and exhaustively
//! matchable:
//! - Triangular `(a <= b <= c)` - piecewise-linear ramp peaking at `b`
//! - Trapezoidal `(a <= b <= c <= d)` - ramp with a plateau on `[b, c]`
//! - Gaussian `(center, sigma > 0)` - `exp(-0.5*((x-center)/sigma)^2)`

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A membership function shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum MembershipFunction {
    /// Triangle with feet at `a` and `c`, peak at `b`
    Triangular { a: f64, b: f64, c: f64 },
    /// Trapezoid with feet at `a` and `d`, plateau on `[b, c]`
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    /// Bell curve centered at `center` with spread `sigma`
    Gaussian { center: f64, sigma: f64 },
}

impl MembershipFunction {
    /// Create a triangular function; control points must satisfy `a <= b <= c`
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        if !(a <= b && b <= c) {
            return Err(EngineError::invalid_shape(format!(
                "triangular parameters must satisfy a <= b <= c, got ({}, {}, {})",
                a, b, c
            )));
        }
        Ok(MembershipFunction::Triangular { a, b, c })
    }

    /// Create a trapezoidal function; control points must satisfy
    /// `a <= b <= c <= d`
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        if !(a <= b && b <= c && c <= d) {
            return Err(EngineError::invalid_shape(format!(
                "trapezoidal parameters must satisfy a <= b <= c <= d, got ({}, {}, {}, {})",
                a, b, c, d
            )));
        }
        Ok(MembershipFunction::Trapezoidal { a, b, c, d })
    }

    /// Create a gaussian function; `sigma` must be positive
    pub fn gaussian(center: f64, sigma: f64) -> Result<Self> {
        if sigma <= 0.0 {
            return Err(EngineError::invalid_shape(format!(
                "gaussian sigma must be positive, got {}",
                sigma
            )));
        }
        Ok(MembershipFunction::Gaussian { center, sigma })
    }

    /// Build a ramp shape from a flat parameter list, as catalogue term
    /// definitions supply them: 3 values select triangular, 4 trapezoidal.
    pub fn from_params(params: &[f64]) -> Result<Self> {
        match params {
            [a, b, c] => Self::triangular(*a, *b, *c),
            [a, b, c, d] => Self::trapezoidal(*a, *b, *c, *d),
            _ => Err(EngineError::wrong_parameter_count("3 or 4", params.len())),
        }
    }

    /// Evaluate the membership degree at `x`
    ///
    /// Ramps return exactly 0 outside their feet and exactly 1 on the peak or
    /// plateau. Degenerate shapes with coincident control points (`a = b` or
    /// `c = d`) jump to 1 at the coincident point instead of dividing by zero.
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if x < a || x > c {
                    0.0
                } else if x == b {
                    1.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x < b {
                    if a == b { 1.0 } else { (x - a) / (b - a) }
                } else if x <= c {
                    1.0
                } else if c == d {
                    1.0
                } else {
                    (d - x) / (d - c)
                }
            }
            MembershipFunction::Gaussian { center, sigma } => {
                let normalized = (x - center) / sigma;
                (-0.5 * normalized * normalized).exp()
            }
        }
    }
}
