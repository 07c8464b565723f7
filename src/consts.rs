//! Numeric constants shared across the pricing core.

/// Guard threshold for degenerate floating-point comparisons.
pub const EPSILON: f64 = 1e-12;

/// Forward-difference step for the cost sensitivity to the liquidity parameter.
pub(crate) const B_SENSITIVITY_STEP: f64 = 1e-9;

/// Finite stand-in for the zero lower bound of the first put bucket.
pub(crate) const PUT_LOWER_BOUND: f64 = 1e-9;

/// Finite stand-in for the infinite upper bound of the last put bucket.
pub(crate) const PUT_UPPER_BOUND: f64 = 1e9;
