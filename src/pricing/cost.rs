//! LMSR cost function and implied-price gradient.
//!
//! The market maker's cost of holding outcome inventory `q` at liquidity `b`
//! is `C(q) = b·ln(Σ exp(q_i/b))`; implied prices are its gradient,
//! `p = softmax(q/b)`, a probability distribution over outcomes.
//!
//! Both are evaluated with a max-shift: `exp(q_i/b)` overflows once an
//! outcome vector spans roughly `700·b`, which realistic strike ladders do,
//! so the shift is a correctness requirement rather than precision tuning.
//!
//! `C` is translation semi-invariant (`C(q + c) = C(q) + c` with the
//! gradient unchanged), so an outcome vector is only meaningful up to a
//! global constant. [`normalize`] picks the canonical representative with
//! minimum entry zero.

use crate::consts::B_SENSITIVITY_STEP;
use crate::prelude::{Error, Result};

/// Validates the liquidity parameter: finite and strictly positive.
pub(crate) fn validate_liquidity(b: f64) -> Result<()> {
    if !b.is_finite() || b <= 0.0 {
        return Err(Error::InvalidLiquidity { b });
    }
    Ok(())
}

/// `softmax(q/b)` with max-shift. Callers have already validated inputs.
pub(crate) fn softmax(q: &[f64], b: f64) -> Vec<f64> {
    let mx = q.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = q.iter().map(|&qi| ((qi - mx) / b).exp()).collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// LMSR cost of holding outcome inventory `q` at liquidity `b`.
///
/// `C(q) = b·ln(Σ exp((q_i − max q)/b)) + max q`
///
/// # Errors
/// [`Error::InvalidLiquidity`] if `b` is not finite and positive,
/// [`Error::EmptyOutcomes`] if `q` is empty.
pub fn cost(q: &[f64], b: f64) -> Result<f64> {
    validate_liquidity(b)?;
    if q.is_empty() {
        return Err(Error::EmptyOutcomes);
    }

    let mx = q.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let sum: f64 = q.iter().map(|&qi| ((qi - mx) / b).exp()).sum();
    Ok(mx + b * sum.ln())
}

/// Implied outcome prices: the gradient of [`cost`] with respect to `q`.
///
/// Returns `softmax(q/b)`. Entries are strictly in (0, 1) for finite `q`
/// and sum to 1 within floating-point tolerance.
///
/// # Errors
/// Same preconditions as [`cost`].
pub fn price_gradient(q: &[f64], b: f64) -> Result<Vec<f64>> {
    validate_liquidity(b)?;
    if q.is_empty() {
        return Err(Error::EmptyOutcomes);
    }
    Ok(softmax(q, b))
}

/// Forward-difference estimate of `∂C/∂b`.
///
/// `(C(q, b+ε) − C(q, b)) / ε` with ε = 1e-9. Diagnostic only: callers must
/// tolerate the O(ε) truncation error, and this is never on a hot path.
///
/// # Errors
/// Same preconditions as [`cost`].
pub fn cost_sensitivity_to_b(q: &[f64], b: f64) -> Result<f64> {
    let bumped = cost(q, b + B_SENSITIVITY_STEP)?;
    let base = cost(q, b)?;
    Ok((bumped - base) / B_SENSITIVITY_STEP)
}

/// Worst-case loss bound for a market over `num_outcomes` outcomes.
///
/// The LMSR subsidy is bounded by `b·ln(n)`: the cost of the flat inventory
/// equals it, and settlement can never extract more. Operators size `b`
/// against this bound.
///
/// # Errors
/// [`Error::InvalidLiquidity`] if `b` is not finite and positive,
/// [`Error::EmptyOutcomes`] if `num_outcomes` is zero.
pub fn max_subsidy(num_outcomes: usize, b: f64) -> Result<f64> {
    validate_liquidity(b)?;
    if num_outcomes == 0 {
        return Err(Error::EmptyOutcomes);
    }
    Ok(b * (num_outcomes as f64).ln())
}

/// Canonical representative of `q`'s translation equivalence class.
///
/// Subtracts the minimum entry, so the result is non-negative with minimum
/// exactly 0. Idempotent; an empty slice maps to an empty vector.
pub fn normalize(q: &[f64]) -> Vec<f64> {
    if q.is_empty() {
        return Vec::new();
    }
    let mn = q.iter().cloned().fold(f64::INFINITY, f64::min);
    q.iter().map(|&qi| qi - mn).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
