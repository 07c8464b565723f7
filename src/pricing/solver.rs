//! Inverse pricing: recover outcome quantities from a target price vector.
//!
//! The forward map `q ↦ softmax(q/b)` has no closed-form inverse for more
//! than two outcomes, so the solve minimizes the squared residual
//! `Σ (softmax(q/b)_i − target_i)²` with damped Gauss–Newton steps on the
//! analytic Jacobian `J = (diag(p) − p·pᵀ)/b`, starting from the all-ones
//! vector.
//!
//! Softmax is invariant to adding a constant to every entry of `q`, which
//! makes `J` singular along the all-ones direction; the Levenberg–Marquardt
//! damping term keeps the normal equations solvable, and the converged
//! iterate (one representative of the translation equivalence class) is
//! normalized to the canonical min-zero form before being returned.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::consts::EPSILON;
use crate::pricing::cost;
use crate::prelude::{Error, Result};

/// Damping escalations attempted per iteration before declaring a stall.
const MAX_DAMPING_RETRIES: usize = 16;

/// Configuration for the Gauss–Newton inverse solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Convergence tolerance on the squared-residual objective.
    pub tolerance: f64,
    /// Iteration budget before the solve is reported as non-converged.
    pub max_iterations: usize,
    /// Initial Levenberg–Marquardt damping factor.
    pub initial_damping: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 200,
            initial_damping: 1e-3,
        }
    }
}

/// Outcome of an inverse solve.
///
/// Non-convergence is not an error: a degenerate target (an entry exactly 0
/// or 1 requires `q → ∓∞`) legitimately ends with a nonzero residual and a
/// large but finite `q`. Callers should treat large quantities as a
/// feasibility warning, not a failure.
#[derive(Debug, Clone, Serialize)]
pub struct QuantitySolution {
    /// Solved outcome quantities, normalized so the minimum entry is 0.
    pub quantities: Vec<f64>,
    /// Final squared-residual objective value.
    pub residual: f64,
    /// Gauss–Newton iterations performed.
    pub iterations: usize,
    /// Whether the residual reached the configured tolerance.
    pub converged: bool,
}

/// Solves for outcome quantities whose price gradient matches `target`,
/// using [`SolverConfig::default`].
///
/// # Errors
/// [`Error::InvalidLiquidity`] if `b` is not finite and positive,
/// [`Error::EmptyOutcomes`] if `target` is empty.
pub fn solve_quantities(target: &[f64], b: f64) -> Result<QuantitySolution> {
    solve_quantities_with(&SolverConfig::default(), target, b)
}

/// Solves for outcome quantities whose price gradient matches `target`.
///
/// The convergence contract only promises a near-zero residual for feasible
/// targets: entries summing to 1, all strictly inside (0, 1). Unnormalized
/// targets are accepted (partial replication is a legitimate use) but the
/// residual then reflects the distance to the closest reachable
/// distribution.
///
/// # Errors
/// Same preconditions as [`solve_quantities`].
pub fn solve_quantities_with(
    config: &SolverConfig,
    target: &[f64],
    b: f64,
) -> Result<QuantitySolution> {
    cost::validate_liquidity(b)?;
    if target.is_empty() {
        return Err(Error::EmptyOutcomes);
    }

    let n = target.len();
    let t = DVector::from_column_slice(target);

    let mut q = DVector::from_element(n, 1.0);
    let mut p = DVector::from_vec(cost::softmax(q.as_slice(), b));
    let mut residual = &p - &t;
    let mut objective = residual.norm_squared();

    let mut lambda = config.initial_damping;
    let mut iterations = 0;

    debug!(
        n,
        b,
        objective = %format!("{objective:.3e}"),
        "starting inverse solve"
    );

    while objective > config.tolerance && iterations < config.max_iterations {
        iterations += 1;

        // J is singular along the all-ones direction; the normal equations
        // are only solvable because of the damping term.
        let jac = (DMatrix::from_diagonal(&p) - &p * p.transpose()) / b;
        let jtj = jac.transpose() * &jac;
        let neg_grad = -(jac.transpose() * &residual);

        // Escalate damping until a step improves the objective
        let mut stepped = false;
        for _ in 0..MAX_DAMPING_RETRIES {
            let damped = &jtj + DMatrix::from_diagonal_element(n, n, lambda);
            let Some(chol) = damped.cholesky() else {
                lambda *= 10.0;
                continue;
            };
            let step = chol.solve(&neg_grad);

            let q_trial = &q + &step;
            let p_trial = DVector::from_vec(cost::softmax(q_trial.as_slice(), b));
            let r_trial = &p_trial - &t;
            let obj_trial = r_trial.norm_squared();

            if obj_trial < objective {
                q = q_trial;
                p = p_trial;
                residual = r_trial;
                objective = obj_trial;
                lambda = (lambda * 0.25).max(EPSILON);
                stepped = true;
                break;
            }
            lambda *= 10.0;
        }

        if !stepped {
            // Damping exhausted without improvement: no descent direction left
            break;
        }

        trace!(
            iterations,
            objective = %format!("{objective:.3e}"),
            lambda = %format!("{lambda:.1e}"),
            "accepted step"
        );
    }

    let converged = objective <= config.tolerance;
    if !converged {
        warn!(
            iterations,
            residual = %format!("{objective:.3e}"),
            "inverse solve stopped above tolerance; target may be infeasible"
        );
    }

    Ok(QuantitySolution {
        quantities: cost::normalize(q.as_slice()),
        residual: objective,
        iterations,
        converged,
    })
}

/// Builds a solver target from a ladder of cumulative digital prices.
///
/// Given non-decreasing cumulative prices `[p_0, …, p_k]` (the market's
/// implied probability of settling below each successive strike), the bucket
/// target is `[p_0, p_1 − p_0, …, 1 − p_k]`: one entry per bucket, summing
/// to 1.
///
/// # Errors
/// [`Error::EmptyOutcomes`] for an empty ladder,
/// [`Error::UnsortedPrices`] unless the ladder is sorted ascending within
/// [0, 1].
pub fn target_from_cumulative_prices(prices: &[f64]) -> Result<Vec<f64>> {
    if prices.is_empty() {
        return Err(Error::EmptyOutcomes);
    }

    let mut prev = 0.0;
    for &px in prices {
        if !px.is_finite() || px < prev || px > 1.0 {
            return Err(Error::UnsortedPrices);
        }
        prev = px;
    }

    let mut target = Vec::with_capacity(prices.len() + 1);
    target.push(prices[0]);
    for pair in prices.windows(2) {
        target.push(pair[1] - pair[0]);
    }
    target.push(1.0 - prices[prices.len() - 1]);
    Ok(target)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
