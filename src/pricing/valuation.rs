//! Liquidity-provider cost of replicating a payoff curve.
//!
//! At settlement an efficient market prices each bucket at its payoff, so
//! the inventory that replicates a payoff curve is the inverse solve of that
//! payoff. The LP's expected cost for guaranteeing the curve is the LMSR
//! cost of holding that inventory minus its linear payout,
//! `C(q) − ⟨payoff, q⟩`. For an exactly-replicated target this equals
//! `b · H(payoff)`, the liquidity parameter times the payoff entropy.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pricing::cost::cost;
use crate::pricing::payoff::StrikeLadder;
use crate::pricing::solver::{solve_quantities, QuantitySolution};
use crate::prelude::Result;

/// Which side of the strike ladder a payoff replicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoffKind {
    /// Vertical call spreads: value accrues above each strike.
    Call,
    /// Vertical put spreads: value accrues below each strike.
    Put,
}

/// Result of valuing an LP's replicating position.
#[derive(Debug, Clone, Serialize)]
pub struct LpValuation {
    /// LMSR cost of the replicating inventory minus its linear payout.
    pub cost: f64,
    /// The inverse solve that produced the replicating inventory.
    pub solution: QuantitySolution,
}

/// Expected LP cost of guaranteeing the call or put payoff curve.
///
/// Builds the normalized bucket payoff for `kind`, solves for the
/// replicating quantities, and returns `cost(q, b) − ⟨payoff, q⟩` together
/// with the solve report. Call/put payoffs routinely contain exact-zero
/// buckets (settlement outside a bucket's range), so the embedded solve may
/// report a nonzero residual; the valuation is still well defined.
///
/// # Errors
/// [`crate::Error::InvalidUnderlying`] or [`crate::Error::InvalidLiquidity`]
/// on invalid inputs.
pub fn lp_payoff_cost(
    underlying: f64,
    strikes: &StrikeLadder,
    b: f64,
    kind: PayoffKind,
) -> Result<LpValuation> {
    let payoff = match kind {
        PayoffKind::Call => strikes.call_payoffs(underlying)?,
        PayoffKind::Put => strikes.put_payoffs(underlying)?,
    };

    let solution = solve_quantities(&payoff, b)?;
    let inventory_cost = cost(&solution.quantities, b)?;
    let payout: f64 = payoff
        .iter()
        .zip(solution.quantities.iter())
        .map(|(&w, &qi)| w * qi)
        .sum();

    debug!(
        ?kind,
        underlying,
        b,
        lp_cost = %format!("{:.6}", inventory_cost - payout),
        residual = %format!("{:.3e}", solution.residual),
        "valued replicating position"
    );

    Ok(LpValuation {
        cost: inventory_cost - payout,
        solution,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
