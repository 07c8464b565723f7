//! LMSR pricing core for strike-bucket outcome ladders.
//!
//! Provides the full pricing pipeline:
//! - **cost**: LMSR cost function, implied-price gradient, liquidity sensitivity
//! - **payoff**: strike ladders and normalized call/put bucket payoffs
//! - **solver**: inverse recovery of outcome quantities from a target price vector
//! - **inventory**: netting a quantity vector into tradable spread legs
//! - **valuation**: liquidity-provider cost of replicating a payoff curve
//!
//! Data flows one way: strike ladder + underlying → payoff target → solved
//! quantities → spread inventory, with the cost/gradient pair underneath
//! every stage.

mod cost;
mod inventory;
mod payoff;
mod solver;
mod valuation;

#[cfg(test)]
mod tests;

pub use cost::{cost, cost_sensitivity_to_b, max_subsidy, normalize, price_gradient};
pub use inventory::{decompose, recompose, SpreadPosition};
pub use payoff::StrikeLadder;
pub use solver::{
    solve_quantities, solve_quantities_with, target_from_cumulative_prices, QuantitySolution,
    SolverConfig,
};
pub use valuation::{lp_payoff_cost, LpValuation, PayoffKind};
