//! Strike ladders and normalized bucket payoffs.
//!
//! A ladder of `n` strikes splits the settlement axis into `n + 1` buckets
//! once boundary sentinels are added. Each bucket is one market outcome; the
//! payoff vectors built here are the per-bucket payout fractions of a
//! vertical call or put spread at settlement, and serve as the target price
//! distribution for the inverse solver.

use serde::{Deserialize, Serialize};

use crate::consts::{PUT_LOWER_BOUND, PUT_UPPER_BOUND};
use crate::prelude::{Error, Result};

/// Strictly increasing ladder of strike prices.
///
/// `n` strikes bound `n + 1` settlement buckets. Adjacency is semantically
/// meaningful: bucket `i` is the interval between strike `i − 1` and strike
/// `i` (with 0/∞ sentinels at the ends), and spread positions are held
/// across adjacent bucket boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct StrikeLadder(Vec<f64>);

impl StrikeLadder {
    /// Validates and wraps a ladder of strike prices.
    ///
    /// # Errors
    /// [`Error::EmptyOutcomes`] for an empty ladder,
    /// [`Error::UnsortedStrikes`] unless every strike is finite, positive,
    /// and strictly greater than its predecessor.
    pub fn new(strikes: Vec<f64>) -> Result<Self> {
        if strikes.is_empty() {
            return Err(Error::EmptyOutcomes);
        }
        let mut prev = 0.0;
        for &k in &strikes {
            if !k.is_finite() || k <= prev {
                return Err(Error::UnsortedStrikes);
            }
            prev = k;
        }
        Ok(Self(strikes))
    }

    /// The strike prices, in ascending order.
    pub fn strikes(&self) -> &[f64] {
        &self.0
    }

    /// Number of settlement buckets the ladder defines.
    pub fn num_buckets(&self) -> usize {
        self.0.len() + 1
    }

    /// Normalized call-spread payoff per bucket at the given settlement price.
    ///
    /// Buckets are bounded by `[0, strikes…, +∞)`; each bucket `[lo, hi)`
    /// pays `max(0, min(hi, underlying) − lo) / underlying`, the payout
    /// fraction of a vertical call spread across that bucket. Entries lie in
    /// [0, 1] and sum to 1.
    ///
    /// # Errors
    /// [`Error::InvalidUnderlying`] unless `underlying` is finite and > 0.
    pub fn call_payoffs(&self, underlying: f64) -> Result<Vec<f64>> {
        validate_underlying(underlying)?;

        let mut lo = 0.0;
        let mut payoffs = Vec::with_capacity(self.num_buckets());
        for &hi in self.0.iter().chain(std::iter::once(&f64::INFINITY)) {
            payoffs.push((hi.min(underlying) - lo).max(0.0) / underlying);
            lo = hi;
        }
        Ok(payoffs)
    }

    /// Normalized put-spread payoff per bucket at the given settlement price.
    ///
    /// Boundaries are `[ε, strikes…, 1/ε]` with ε = 1e-9 standing in for the
    /// true 0/∞ bounds; each boundary pair `(lo, hi)` contributes
    /// `max(0, hi − U)/hi − max(0, lo − U)/lo`. The sentinel behavior is an
    /// ε-approximation of the ideal payoff curve, not a tight contract.
    ///
    /// # Errors
    /// [`Error::InvalidUnderlying`] unless `underlying` is finite and > 0.
    pub fn put_payoffs(&self, underlying: f64) -> Result<Vec<f64>> {
        validate_underlying(underlying)?;

        let mut lo = PUT_LOWER_BOUND;
        let mut payoffs = Vec::with_capacity(self.num_buckets());
        for &hi in self.0.iter().chain(std::iter::once(&PUT_UPPER_BOUND)) {
            let a = (lo - underlying).max(0.0) / lo;
            let b = (hi - underlying).max(0.0) / hi;
            payoffs.push(b - a);
            lo = hi;
        }
        Ok(payoffs)
    }
}

impl TryFrom<Vec<f64>> for StrikeLadder {
    type Error = Error;

    fn try_from(strikes: Vec<f64>) -> Result<Self> {
        Self::new(strikes)
    }
}

impl From<StrikeLadder> for Vec<f64> {
    fn from(ladder: StrikeLadder) -> Self {
        ladder.0
    }
}

fn validate_underlying(price: f64) -> Result<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(Error::InvalidUnderlying { price });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_strike_at_the_money() {
        // Settlement exactly at the strike: below-strike bucket pays nothing,
        // the unbounded bucket is fully capped by the underlying
        let ladder = StrikeLadder::new(vec![100.0]).unwrap();
        let payoffs = ladder.call_payoffs(100.0).unwrap();
        assert_eq!(payoffs, vec![0.0, 1.0]);
    }

    #[test]
    fn test_call_payoffs_three_strikes() {
        // Boundaries [0, 10, 20, 30, ∞] at U = 25
        let ladder = StrikeLadder::new(vec![10.0, 20.0, 30.0]).unwrap();
        let payoffs = ladder.call_payoffs(25.0).unwrap();

        let expected = [0.4, 0.4, 0.2, 0.0];
        assert_eq!(payoffs.len(), ladder.num_buckets());
        for (i, (&got, &want)) in payoffs.iter().zip(expected.iter()).enumerate() {
            assert!(
                (got - want).abs() < 1e-12,
                "bucket {i}: got {got}, want {want}"
            );
        }
    }

    #[test]
    fn test_call_payoffs_sum_to_one() {
        let ladder = StrikeLadder::new(vec![50.0, 75.0, 110.0, 200.0]).unwrap();
        for underlying in [10.0, 60.0, 110.0, 500.0] {
            let payoffs = ladder.call_payoffs(underlying).unwrap();
            let total: f64 = payoffs.iter().sum();
            // Telescoping: the capped bucket widths always add up to U
            assert!(
                (total - 1.0).abs() < 1e-12,
                "payoffs sum to {total} at U = {underlying}"
            );
            assert!(payoffs.iter().all(|&x| (0.0..=1.0).contains(&x)));
        }
    }

    #[test]
    fn test_put_payoffs_three_strikes() {
        // Boundaries [ε, 10, 20, 30, 1/ε] at U = 25: only the buckets above
        // the underlying carry put value
        let ladder = StrikeLadder::new(vec![10.0, 20.0, 30.0]).unwrap();
        let payoffs = ladder.put_payoffs(25.0).unwrap();

        assert_eq!(payoffs.len(), 4);
        assert!(payoffs[0].abs() < 1e-12, "deep ITM-call bucket: {}", payoffs[0]);
        assert!(payoffs[1].abs() < 1e-12, "bucket below U: {}", payoffs[1]);
        assert!(
            (payoffs[2] - 5.0 / 30.0).abs() < 1e-12,
            "bucket [20,30): {}",
            payoffs[2]
        );
        let last = (PUT_UPPER_BOUND - 25.0) / PUT_UPPER_BOUND - 5.0 / 30.0;
        assert!(
            (payoffs[3] - last).abs() < 1e-12,
            "sentinel bucket: {} vs {last}",
            payoffs[3]
        );
    }

    #[test]
    fn test_put_payoffs_sum_telescopes() {
        let ladder = StrikeLadder::new(vec![10.0, 20.0, 30.0]).unwrap();
        for underlying in [5.0, 15.0, 25.0, 100.0] {
            let payoffs = ladder.put_payoffs(underlying).unwrap();
            let total: f64 = payoffs.iter().sum();
            // Adjacent boundary terms cancel; the sum collapses to the two
            // sentinel terms, ≈ 1 − U/(1/ε) for U above ε
            let expected = (PUT_UPPER_BOUND - underlying).max(0.0) / PUT_UPPER_BOUND
                - (PUT_LOWER_BOUND - underlying).max(0.0) / PUT_LOWER_BOUND;
            assert!(
                (total - expected).abs() < 1e-9,
                "put payoffs sum {total} vs telescoped {expected} at U = {underlying}"
            );
        }
    }

    #[test]
    fn test_ladder_validation() {
        assert_eq!(StrikeLadder::new(vec![]), Err(Error::EmptyOutcomes));
        assert_eq!(
            StrikeLadder::new(vec![10.0, 10.0]),
            Err(Error::UnsortedStrikes)
        );
        assert_eq!(
            StrikeLadder::new(vec![20.0, 10.0]),
            Err(Error::UnsortedStrikes)
        );
        assert_eq!(
            StrikeLadder::new(vec![-5.0, 10.0]),
            Err(Error::UnsortedStrikes)
        );
        assert_eq!(
            StrikeLadder::new(vec![10.0, f64::NAN]),
            Err(Error::UnsortedStrikes)
        );
        assert!(StrikeLadder::new(vec![10.0, 20.0, 30.0]).is_ok());
    }

    #[test]
    fn test_invalid_underlying_rejected() {
        let ladder = StrikeLadder::new(vec![10.0]).unwrap();
        for price in [0.0, -25.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    ladder.call_payoffs(price),
                    Err(Error::InvalidUnderlying { .. })
                ),
                "call_payoffs accepted U = {price}"
            );
            assert!(
                matches!(
                    ladder.put_payoffs(price),
                    Err(Error::InvalidUnderlying { .. })
                ),
                "put_payoffs accepted U = {price}"
            );
        }
    }

    #[test]
    fn test_ladder_serde_rejects_unsorted() {
        let ok: StrikeLadder = serde_json::from_str("[10.0, 20.0]").unwrap();
        assert_eq!(ok.strikes(), &[10.0, 20.0]);

        let bad: std::result::Result<StrikeLadder, _> = serde_json::from_str("[20.0, 10.0]");
        assert!(bad.is_err(), "deserialization must enforce ladder ordering");
    }
}
