//! Netting an outcome-quantity vector into tradable spread legs.
//!
//! An outcome vector over `n` adjacent buckets is equivalent to a book of
//! vertical spreads across the `n − 1` bucket boundaries. [`decompose`]
//! nets each boundary down to a one-sided position, the minimal inventory
//! a market maker must actually hold, and [`recompose`] rebuilds the
//! canonical outcome vector from those legs via cumulative sums.

use serde::{Deserialize, Serialize};

use crate::pricing::cost::normalize;
use crate::prelude::{Error, Result};

/// A netted long/short pair held across one bucket boundary.
///
/// After [`decompose`], at most one side is nonzero: holding both legs of
/// the same boundary spread is offsetting inventory, not exposure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadPosition {
    /// Long quantity across this boundary.
    pub long: f64,
    /// Short quantity across this boundary.
    pub short: f64,
}

/// Splits an outcome vector into minimal long/short spread legs.
///
/// Boundary `i` pairs `long = q[i]` against `short = q[i + 1]`; the
/// overlapping amount `min(long, short)` is netted out of both, so every
/// returned position satisfies `min(long, short) == 0`.
///
/// # Errors
/// [`Error::ShapeMismatch`] if `q` has fewer than two entries (no boundary
/// to decompose across).
pub fn decompose(q: &[f64]) -> Result<Vec<SpreadPosition>> {
    if q.len() < 2 {
        return Err(Error::ShapeMismatch {
            expected: 2,
            actual: q.len(),
        });
    }

    Ok(q.windows(2)
        .map(|pair| {
            let netted = pair[0].min(pair[1]);
            SpreadPosition {
                long: pair[0] - netted,
                short: pair[1] - netted,
            }
        })
        .collect())
}

/// Rebuilds the canonical outcome vector from spread legs.
///
/// Shorts accumulate from the left, longs from the right:
/// `q[i] = Σ_{j<i} short[j] + Σ_{j≥i} long[j]`. Netting discarded the
/// vector's global level, so the raw sums recover the original only up to a
/// translation constant; the result is therefore normalized to the
/// min-zero representative, which makes `recompose(decompose(q))` exact
/// (values and cost alike) for every canonical `q`.
///
/// # Errors
/// [`Error::EmptyOutcomes`] if `positions` is empty.
pub fn recompose(positions: &[SpreadPosition]) -> Result<Vec<f64>> {
    if positions.is_empty() {
        return Err(Error::EmptyOutcomes);
    }

    let n = positions.len() + 1;
    let mut q = vec![0.0; n];

    let mut acc = 0.0;
    for (i, pos) in positions.iter().enumerate() {
        acc += pos.short;
        q[i + 1] = acc;
    }

    acc = 0.0;
    for (i, pos) in positions.iter().enumerate().rev() {
        acc += pos.long;
        q[i] += acc;
    }

    Ok(normalize(&q))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::cost::cost;

    fn assert_vec_close(got: &[f64], want: &[f64], tol: f64, label: &str) {
        assert_eq!(got.len(), want.len(), "{label}: length mismatch");
        for (i, (&g, &w)) in got.iter().zip(want.iter()).enumerate() {
            assert!(
                (g - w).abs() < tol,
                "{label}[{i}]: got {g}, want {w}"
            );
        }
    }

    #[test]
    fn test_decompose_nets_every_boundary() {
        let q = [3.0, 1.0, 2.0, 2.0];
        let positions = decompose(&q).unwrap();
        assert_eq!(positions.len(), q.len() - 1);

        for (i, pos) in positions.iter().enumerate() {
            assert!(
                pos.long.min(pos.short) == 0.0,
                "boundary {i} still holds offsetting inventory: {pos:?}"
            );
            assert!(pos.long >= 0.0 && pos.short >= 0.0);
        }

        assert_eq!(
            positions,
            vec![
                SpreadPosition { long: 2.0, short: 0.0 },
                SpreadPosition { long: 0.0, short: 1.0 },
                SpreadPosition { long: 0.0, short: 0.0 },
            ]
        );
    }

    #[test]
    fn test_monotone_vectors_are_one_sided() {
        // Decreasing quantities are pure longs, increasing are pure shorts
        let falling = decompose(&[5.0, 3.0, 0.0]).unwrap();
        assert!(falling.iter().all(|p| p.short == 0.0), "{falling:?}");

        let rising = decompose(&[0.0, 3.0, 5.0]).unwrap();
        assert!(rising.iter().all(|p| p.long == 0.0), "{rising:?}");
    }

    #[test]
    fn test_round_trip_recovers_canonical_vector() {
        // Canonical (min-zero) vectors survive the round trip exactly,
        // including non-monotone shapes where the raw cumulative sums come
        // back translated
        let cases: &[&[f64]] = &[
            &[2.0, 0.0, 1.0],
            &[0.0, 2.0, 5.0, 3.0],
            &[0.0, 5.0, 0.0, 5.0, 0.0],
            &[5.0, 3.0, 0.0],
            &[0.0, 0.0, 0.0],
        ];
        for &q in cases {
            let rebuilt = recompose(&decompose(q).unwrap()).unwrap();
            assert_vec_close(&rebuilt, q, 1e-12, "round trip");
        }
    }

    #[test]
    fn test_round_trip_preserves_cost() {
        let b = 4.0;
        let q = [0.0, 1.5, 4.0, 2.5, 0.5];
        let rebuilt = recompose(&decompose(&q).unwrap()).unwrap();
        let original = cost(&q, b).unwrap();
        let recovered = cost(&rebuilt, b).unwrap();
        assert!(
            (original - recovered).abs() < 1e-9,
            "cost drifted through the round trip: {original} vs {recovered}"
        );
    }

    #[test]
    fn test_shape_validation() {
        assert_eq!(
            decompose(&[1.0]),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            decompose(&[]),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 0
            })
        );
        assert_eq!(recompose(&[]), Err(Error::EmptyOutcomes));
    }
}
