use thiserror::Error;

/// Errors surfaced by the pricing core.
///
/// Solver non-convergence is deliberately not an error: it is reported
/// through [`crate::QuantitySolution::converged`] so callers can decide
/// whether approximate quantities are acceptable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Liquidity parameter must be finite and strictly positive.
    #[error("invalid liquidity parameter b = {b}: must be finite and > 0")]
    InvalidLiquidity {
        /// The rejected value.
        b: f64,
    },

    /// Underlying price must be finite and strictly positive.
    #[error("invalid underlying price {price}: must be finite and > 0")]
    InvalidUnderlying {
        /// The rejected value.
        price: f64,
    },

    /// Outcome or target vectors must be non-empty.
    #[error("empty outcome vector")]
    EmptyOutcomes,

    /// Vector is too short for the requested operation.
    #[error("shape mismatch: need at least {expected} entries, got {actual}")]
    ShapeMismatch {
        /// Minimum number of entries required.
        expected: usize,
        /// Number of entries received.
        actual: usize,
    },

    /// Strike ladders must be finite, positive, and strictly increasing.
    #[error("strike ladder is not finite, positive, and strictly increasing")]
    UnsortedStrikes,

    /// Cumulative price ladders must be sorted ascending within [0, 1].
    #[error("cumulative price ladder is not sorted ascending within [0, 1]")]
    UnsortedPrices,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
