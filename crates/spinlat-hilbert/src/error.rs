//! Error types for the hilbert crate.

use thiserror::Error;

/// Errors produced by Hilbert-space construction and state encoding.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum HilbertError {
    /// A site must carry at least two levels, and `2N` must fit in `i64`.
    #[error("local dimension must be at least 2 and below 2^62, got {0}")]
    InvalidLocalDim(usize),

    /// Spin quantum number is not a positive half-integer.
    #[error("spin quantum number must be a positive half-integer, got {0}")]
    InvalidSpin(f64),

    /// Hilbert space without sites.
    #[error("Hilbert space needs at least one site")]
    NoSites,

    /// `local_dim^n_sites` does not fit in `usize`.
    #[error("Hilbert space dimension {local_dim}^{n_sites} overflows usize")]
    DimensionOverflow {
        /// Levels per site.
        local_dim: usize,
        /// Number of encoded sites.
        n_sites: usize,
    },

    /// Site index beyond the last site.
    #[error("site {site} out of range for a Hilbert space of {n_sites} sites")]
    SiteOutOfRange {
        /// The offending site.
        site: usize,
        /// Number of sites in the Hilbert space.
        n_sites: usize,
    },

    /// Configuration slice length differs from the number of sites.
    #[error("configuration has {got} sites, expected {expected}")]
    ConfigLength {
        /// Number of sites in the Hilbert space.
        expected: usize,
        /// Length of the supplied configuration.
        got: usize,
    },

    /// Global basis index outside `1..=n_states`.
    #[error("basis index {index} outside 1..={n_states}")]
    IndexOutOfRange {
        /// The requested (possibly shifted) index.
        index: i128,
        /// Number of basis states.
        n_states: usize,
    },

    /// A site holds a value that is not one of the allowed levels.
    #[error("site {site} holds {value}, which is not a level of a {local_dim}-level site")]
    InvalidValue {
        /// The offending site.
        site: usize,
        /// The value found there.
        value: f64,
        /// Levels per site.
        local_dim: usize,
    },

    /// The configuration element type cannot hold the extreme levels.
    #[error("site value {0} is not representable in the configuration element type")]
    Unrepresentable(i64),
}

/// Result type for Hilbert-space operations.
pub type HilbertResult<T> = Result<T, HilbertError>;
