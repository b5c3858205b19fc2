//! Error types for the operator crate.

use spinlat_hilbert::HilbertError;
use thiserror::Error;

/// Errors produced by operator construction, lattices and model loading.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OperatorError {
    /// An operator was requested on a site the Hilbert space does not have.
    #[error("site {site} out of range for a Hilbert space of {n_sites} sites")]
    SiteOutOfRange {
        /// The offending site.
        site: usize,
        /// Number of sites in the Hilbert space.
        n_sites: usize,
    },

    /// Term sites must be strictly ascending.
    #[error("operator term sites {0:?} are not strictly ascending")]
    UnsortedSites(Vec<usize>),

    /// Term matrix does not match the local dimensions of its sites.
    #[error("operator term on sites {sites:?} needs a {expected}x{expected} matrix, got {rows}x{cols}")]
    MatrixShape {
        /// Sites of the term.
        sites: Vec<usize>,
        /// Product of the local dimensions of `sites`.
        expected: usize,
        /// Rows of the supplied matrix.
        rows: usize,
        /// Columns of the supplied matrix.
        cols: usize,
    },

    /// Dense dimension of an operator overflows `usize`.
    #[error("operator dimension over {n_sites} sites overflows usize")]
    DimensionOverflow {
        /// Number of sites spanned.
        n_sites: usize,
    },

    /// A lattice average needs at least one vertex.
    #[error("lattice has no vertices")]
    EmptyLattice,

    /// An edge references a missing vertex or loops back onto itself.
    #[error("edge ({src}, {dst}) is invalid for a lattice of {n_vertices} vertices")]
    InvalidEdge {
        /// Source vertex.
        src: usize,
        /// Destination vertex.
        dst: usize,
        /// Number of vertices in the lattice.
        n_vertices: usize,
    },

    /// Lattice geometry parameters are unusable.
    #[error("invalid lattice geometry: {0}")]
    InvalidLattice(String),

    /// Hilbert-space construction failed.
    #[error("Hilbert space error: {0}")]
    Hilbert(#[from] HilbertError),

    /// Model configuration could not be parsed or written.
    #[error("model configuration error: {0}")]
    Config(#[from] serde_yaml_ng::Error),

    /// Model configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for operator operations.
pub type OperatorResult<T> = Result<T, OperatorError>;
