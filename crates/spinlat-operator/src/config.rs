//! YAML model configuration.
//!
//! A model file names the lattice geometry, the local dimension shared by
//! every site and the Ising couplings:
//!
//! ```yaml
//! local_dim: 2
//! lattice:
//!   kind: chain
//!   length: 4
//!   periodic: true
//! ising:
//!   g: 1.0
//!   v: 1.0
//! ```
//!
//! `local_dim` defaults to 2, `periodic` to false, and missing `ising`
//! fields to [`IsingParams::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use spinlat_hilbert::HomogeneousSpin;
use tracing::debug;

use crate::error::OperatorResult;
use crate::lattice::{Lattice, LatticeGraph};
use crate::models::{IsingParams, quantum_ising_hamiltonian};
use crate::operator::LocalOperator;

/// Lattice geometry as written in a model file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LatticeSpec {
    /// One-dimensional chain.
    Chain {
        /// Number of sites.
        length: usize,
        /// Close the chain into a ring.
        #[serde(default)]
        periodic: bool,
    },
    /// `length^ndim` hypercubic lattice.
    Hypercube {
        /// Sites per dimension.
        length: usize,
        /// Number of dimensions.
        ndim: usize,
        /// Wrap every dimension around.
        #[serde(default)]
        periodic: bool,
    },
    /// Explicit edge list.
    Edges {
        /// Number of vertices.
        n_vertices: usize,
        /// Bonds as `[src, dst]` pairs.
        edges: Vec<(usize, usize)>,
    },
}

impl LatticeSpec {
    /// Build the described lattice.
    pub fn build(&self) -> OperatorResult<LatticeGraph> {
        match self {
            Self::Chain { length, periodic } => LatticeGraph::chain(*length, *periodic),
            Self::Hypercube {
                length,
                ndim,
                periodic,
            } => LatticeGraph::hypercube(*length, *ndim, *periodic),
            Self::Edges { n_vertices, edges } => {
                LatticeGraph::from_edges(*n_vertices, edges.iter().copied())
            }
        }
    }
}

fn default_local_dim() -> usize {
    2
}

/// A complete Ising model description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Levels per site.
    #[serde(default = "default_local_dim")]
    pub local_dim: usize,

    /// Lattice geometry.
    pub lattice: LatticeSpec,

    /// Ising couplings.
    #[serde(default)]
    pub ising: IsingParams,
}

impl ModelConfig {
    /// Parse a model from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> OperatorResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read and parse a model file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> OperatorResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading model configuration");
        Self::from_yaml_str(&text)
    }

    /// Serialize back to YAML.
    pub fn to_yaml_string(&self) -> OperatorResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// The lattice described by this model.
    pub fn build_lattice(&self) -> OperatorResult<LatticeGraph> {
        self.lattice.build()
    }

    /// A homogeneous Hilbert space with one site per lattice vertex.
    pub fn build_hilbert(&self) -> OperatorResult<HomogeneousSpin> {
        let lattice = self.build_lattice()?;
        Ok(HomogeneousSpin::new(self.local_dim, lattice.n_vertices())?)
    }

    /// The Ising Hamiltonian of this model.
    pub fn build_ising(&self) -> OperatorResult<LocalOperator> {
        let lattice = self.build_lattice()?;
        let hilbert = HomogeneousSpin::new(self.local_dim, lattice.n_vertices())?;
        quantum_ising_hamiltonian(&lattice, &hilbert, self.ising)
    }
}
