//! `spinlat-operator` — spin and bosonic operators on lattices.
//!
//! Builds the matrix descriptions of standard single-site operators and
//! composes them over a lattice:
//!
//! - [`matrices`]: dense `N×N` σx, σy, σz, σ±, creation, annihilation and
//!   number matrices for any local dimension `N`
//! - [`builders`]: the same operators placed on one site of a Hilbert space
//! - [`LocalOperator`]: sums and products of few-site terms
//! - [`Lattice`] / [`LatticeGraph`]: vertices and edges to sum over
//! - [`models`]: the transverse-field Ising Hamiltonian and lattice averages
//! - [`config`]: YAML model files
//!
//! # Quick start
//!
//! ```rust
//! use spinlat_hilbert::HomogeneousSpin;
//! use spinlat_operator::builders::sigma_z;
//! use spinlat_operator::models::{IsingParams, lattice_average_operator, quantum_ising_hamiltonian};
//! use spinlat_operator::{Lattice, LatticeGraph};
//!
//! let lattice = LatticeGraph::chain(4, true).unwrap();
//! let hilbert = HomogeneousSpin::new(2, lattice.n_vertices()).unwrap();
//!
//! let h = quantum_ising_hamiltonian(&lattice, &hilbert, IsingParams { g: 1.0, v: -1.0 }).unwrap();
//! assert!(h.is_hermitian(1e-12));
//!
//! let mz = lattice_average_operator(&lattice, &hilbert, sigma_z).unwrap();
//! assert_eq!(mz.n_terms(), 4);
//! ```

pub mod builders;
pub mod config;
pub mod error;
pub mod lattice;
pub mod matrices;
pub mod models;
pub mod operator;

pub use config::{LatticeSpec, ModelConfig};
pub use error::{OperatorError, OperatorResult};
pub use lattice::{Edge, Lattice, LatticeGraph};
pub use matrices::Matrix;
pub use models::{IsingParams, lattice_average_operator, quantum_ising_hamiltonian};
pub use operator::LocalOperator;
