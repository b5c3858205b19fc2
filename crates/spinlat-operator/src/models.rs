//! Lattice Hamiltonians and lattice-averaged observables.
//!
//! Both functions walk a [`Lattice`] and sum operators built per vertex or
//! per edge; vertex identifiers are taken as Hilbert-space sites.

use serde::{Deserialize, Serialize};
use spinlat_hilbert::HilbertSpace;
use tracing::debug;

use crate::builders::{sigma_x, sigma_z};
use crate::error::{OperatorError, OperatorResult};
use crate::lattice::Lattice;
use crate::operator::LocalOperator;

/// Couplings of the transverse-field Ising model.
///
///   H = g/2 · Σ_i σx_i  +  V/4 · Σ_⟨ij⟩ σz_i σz_j
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsingParams {
    /// Transverse field strength.
    pub g: f64,
    /// Nearest-neighbour coupling.
    pub v: f64,
}

impl Default for IsingParams {
    fn default() -> Self {
        Self { g: 1.0, v: 1.0 }
    }
}

/// Transverse-field Ising Hamiltonian on `lattice`.
///
/// Adds `g/2 · σx` on every vertex and `V/4 · σz σz` on every edge. A
/// coupling that is exactly zero contributes no terms.
pub fn quantum_ising_hamiltonian<L, H>(
    lattice: &L,
    hilbert: &H,
    params: IsingParams,
) -> OperatorResult<LocalOperator>
where
    L: Lattice + ?Sized,
    H: HilbertSpace + ?Sized,
{
    let mut hamiltonian = LocalOperator::zero(hilbert.shape());

    // Operators are built even for zero couplings so every site is checked.
    for site in lattice.vertices() {
        let field = sigma_x(hilbert, site)?;
        if params.g != 0.0 {
            hamiltonian += field * (params.g / 2.0);
        }
    }

    let mut n_edges = 0usize;
    for edge in lattice.edges() {
        let (zi, zj) = (sigma_z(hilbert, edge.src)?, sigma_z(hilbert, edge.dst)?);
        if params.v != 0.0 {
            hamiltonian += zi * zj * (params.v / 4.0);
        }
        n_edges += 1;
    }

    debug!(
        n_vertices = lattice.n_vertices(),
        n_edges,
        g = params.g,
        v = params.v,
        n_terms = hamiltonian.n_terms(),
        "built quantum Ising Hamiltonian"
    );
    Ok(hamiltonian)
}

/// `1/N_v · Σ_i op(hilbert, i)` over the vertices of `lattice`.
///
/// Typically called with one of the builders, e.g.
/// `lattice_average_operator(&lattice, &hilbert, sigma_z)` for the
/// magnetization density.
#[allow(clippy::cast_precision_loss)]
pub fn lattice_average_operator<L, H, F>(
    lattice: &L,
    hilbert: &H,
    op: F,
) -> OperatorResult<LocalOperator>
where
    L: Lattice + ?Sized,
    H: HilbertSpace + ?Sized,
    F: Fn(&H, usize) -> OperatorResult<LocalOperator>,
{
    let n_vertices = lattice.n_vertices();
    if n_vertices == 0 {
        return Err(OperatorError::EmptyLattice);
    }

    let mut total = LocalOperator::zero(hilbert.shape());
    for site in lattice.vertices() {
        total += op(hilbert, site)?;
    }

    debug!(n_vertices, n_terms = total.n_terms(), "built lattice average");
    Ok(total / n_vertices as f64)
}
