//! Single-site operator builders.
//!
//! Each builder reads the local dimension of `site` from the Hilbert space
//! and wraps the corresponding matrix from [`crate::matrices`] into a
//! one-term [`LocalOperator`]. Whether the operator is physically meaningful
//! for that dimension is left to the caller.

use spinlat_hilbert::HilbertSpace;

use crate::error::{OperatorError, OperatorResult};
use crate::matrices::{self, Matrix};
use crate::operator::LocalOperator;

fn single_site<H>(
    hilbert: &H,
    site: usize,
    build: fn(usize) -> Matrix,
) -> OperatorResult<LocalOperator>
where
    H: HilbertSpace + ?Sized,
{
    let dim = hilbert
        .local_dim(site)
        .ok_or(OperatorError::SiteOutOfRange {
            site,
            n_sites: hilbert.n_sites(),
        })?;
    LocalOperator::new(hilbert.shape(), vec![site], build(dim))
}

/// σx on `site`.
pub fn sigma_x<H: HilbertSpace + ?Sized>(
    hilbert: &H,
    site: usize,
) -> OperatorResult<LocalOperator> {
    single_site(hilbert, site, matrices::sigma_x)
}

/// σy on `site`.
pub fn sigma_y<H: HilbertSpace + ?Sized>(
    hilbert: &H,
    site: usize,
) -> OperatorResult<LocalOperator> {
    single_site(hilbert, site, matrices::sigma_y)
}

/// σz on `site`.
pub fn sigma_z<H: HilbertSpace + ?Sized>(
    hilbert: &H,
    site: usize,
) -> OperatorResult<LocalOperator> {
    single_site(hilbert, site, matrices::sigma_z)
}

/// σ₋ (lowers `m`) on `site`.
pub fn sigma_minus<H: HilbertSpace + ?Sized>(
    hilbert: &H,
    site: usize,
) -> OperatorResult<LocalOperator> {
    single_site(hilbert, site, matrices::sigma_minus)
}

/// σ₊ (raises `m`) on `site`.
pub fn sigma_plus<H: HilbertSpace + ?Sized>(
    hilbert: &H,
    site: usize,
) -> OperatorResult<LocalOperator> {
    single_site(hilbert, site, matrices::sigma_plus)
}

/// Bosonic annihilation on `site`, truncated at `N - 1` quanta.
pub fn destroy<H: HilbertSpace + ?Sized>(
    hilbert: &H,
    site: usize,
) -> OperatorResult<LocalOperator> {
    single_site(hilbert, site, matrices::destroy)
}

/// Bosonic creation on `site`, truncated at `N - 1` quanta.
pub fn create<H: HilbertSpace + ?Sized>(
    hilbert: &H,
    site: usize,
) -> OperatorResult<LocalOperator> {
    single_site(hilbert, site, matrices::create)
}

/// Occupation number on `site`.
pub fn number<H: HilbertSpace + ?Sized>(
    hilbert: &H,
    site: usize,
) -> OperatorResult<LocalOperator> {
    single_site(hilbert, site, matrices::number)
}

/// Identity on `site`.
pub fn identity<H: HilbertSpace + ?Sized>(
    hilbert: &H,
    site: usize,
) -> OperatorResult<LocalOperator> {
    single_site(hilbert, site, matrices::identity)
}
