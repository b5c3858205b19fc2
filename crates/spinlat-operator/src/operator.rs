//! Local operators: sums of dense matrices acting on a few sites each.
//!
//! A [`LocalOperator`] stores one dense matrix per distinct site tuple,
//! merging terms that act on the same sites:
//!
//!   O = Σ_k  M_k ⊗ I_rest(k)
//!
//! Inside a term the site tuple is strictly ascending and the matrix basis is
//! mixed radix with the first site as the least significant digit, the same
//! convention the global basis index uses.
//!
//! # Example
//!
//! ```rust
//! use spinlat_hilbert::HomogeneousSpin;
//! use spinlat_operator::builders::{sigma_x, sigma_z};
//!
//! let hilbert = HomogeneousSpin::new(2, 2).unwrap();
//! let h = sigma_x(&hilbert, 0).unwrap() * 0.5 + &sigma_z(&hilbert, 0).unwrap() * &sigma_z(&hilbert, 1).unwrap();
//! assert_eq!(h.n_terms(), 2);
//! assert!(h.is_hermitian(1e-12));
//! ```

use std::collections::BTreeMap;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use num_complex::Complex64;

use crate::error::{OperatorError, OperatorResult};
use crate::matrices::Matrix;

/// A sum of dense few-site terms on a fixed Hilbert shape.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalOperator {
    /// Local dimension of every site of the Hilbert space.
    shape: Vec<usize>,
    /// Term matrices keyed by strictly ascending site tuples.
    terms: BTreeMap<Vec<usize>, Matrix>,
}

impl LocalOperator {
    /// The zero operator on a Hilbert space of the given shape.
    pub fn zero(shape: Vec<usize>) -> Self {
        Self {
            shape,
            terms: BTreeMap::new(),
        }
    }

    /// A single term `matrix` acting on `sites`.
    ///
    /// `sites` must be strictly ascending and inside the shape; the matrix
    /// must be square with side the product of the sites' local dimensions.
    /// An empty site tuple with a 1×1 matrix is a multiple of the identity.
    pub fn new(shape: Vec<usize>, sites: Vec<usize>, matrix: Matrix) -> OperatorResult<Self> {
        if sites.windows(2).any(|w| w[0] >= w[1]) {
            return Err(OperatorError::UnsortedSites(sites));
        }
        if let Some(&site) = sites.iter().find(|&&s| s >= shape.len()) {
            return Err(OperatorError::SiteOutOfRange {
                site,
                n_sites: shape.len(),
            });
        }
        let expected = subspace_dim(&shape, &sites)?;
        let (rows, cols) = matrix.dim();
        if rows != expected || cols != expected {
            return Err(OperatorError::MatrixShape {
                sites,
                expected,
                rows,
                cols,
            });
        }

        let mut terms = BTreeMap::new();
        terms.insert(sites, matrix);
        Ok(Self { shape, terms })
    }

    /// Local dimension of every site.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of distinct site tuples carrying a term.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True if no term is stored.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over `(sites, matrix)` in ascending site-tuple order.
    pub fn terms(&self) -> impl Iterator<Item = (&[usize], &Matrix)> {
        self.terms.iter().map(|(s, m)| (s.as_slice(), m))
    }

    /// The matrix acting on exactly `sites`, if any.
    pub fn term(&self, sites: &[usize]) -> Option<&Matrix> {
        self.terms.get(sites)
    }

    /// Multiply every term by a complex scalar.
    #[must_use]
    pub fn scale(&self, factor: Complex64) -> Self {
        Self {
            shape: self.shape.clone(),
            terms: self
                .terms
                .iter()
                .map(|(s, m)| (s.clone(), m.mapv(|x| x * factor)))
                .collect(),
        }
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn adjoint(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            terms: self
                .terms
                .iter()
                .map(|(s, m)| (s.clone(), m.t().mapv(|x| x.conj())))
                .collect(),
        }
    }

    /// Operator product `self · other`.
    ///
    /// Each pair of terms is embedded into the union of their sites and
    /// multiplied there.
    ///
    /// # Panics
    ///
    /// Panics if the operators live on different Hilbert shapes.
    #[must_use]
    pub fn product(&self, other: &Self) -> Self {
        self.assert_same_shape(other);
        let mut out = Self::zero(self.shape.clone());
        for (sa, ma) in &self.terms {
            for (sb, mb) in &other.terms {
                let union = union_sites(sa, sb);
                let ea = embed(ma, sa, &union, &self.shape);
                let eb = embed(mb, sb, &union, &self.shape);
                out.add_term(union, ea.dot(&eb));
            }
        }
        out
    }

    /// The full `n_states × n_states` matrix.
    ///
    /// The global basis is mixed radix with site 0 least significant; every
    /// site keeps the basis order of its term matrices.
    pub fn to_dense(&self) -> OperatorResult<Matrix> {
        let all: Vec<usize> = (0..self.shape.len()).collect();
        let dim = subspace_dim(&self.shape, &all)?;
        let mut dense = Matrix::zeros((dim, dim));
        for (sites, m) in &self.terms {
            dense += &embed(m, sites, &all, &self.shape);
        }
        Ok(dense)
    }

    /// Compare as operators within `tol`.
    ///
    /// The difference is split into its unique components acting
    /// non-trivially on each site tuple (traceless on every site of the
    /// tuple), so operators compare equal however their terms are grouped.
    /// `tol` bounds every entry of every component.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        if self.shape != other.shape {
            return false;
        }
        let diff = self - other;
        let mut canonical = Self::zero(self.shape.clone());
        for (sites, m) in &diff.terms {
            for (part_sites, part) in decompose(m, sites, &self.shape) {
                canonical.add_term(part_sites, part);
            }
        }
        canonical
            .terms
            .values()
            .all(|m| m.iter().all(|x| x.norm() <= tol))
    }

    /// True if the operator equals its adjoint within `tol`.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.approx_eq(&self.adjoint(), tol)
    }

    fn add_term(&mut self, sites: Vec<usize>, matrix: Matrix) {
        match self.terms.get_mut(&sites) {
            Some(existing) => *existing += &matrix,
            None => {
                self.terms.insert(sites, matrix);
            }
        }
    }

    fn assert_same_shape(&self, other: &Self) {
        assert_eq!(
            self.shape, other.shape,
            "operators act on different Hilbert shapes"
        );
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn subspace_dim(shape: &[usize], sites: &[usize]) -> OperatorResult<usize> {
    sites
        .iter()
        .try_fold(1usize, |acc, &s| acc.checked_mul(shape[s]))
        .ok_or(OperatorError::DimensionOverflow {
            n_sites: sites.len(),
        })
}

/// Sorted union of two strictly ascending site tuples.
fn union_sites(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out: Vec<usize> = a.iter().chain(b).copied().collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Split `index` into mixed-radix digits, least significant first.
fn digits(mut index: usize, radices: &[usize]) -> Vec<usize> {
    radices
        .iter()
        .map(|&r| {
            let d = index % r;
            index /= r;
            d
        })
        .collect()
}

/// Digit bookkeeping for a sub-tuple `inner ⊆ target`.
struct Split {
    radices: Vec<usize>,
    /// Positions of the `inner` sites inside `target`.
    inner: Vec<usize>,
    /// Positions of the remaining sites.
    outer: Vec<usize>,
    /// Mixed-radix digits of every basis index of `target`.
    all_digits: Vec<Vec<usize>>,
}

impl Split {
    fn new(inner_sites: &[usize], target: &[usize], shape: &[usize]) -> Self {
        let radices: Vec<usize> = target.iter().map(|&s| shape[s]).collect();
        let dim: usize = radices.iter().product();
        let inner: Vec<usize> = inner_sites
            .iter()
            .filter_map(|s| target.binary_search(s).ok())
            .collect();
        let outer = (0..target.len()).filter(|p| !inner.contains(p)).collect();
        let all_digits = (0..dim).map(|i| digits(i, &radices)).collect();
        Self {
            radices,
            inner,
            outer,
            all_digits,
        }
    }

    fn inner_dim(&self) -> usize {
        self.inner.iter().map(|&p| self.radices[p]).product()
    }

    /// Index inside the `inner` subspace.
    fn local(&self, d: &[usize]) -> usize {
        self.inner
            .iter()
            .rev()
            .fold(0, |acc, &p| acc * self.radices[p] + d[p])
    }

    /// Row/column pairs of `target` that agree on every outer site.
    fn diagonal_in_outer(&self) -> impl Iterator<Item = (usize, usize, &[usize], &[usize])> {
        self.all_digits.iter().enumerate().flat_map(move |(row, rd)| {
            self.all_digits
                .iter()
                .enumerate()
                .filter(move |(_, cd)| self.outer.iter().all(|&p| rd[p] == cd[p]))
                .map(move |(col, cd)| (row, col, rd.as_slice(), cd.as_slice()))
        })
    }
}

/// Embed `matrix` acting on `sites` into the larger tuple `target ⊇ sites`.
fn embed(matrix: &Matrix, sites: &[usize], target: &[usize], shape: &[usize]) -> Matrix {
    if sites == target {
        return matrix.clone();
    }
    let split = Split::new(sites, target, shape);
    let dim = split.all_digits.len();
    let mut out = Matrix::zeros((dim, dim));
    for (row, col, rd, cd) in split.diagonal_in_outer() {
        out[[row, col]] = matrix[[split.local(rd), split.local(cd)]];
    }
    out
}

/// Normalized partial trace of `matrix` on `sites` down to `keep ⊆ sites`.
#[allow(clippy::cast_precision_loss)]
fn reduce(matrix: &Matrix, sites: &[usize], keep: &[usize], shape: &[usize]) -> Matrix {
    if sites == keep {
        return matrix.clone();
    }
    let split = Split::new(keep, sites, shape);
    let kept = split.inner_dim();
    let mut out = Matrix::zeros((kept, kept));
    for (row, col, rd, cd) in split.diagonal_in_outer() {
        out[[split.local(rd), split.local(cd)]] += matrix[[row, col]];
    }
    let traced = split.all_digits.len() / kept;
    out.mapv_into(|x| x / traced as f64)
}

/// Split a term into the components acting non-trivially on each subset of
/// its sites.
///
/// With `R_U` the normalized partial trace onto `U`, the component on `T` is
/// `Σ_{U ⊆ T} (-1)^{|T \ U|} R_U`. Components sum back to the term and are
/// unique, so two sums of terms are equal iff their components are.
fn decompose(matrix: &Matrix, sites: &[usize], shape: &[usize]) -> Vec<(Vec<usize>, Matrix)> {
    let n_subsets = 1usize << sites.len();
    let subset = |mask: usize| -> Vec<usize> {
        (0..sites.len())
            .filter(|&p| (mask & (1 << p)) != 0)
            .map(|p| sites[p])
            .collect()
    };
    let reduced: Vec<Matrix> = (0..n_subsets)
        .map(|mask| reduce(matrix, sites, &subset(mask), shape))
        .collect();

    (0..n_subsets)
        .map(|t| {
            let t_sites = subset(t);
            let dim: usize = t_sites.iter().map(|&s| shape[s]).product();
            let mut part = Matrix::zeros((dim, dim));
            // Walk every submask u of t, t itself first and 0 last.
            let mut u = t;
            loop {
                let sign = if (t ^ u).count_ones() % 2 == 0 { 1.0 } else { -1.0 };
                let lifted = embed(&reduced[u], &subset(u), &t_sites, shape);
                part.scaled_add(Complex64::new(sign, 0.0), &lifted);
                if u == 0 {
                    break;
                }
                u = (u - 1) & t;
            }
            (t_sites, part)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

impl AddAssign<&LocalOperator> for LocalOperator {
    fn add_assign(&mut self, rhs: &LocalOperator) {
        self.assert_same_shape(rhs);
        for (sites, m) in &rhs.terms {
            self.add_term(sites.clone(), m.clone());
        }
    }
}

impl AddAssign for LocalOperator {
    fn add_assign(&mut self, rhs: LocalOperator) {
        self.assert_same_shape(&rhs);
        for (sites, m) in rhs.terms {
            self.add_term(sites, m);
        }
    }
}

impl SubAssign<&LocalOperator> for LocalOperator {
    fn sub_assign(&mut self, rhs: &LocalOperator) {
        *self += -rhs;
    }
}

impl Add<&LocalOperator> for &LocalOperator {
    type Output = LocalOperator;

    fn add(self, rhs: &LocalOperator) -> LocalOperator {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl Add<&LocalOperator> for LocalOperator {
    type Output = LocalOperator;

    fn add(mut self, rhs: &LocalOperator) -> LocalOperator {
        self += rhs;
        self
    }
}

impl Add for LocalOperator {
    type Output = LocalOperator;

    fn add(mut self, rhs: LocalOperator) -> LocalOperator {
        self += rhs;
        self
    }
}

impl Neg for &LocalOperator {
    type Output = LocalOperator;

    fn neg(self) -> LocalOperator {
        self.scale(Complex64::new(-1.0, 0.0))
    }
}

impl Neg for LocalOperator {
    type Output = LocalOperator;

    fn neg(self) -> LocalOperator {
        -&self
    }
}

impl Sub<&LocalOperator> for &LocalOperator {
    type Output = LocalOperator;

    fn sub(self, rhs: &LocalOperator) -> LocalOperator {
        let mut out = self.clone();
        out -= rhs;
        out
    }
}

impl Sub for LocalOperator {
    type Output = LocalOperator;

    fn sub(mut self, rhs: LocalOperator) -> LocalOperator {
        self -= &rhs;
        self
    }
}

impl Mul<&LocalOperator> for &LocalOperator {
    type Output = LocalOperator;

    fn mul(self, rhs: &LocalOperator) -> LocalOperator {
        self.product(rhs)
    }
}

impl Mul for LocalOperator {
    type Output = LocalOperator;

    fn mul(self, rhs: LocalOperator) -> LocalOperator {
        self.product(&rhs)
    }
}

impl Mul<Complex64> for &LocalOperator {
    type Output = LocalOperator;

    fn mul(self, rhs: Complex64) -> LocalOperator {
        self.scale(rhs)
    }
}

impl Mul<Complex64> for LocalOperator {
    type Output = LocalOperator;

    fn mul(self, rhs: Complex64) -> LocalOperator {
        self.scale(rhs)
    }
}

impl Mul<f64> for &LocalOperator {
    type Output = LocalOperator;

    fn mul(self, rhs: f64) -> LocalOperator {
        self.scale(Complex64::new(rhs, 0.0))
    }
}

impl Mul<f64> for LocalOperator {
    type Output = LocalOperator;

    fn mul(self, rhs: f64) -> LocalOperator {
        self.scale(Complex64::new(rhs, 0.0))
    }
}

impl Mul<LocalOperator> for f64 {
    type Output = LocalOperator;

    fn mul(self, rhs: LocalOperator) -> LocalOperator {
        rhs * self
    }
}

impl Mul<&LocalOperator> for f64 {
    type Output = LocalOperator;

    fn mul(self, rhs: &LocalOperator) -> LocalOperator {
        rhs * self
    }
}

impl Div<f64> for LocalOperator {
    type Output = LocalOperator;

    fn div(self, rhs: f64) -> LocalOperator {
        self * rhs.recip()
    }
}

impl Div<f64> for &LocalOperator {
    type Output = LocalOperator;

    fn div(self, rhs: f64) -> LocalOperator {
        self * rhs.recip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    fn diag(values: &[f64]) -> Matrix {
        let mut m = Matrix::zeros((values.len(), values.len()));
        for (k, &v) in values.iter().enumerate() {
            m[[k, k]] = c(v);
        }
        m
    }

    #[test]
    fn test_new_validates_sites() {
        let shape = vec![2, 2, 2];
        assert!(matches!(
            LocalOperator::new(shape.clone(), vec![1, 0], diag(&[1.0; 4])),
            Err(OperatorError::UnsortedSites(_))
        ));
        assert!(matches!(
            LocalOperator::new(shape.clone(), vec![3], diag(&[1.0; 2])),
            Err(OperatorError::SiteOutOfRange { site: 3, n_sites: 3 })
        ));
        assert!(matches!(
            LocalOperator::new(shape, vec![0, 1], diag(&[1.0; 2])),
            Err(OperatorError::MatrixShape { expected: 4, .. })
        ));
    }

    #[test]
    fn test_same_site_terms_merge() {
        let a = LocalOperator::new(vec![2, 2], vec![1], diag(&[1.0, 2.0])).unwrap();
        let b = LocalOperator::new(vec![2, 2], vec![1], diag(&[3.0, 4.0])).unwrap();
        let sum = &a + &b;
        assert_eq!(sum.n_terms(), 1);
        assert_eq!(sum.term(&[1]).unwrap(), &diag(&[4.0, 6.0]));
    }

    #[test]
    fn test_disjoint_product_orders_first_site_fastest() {
        let shape = vec![2, 3];
        let a = LocalOperator::new(shape.clone(), vec![0], diag(&[1.0, 2.0])).unwrap();
        let b = LocalOperator::new(shape, vec![1], diag(&[10.0, 20.0, 30.0])).unwrap();
        let p = &b * &a;
        let m = p.term(&[0, 1]).unwrap();
        let values: Vec<f64> = (0..6).map(|k| m[[k, k]].re).collect();
        assert_eq!(values, vec![10.0, 20.0, 20.0, 40.0, 30.0, 60.0]);
    }

    #[test]
    fn test_embed_keeps_spectator_diagonal() {
        let shape = vec![2, 2];
        let mut x = Matrix::zeros((2, 2));
        x[[0, 1]] = c(1.0);
        x[[1, 0]] = c(1.0);
        let dense = LocalOperator::new(shape, vec![1], x).unwrap().to_dense().unwrap();
        // X on site 1 flips the most significant digit.
        assert_eq!(dense[[0, 2]], c(1.0));
        assert_eq!(dense[[1, 3]], c(1.0));
        assert_eq!(dense[[0, 1]], c(0.0));
    }

    #[test]
    fn test_identity_term_to_dense() {
        let mut one = Matrix::zeros((1, 1));
        one[[0, 0]] = c(2.5);
        let op = LocalOperator::new(vec![2, 3], vec![], one).unwrap();
        assert_eq!(op.to_dense().unwrap(), diag(&[2.5; 6]));
    }

    #[test]
    fn test_scalar_arithmetic() {
        let a = LocalOperator::new(vec![2], vec![0], diag(&[1.0, -1.0])).unwrap();
        let b = 2.0 * &a / 4.0;
        assert_eq!(b.term(&[0]).unwrap(), &diag(&[0.5, -0.5]));
        assert!((&a - &a).approx_eq(&LocalOperator::zero(vec![2]), 0.0));
        assert!((-a.clone() + a).approx_eq(&LocalOperator::zero(vec![2]), 0.0));
    }

    #[test]
    fn test_decompose_sums_back_to_term() {
        let shape = vec![2, 3];
        let sites = [0, 1];
        let mut m = Matrix::zeros((6, 6));
        for row in 0..6 {
            for col in 0..6 {
                m[[row, col]] = Complex64::new((row * 6 + col) as f64, (row as f64) - (col as f64));
            }
        }
        let parts = decompose(&m, &sites, &shape);
        assert_eq!(parts.len(), 4);

        let mut total = Matrix::zeros((6, 6));
        for (part_sites, part) in &parts {
            total += &embed(part, part_sites, &sites, &shape);
        }
        let err = (&total - &m).iter().map(|x| x.norm()).fold(0.0, f64::max);
        assert!(err < 1e-12);

        // Components are traceless on each of their own sites.
        let (_, on_zero) = &parts[1];
        assert_eq!(parts[1].0, vec![0]);
        assert!((on_zero[[0, 0]] + on_zero[[1, 1]]).norm() < 1e-12);
    }

    #[test]
    fn test_reduce_is_normalized_partial_trace() {
        let shape = vec![2, 2];
        let op = &LocalOperator::new(shape.clone(), vec![0], diag(&[1.0, 3.0])).unwrap()
            * &LocalOperator::new(shape.clone(), vec![1], diag(&[2.0, 4.0])).unwrap();
        let m = op.term(&[0, 1]).unwrap();
        // Tracing out site 1 leaves diag(1, 3) scaled by the mean of (2, 4).
        assert_eq!(reduce(m, &[0, 1], &[0], &shape), diag(&[3.0, 9.0]));
        assert_eq!(reduce(m, &[0, 1], &[], &shape), diag(&[6.0]));
    }

    #[test]
    #[should_panic(expected = "different Hilbert shapes")]
    fn test_shape_mismatch_panics() {
        let a = LocalOperator::zero(vec![2, 2]);
        let b = LocalOperator::zero(vec![3, 3]);
        let _ = &a + &b;
    }
}
