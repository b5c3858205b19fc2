//! Dense single-site operator matrices.
//!
//! For spin operators an `N`-level site is a spin `S = (N - 1) / 2`, with
//! basis index `k` holding `m = S - k` (descending). The σ operators are
//! twice the spin operators, so `N = 2` gives the Pauli matrices:
//!
//!   σx = S₊ + S₋,  σy = -i (S₊ - S₋),  σz = 2 Sz
//!
//! For bosonic operators the same site is a Fock space truncated at
//! `N - 1` quanta, basis index `k` holding `k` quanta.
//!
//! Entries are complex throughout. No function here validates `N`.

use ndarray::Array2;
use num_complex::Complex64;

/// A dense complex operator matrix.
pub type Matrix = Array2<Complex64>;

#[allow(clippy::cast_precision_loss)]
fn spin_of(dim: usize) -> f64 {
    (dim as f64 - 1.0) / 2.0
}

fn real(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

/// `D[a] = sqrt((S + 1)·2a - a(a + 1))`, the σx off-diagonal magnitude.
#[allow(clippy::cast_precision_loss)]
fn off_diagonal(s: f64, a: usize) -> f64 {
    let a = a as f64;
    ((s + 1.0) * 2.0 * a - a * (a + 1.0)).sqrt()
}

/// Identity on an `dim`-level site.
pub fn identity(dim: usize) -> Matrix {
    Matrix::eye(dim)
}

/// σx: symmetric tridiagonal, `D[a]` at `(a-1, a)` and `(a, a-1)`.
pub fn sigma_x(dim: usize) -> Matrix {
    let s = spin_of(dim);
    let mut m = Matrix::zeros((dim, dim));
    for a in 1..dim {
        let d = real(off_diagonal(s, a));
        m[[a - 1, a]] = d;
        m[[a, a - 1]] = d;
    }
    m
}

/// σy: `-i·D[a]` above the diagonal, `+i·D[a]` below.
pub fn sigma_y(dim: usize) -> Matrix {
    let s = spin_of(dim);
    let mut m = Matrix::zeros((dim, dim));
    for a in 1..dim {
        let d = off_diagonal(s, a);
        m[[a - 1, a]] = Complex64::new(0.0, -d);
        m[[a, a - 1]] = Complex64::new(0.0, d);
    }
    m
}

/// σz: diagonal `2m` for `m = S, S-1, …, -S`.
#[allow(clippy::cast_precision_loss)]
pub fn sigma_z(dim: usize) -> Matrix {
    let top = dim as f64 - 1.0;
    let mut m = Matrix::zeros((dim, dim));
    for k in 0..dim {
        m[[k, k]] = real(top - 2.0 * k as f64);
    }
    m
}

/// σ₋: lowers `m`; `sqrt(S(S+1) - m(m-1))` at `(k+1, k)` for `m = S - k`.
#[allow(clippy::cast_precision_loss)]
pub fn sigma_minus(dim: usize) -> Matrix {
    let s = spin_of(dim);
    let mut m = Matrix::zeros((dim, dim));
    for k in 0..dim.saturating_sub(1) {
        let mz = s - k as f64;
        m[[k + 1, k]] = real((s * (s + 1.0) - mz * (mz - 1.0)).sqrt());
    }
    m
}

/// σ₊: raises `m`; `sqrt(S(S+1) - m(m+1))` at `(k, k+1)` for `m = S - k - 1`.
#[allow(clippy::cast_precision_loss)]
pub fn sigma_plus(dim: usize) -> Matrix {
    let s = spin_of(dim);
    let mut m = Matrix::zeros((dim, dim));
    for k in 0..dim.saturating_sub(1) {
        let mz = s - k as f64 - 1.0;
        m[[k, k + 1]] = real((s * (s + 1.0) - mz * (mz + 1.0)).sqrt());
    }
    m
}

/// Bosonic annihilation: `sqrt(k)` at `(k-1, k)`.
#[allow(clippy::cast_precision_loss)]
pub fn destroy(dim: usize) -> Matrix {
    let mut m = Matrix::zeros((dim, dim));
    for k in 1..dim {
        m[[k - 1, k]] = real((k as f64).sqrt());
    }
    m
}

/// Bosonic creation: `sqrt(k)` at `(k, k-1)`.
#[allow(clippy::cast_precision_loss)]
pub fn create(dim: usize) -> Matrix {
    let mut m = Matrix::zeros((dim, dim));
    for k in 1..dim {
        m[[k, k - 1]] = real((k as f64).sqrt());
    }
    m
}

/// Occupation number: diagonal `0, 1, …, N-1`.
#[allow(clippy::cast_precision_loss)]
pub fn number(dim: usize) -> Matrix {
    let mut m = Matrix::zeros((dim, dim));
    for k in 0..dim {
        m[[k, k]] = real(k as f64);
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn max_abs_diff(a: &Matrix, b: &Matrix) -> f64 {
        assert_eq!(a.dim(), b.dim());
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).norm())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_pauli_matrices() {
        let z = c(0.0, 0.0);
        let o = c(1.0, 0.0);
        let x = Matrix::from_shape_vec((2, 2), vec![z, o, o, z]).unwrap();
        let y = Matrix::from_shape_vec((2, 2), vec![z, c(0.0, -1.0), c(0.0, 1.0), z]).unwrap();
        let zz = Matrix::from_shape_vec((2, 2), vec![o, z, z, -o]).unwrap();

        assert!(max_abs_diff(&sigma_x(2), &x) < TOL);
        assert!(max_abs_diff(&sigma_y(2), &y) < TOL);
        assert!(max_abs_diff(&sigma_z(2), &zz) < TOL);
    }

    #[test]
    fn test_spin_half_ladders() {
        // σ₊ = |↑⟩⟨↓| and σ₋ = |↓⟩⟨↑| with ↑ at index 0.
        assert!((sigma_plus(2)[[0, 1]] - c(1.0, 0.0)).norm() < TOL);
        assert!((sigma_minus(2)[[1, 0]] - c(1.0, 0.0)).norm() < TOL);
        assert_eq!(sigma_plus(2)[[1, 0]], c(0.0, 0.0));
    }

    #[test]
    fn test_spin_one_sigma_x() {
        let s2 = 2.0_f64.sqrt();
        let m = sigma_x(3);
        assert!((m[[0, 1]].re - s2).abs() < TOL);
        assert!((m[[1, 2]].re - s2).abs() < TOL);
        assert!(m[[0, 2]].norm() < TOL);
    }

    #[test]
    fn test_sigma_z_descends() {
        let m = sigma_z(4);
        let diag: Vec<f64> = (0..4).map(|k| m[[k, k]].re).collect();
        assert_eq!(diag, vec![3.0, 1.0, -1.0, -3.0]);
    }

    #[test]
    fn test_number_and_identity() {
        let n = number(3);
        assert_eq!(n[[2, 2]], c(2.0, 0.0));
        assert_eq!(identity(3)[[1, 1]], c(1.0, 0.0));
        assert_eq!(identity(3)[[0, 1]], c(0.0, 0.0));
    }

    #[test]
    fn test_ladders_of_fock_space() {
        let a = destroy(4);
        assert!((a[[2, 3]].re - 3.0_f64.sqrt()).abs() < TOL);
        let ad = create(4);
        assert!((ad[[3, 2]].re - 3.0_f64.sqrt()).abs() < TOL);
        // a†a = n
        assert!(max_abs_diff(&ad.dot(&a), &number(4)) < TOL);
    }

    #[test]
    fn test_degenerate_dimensions() {
        assert_eq!(sigma_x(1).dim(), (1, 1));
        assert_eq!(sigma_x(1)[[0, 0]], c(0.0, 0.0));
        assert_eq!(sigma_minus(0).dim(), (0, 0));
    }
}
