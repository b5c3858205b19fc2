//! The Hilbert-space interface consumed by operator builders.

/// A tensor-product Hilbert space over a finite set of sites.
///
/// Sites are addressed `0..n_sites()`. Implementors describe the local
/// dimension of every site; everything else has a default.
pub trait HilbertSpace {
    /// Number of sites.
    fn n_sites(&self) -> usize;

    /// Number of levels at `site`, or `None` if the site does not exist.
    fn local_dim(&self, site: usize) -> Option<usize>;

    /// Total number of basis states, `None` if it overflows `usize`.
    fn n_states(&self) -> Option<usize> {
        self.shape()
            .into_iter()
            .try_fold(1usize, usize::checked_mul)
    }

    /// Local dimension of every site, in site order.
    fn shape(&self) -> Vec<usize> {
        (0..self.n_sites())
            .filter_map(|site| self.local_dim(site))
            .collect()
    }

    /// True if every site carries the same local dimension.
    fn is_homogeneous(&self) -> bool {
        let shape = self.shape();
        shape.windows(2).all(|w| w[0] == w[1])
    }
}
