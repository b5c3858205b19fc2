//! Homogeneous spin Hilbert space and its product-basis states.
//!
//! Every site carries the same `N = 2S + 1` levels. A configuration is a
//! caller-owned slice holding `2m` per site (see [`SpinValue`]). The global
//! basis index is a mixed-radix number in base `N` with site 0 as the least
//! significant digit, offset by one:
//!
//!   index = 1 + Σ_i level(config[i]) · N^i,   level(v) = (v + N - 1) / 2
//!
//! # Example
//!
//! ```rust
//! use spinlat_hilbert::HomogeneousSpin;
//!
//! let hilbert = HomogeneousSpin::new(2, 3).unwrap();
//! let config = [1_i8, -1, 1];
//! assert_eq!(hilbert.to_index(&config).unwrap(), 6);
//!
//! let mut decoded = [0_i8; 3];
//! hilbert.set_from_index(&mut decoded, 6).unwrap();
//! assert_eq!(decoded, config);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{HilbertError, HilbertResult};
use crate::hilbert::HilbertSpace;
use crate::value::SpinValue;

/// A Hilbert space of `n_sites` spins sharing one local dimension.
///
/// Immutable once built; every state operation borrows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawHomogeneousSpin", into = "RawHomogeneousSpin")]
pub struct HomogeneousSpin {
    local_dim: usize,
    n_sites: usize,
    /// `local_dim^n_sites`, checked at construction.
    n_states: usize,
}

#[derive(Serialize, Deserialize)]
struct RawHomogeneousSpin {
    local_dim: usize,
    n_sites: usize,
}

impl TryFrom<RawHomogeneousSpin> for HomogeneousSpin {
    type Error = HilbertError;

    fn try_from(raw: RawHomogeneousSpin) -> HilbertResult<Self> {
        Self::new(raw.local_dim, raw.n_sites)
    }
}

impl From<HomogeneousSpin> for RawHomogeneousSpin {
    fn from(h: HomogeneousSpin) -> Self {
        Self {
            local_dim: h.local_dim,
            n_sites: h.n_sites,
        }
    }
}

impl HomogeneousSpin {
    /// Create a space of `n_sites` sites with `local_dim` levels each.
    pub fn new(local_dim: usize, n_sites: usize) -> HilbertResult<Self> {
        // Site values are 2m in [-(N-1), N-1]; shifted levels reach 2(N-1).
        let fits_i64 = i64::try_from(local_dim)
            .ok()
            .and_then(|n| n.checked_mul(2))
            .is_some();
        if local_dim < 2 || !fits_i64 {
            return Err(HilbertError::InvalidLocalDim(local_dim));
        }
        if n_sites == 0 {
            return Err(HilbertError::NoSites);
        }
        let n_states = u32::try_from(n_sites)
            .ok()
            .and_then(|n| local_dim.checked_pow(n))
            .ok_or(HilbertError::DimensionOverflow { local_dim, n_sites })?;

        trace!(local_dim, n_sites, n_states, "built homogeneous spin space");
        Ok(Self {
            local_dim,
            n_sites,
            n_states,
        })
    }

    /// Create a space of spin-`s` sites, `s ∈ {1/2, 1, 3/2, …}`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_spin(s: f64, n_sites: usize) -> HilbertResult<Self> {
        let twice = 2.0 * s;
        if !(twice.is_finite() && twice.fract() == 0.0 && twice >= 1.0 && twice < 1.0e9) {
            return Err(HilbertError::InvalidSpin(s));
        }
        Self::new(twice as usize + 1, n_sites)
    }

    /// Levels per site, `N`.
    pub fn local_dim(&self) -> usize {
        self.local_dim
    }

    /// Number of sites.
    pub fn n_sites(&self) -> usize {
        self.n_sites
    }

    /// Number of basis states, `N^n_sites`.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Spin quantum number `S = (N - 1) / 2`.
    #[allow(clippy::cast_precision_loss)]
    pub fn spin(&self) -> f64 {
        (self.local_dim - 1) as f64 / 2.0
    }

    /// The allowed site values (`2m`) in ascending order.
    pub fn local_states(&self) -> Vec<i64> {
        (0..self.local_dim).map(|level| self.twice_m_of(level)).collect()
    }

    // ---------------------------------------------------------------------
    // Single-site updates
    // ---------------------------------------------------------------------

    /// Move `site` to a uniformly chosen different level.
    ///
    /// Two-level sites are negated without touching `rng`; otherwise exactly
    /// one draw picks among the `N - 1` other levels. Returns `(old, new)`.
    /// Cached summaries such as the magnetization are the caller's to update.
    pub fn flip_at<R, T>(&self, rng: &mut R, config: &mut [T], site: usize) -> HilbertResult<(T, T)>
    where
        R: Rng + ?Sized,
        T: SpinValue,
    {
        self.check_len(config)?;
        self.check_site(site)?;
        let old = config[site];
        let old_level = self.level_of(old, site)?;

        let new_level = if self.local_dim == 2 {
            1 - old_level
        } else {
            // Sample the N-1 other levels and skip over the current one.
            let drawn = rng.gen_range(0..self.local_dim - 1);
            if drawn >= old_level { drawn + 1 } else { drawn }
        };

        let new = self.value::<T>(new_level)?;
        config[site] = new;
        Ok((old, new))
    }

    /// Overwrite `site` with `value` and return the previous value.
    ///
    /// `value` is not checked against the allowed levels.
    pub fn set_at<T: SpinValue>(&self, config: &mut [T], site: usize, value: T) -> HilbertResult<T> {
        self.check_len(config)?;
        self.check_site(site)?;
        Ok(std::mem::replace(&mut config[site], value))
    }

    /// Draw every site independently and uniformly from the `N` levels.
    ///
    /// Consumes one draw per site.
    pub fn randomize<R, T>(&self, rng: &mut R, config: &mut [T]) -> HilbertResult<()>
    where
        R: Rng + ?Sized,
        T: SpinValue,
    {
        self.check_len(config)?;
        self.check_representable::<T>()?;
        for slot in config.iter_mut() {
            *slot = self.value(rng.gen_range(0..self.local_dim))?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Index encoding
    // ---------------------------------------------------------------------

    /// Decode the 1-based global `index` into `config`.
    pub fn set_from_index<T: SpinValue>(&self, config: &mut [T], index: usize) -> HilbertResult<()> {
        self.check_len(config)?;
        if index == 0 || index > self.n_states {
            return Err(HilbertError::IndexOutOfRange {
                index: index as i128,
                n_states: self.n_states,
            });
        }
        self.check_representable::<T>()?;

        let mut remaining = index - 1;
        for slot in config.iter_mut() {
            let level = remaining % self.local_dim;
            remaining /= self.local_dim;
            *slot = self.value(level)?;
        }
        Ok(())
    }

    /// Shift the encoded index of `config` by `delta` and decode it back.
    pub fn add_to_index<T: SpinValue>(&self, config: &mut [T], delta: i64) -> HilbertResult<()> {
        let shifted = self.to_index(config)? as i128 + i128::from(delta);
        let index = usize::try_from(shifted)
            .ok()
            .filter(|&i| i >= 1 && i <= self.n_states)
            .ok_or(HilbertError::IndexOutOfRange {
                index: shifted,
                n_states: self.n_states,
            })?;
        self.set_from_index(config, index)
    }

    /// Encode `config` as its 1-based global index.
    pub fn to_index<T: SpinValue>(&self, config: &[T]) -> HilbertResult<usize> {
        self.check_len(config)?;
        let mut index = 0;
        let mut stride = 1;
        for (site, &v) in config.iter().enumerate() {
            index += self.level_of(v, site)? * stride;
            // The final stride equals n_states, which fits.
            stride *= self.local_dim;
        }
        Ok(index + 1)
    }

    /// 1-based local basis index of a single site.
    pub fn local_index<T: SpinValue>(&self, config: &[T], site: usize) -> HilbertResult<usize> {
        self.check_len(config)?;
        self.check_site(site)?;
        Ok(self.level_of(config[site], site)? + 1)
    }

    /// 1-based mixed-radix index of the ordered subset `sites`.
    ///
    /// `sites[0]` is the least significant digit.
    pub fn local_index_of<T: SpinValue>(&self, config: &[T], sites: &[usize]) -> HilbertResult<usize> {
        self.check_len(config)?;
        let overflow = HilbertError::DimensionOverflow {
            local_dim: self.local_dim,
            n_sites: sites.len(),
        };
        let mut index = 0usize;
        let mut stride = 1usize;
        for &site in sites {
            self.check_site(site)?;
            let level = self.level_of(config[site], site)?;
            index = level
                .checked_mul(stride)
                .and_then(|d| index.checked_add(d))
                .ok_or_else(|| overflow.clone())?;
            stride = stride
                .checked_mul(self.local_dim)
                .ok_or_else(|| overflow.clone())?;
        }
        index.checked_add(1).ok_or(overflow)
    }

    // ---------------------------------------------------------------------
    // Enumeration
    // ---------------------------------------------------------------------

    /// Allocate the configuration with global index `index`.
    pub fn state_at<T: SpinValue>(&self, index: usize) -> HilbertResult<Vec<T>> {
        let mut config = vec![self.value::<T>(0)?; self.n_sites];
        self.set_from_index(&mut config, index)?;
        Ok(config)
    }

    /// Iterate over every basis configuration in index order.
    pub fn states<T: SpinValue>(&self) -> HilbertResult<States<T>> {
        let values = (0..self.local_dim)
            .map(|level| self.value(level))
            .collect::<HilbertResult<Vec<T>>>()?;
        Ok(States {
            local_dim: self.local_dim,
            levels: vec![0; self.n_sites],
            values,
            remaining: self.n_states,
        })
    }

    // ---------------------------------------------------------------------
    // Internal helpers
    // ---------------------------------------------------------------------

    fn check_len<T>(&self, config: &[T]) -> HilbertResult<()> {
        if config.len() == self.n_sites {
            Ok(())
        } else {
            Err(HilbertError::ConfigLength {
                expected: self.n_sites,
                got: config.len(),
            })
        }
    }

    fn check_site(&self, site: usize) -> HilbertResult<()> {
        if site < self.n_sites {
            Ok(())
        } else {
            Err(HilbertError::SiteOutOfRange {
                site,
                n_sites: self.n_sites,
            })
        }
    }

    /// Both extreme levels fit in `T`, hence every level does.
    fn check_representable<T: SpinValue>(&self) -> HilbertResult<()> {
        self.value::<T>(0)?;
        self.value::<T>(self.local_dim - 1)?;
        Ok(())
    }

    #[allow(clippy::cast_possible_wrap)]
    fn twice_m_of(&self, level: usize) -> i64 {
        2 * level as i64 - (self.local_dim as i64 - 1)
    }

    fn value<T: SpinValue>(&self, level: usize) -> HilbertResult<T> {
        let twice_m = self.twice_m_of(level);
        T::from_twice_m(twice_m).ok_or(HilbertError::Unrepresentable(twice_m))
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn level_of<T: SpinValue>(&self, v: T, site: usize) -> HilbertResult<usize> {
        let top = self.local_dim as i64 - 1;
        v.twice_m()
            .and_then(|twice_m| twice_m.checked_add(top))
            .filter(|shifted| *shifted >= 0 && shifted % 2 == 0 && shifted / 2 <= top)
            .map(|shifted| (shifted / 2) as usize)
            .ok_or(HilbertError::InvalidValue {
                site,
                value: v.to_f64(),
                local_dim: self.local_dim,
            })
    }
}

impl HilbertSpace for HomogeneousSpin {
    fn n_sites(&self) -> usize {
        self.n_sites
    }

    fn local_dim(&self, site: usize) -> Option<usize> {
        (site < self.n_sites).then_some(self.local_dim)
    }

    fn n_states(&self) -> Option<usize> {
        Some(self.n_states)
    }

    fn shape(&self) -> Vec<usize> {
        vec![self.local_dim; self.n_sites]
    }

    fn is_homogeneous(&self) -> bool {
        true
    }
}

/// Iterator over all basis configurations of a [`HomogeneousSpin`].
///
/// Yields configurations in global-index order, starting at index 1.
#[derive(Debug, Clone)]
pub struct States<T> {
    local_dim: usize,
    /// Odometer of per-site levels for the next configuration.
    levels: Vec<usize>,
    /// Site value for each level.
    values: Vec<T>,
    remaining: usize,
}

impl<T: SpinValue> Iterator for States<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let config = self.levels.iter().map(|&l| self.values[l]).collect();

        for level in &mut self.levels {
            *level += 1;
            if *level < self.local_dim {
                break;
            }
            *level = 0;
        }
        Some(config)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: SpinValue> ExactSizeIterator for States<T> {}
