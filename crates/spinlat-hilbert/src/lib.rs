//! `spinlat-hilbert` — spin Hilbert spaces and product-basis state encoding.
//!
//! This crate owns the state side of spinlat:
//!
//! - [`HilbertSpace`]: the interface operator builders read site shapes from
//! - [`HomogeneousSpin`]: `n_sites` spins sharing one local dimension `N`
//! - [`SpinValue`]: the element type of caller-owned configurations
//!
//! Configurations are never owned or cached here. Every operation reads or
//! rewrites a slice supplied by the caller, and every random draw comes from
//! the caller's generator, so seeded runs stay reproducible.
//!
//! # Quick start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use spinlat_hilbert::HomogeneousSpin;
//!
//! // Four spin-1 sites.
//! let hilbert = HomogeneousSpin::with_spin(1.0, 4).unwrap();
//! assert_eq!(hilbert.local_dim(), 3);
//! assert_eq!(hilbert.n_states(), 81);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut config = vec![0.0_f64; 4];
//! hilbert.randomize(&mut rng, &mut config).unwrap();
//!
//! let (old, new) = hilbert.flip_at(&mut rng, &mut config, 2).unwrap();
//! assert_ne!(old, new);
//!
//! let index = hilbert.to_index(&config).unwrap();
//! assert_eq!(hilbert.state_at::<f64>(index).unwrap(), config);
//! ```

pub mod error;
pub mod hilbert;
pub mod spin;
pub mod value;

pub use error::{HilbertError, HilbertResult};
pub use hilbert::HilbertSpace;
pub use spin::{HomogeneousSpin, States};
pub use value::SpinValue;
