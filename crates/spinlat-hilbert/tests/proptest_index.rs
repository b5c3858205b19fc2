//! Property-based tests for global-index encoding.
//!
//! Decoding then encoding any valid index gives the index back, and encoding
//! then decoding any valid configuration gives the configuration back.

use proptest::prelude::*;
use spinlat_hilbert::HomogeneousSpin;

/// A Hilbert space small enough to stay far from index overflow.
fn arb_hilbert() -> impl Strategy<Value = HomogeneousSpin> {
    (2_usize..=6, 1_usize..=8).prop_map(|(n, sites)| {
        HomogeneousSpin::new(n, sites).expect("strategy stays within bounds")
    })
}

/// A Hilbert space together with one of its valid configurations.
fn arb_config() -> impl Strategy<Value = (HomogeneousSpin, Vec<i32>)> {
    arb_hilbert().prop_flat_map(|h| {
        let top = h.local_dim() as i32 - 1;
        let site = (0..h.local_dim() as i32).prop_map(move |level| 2 * level - top);
        (Just(h), prop::collection::vec(site, h.n_sites()))
    })
}

proptest! {
    #[test]
    fn index_roundtrip(h in arb_hilbert(), seed in any::<u64>()) {
        let index = 1 + (seed as usize) % h.n_states();
        let mut config = vec![0_i32; h.n_sites()];
        h.set_from_index(&mut config, index).unwrap();
        prop_assert_eq!(h.to_index(&config).unwrap(), index);
    }

    #[test]
    fn config_roundtrip((h, config) in arb_config()) {
        let index = h.to_index(&config).unwrap();
        prop_assert!(index >= 1 && index <= h.n_states());

        let mut decoded = vec![0_i32; h.n_sites()];
        h.set_from_index(&mut decoded, index).unwrap();
        prop_assert_eq!(decoded, config);
    }

    #[test]
    fn float_config_roundtrip((h, config) in arb_config()) {
        let as_f64: Vec<f64> = config.iter().map(|&v| f64::from(v)).collect();
        let index = h.to_index(&as_f64).unwrap();
        prop_assert_eq!(index, h.to_index(&config).unwrap());

        let decoded: Vec<f32> = h.state_at(index).unwrap();
        let back: Vec<i32> = decoded.iter().map(|&v| v as i32).collect();
        prop_assert_eq!(back, config);
    }

    #[test]
    fn add_to_index_matches_shift((h, config) in arb_config(), delta in -50_i64..=50) {
        let base = h.to_index(&config).unwrap() as i64;
        let target = base + delta;
        let mut shifted = config.clone();
        let result = h.add_to_index(&mut shifted, delta);

        if target >= 1 && target <= h.n_states() as i64 {
            prop_assert!(result.is_ok());
            prop_assert_eq!(h.to_index(&shifted).unwrap() as i64, target);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(shifted, config);
        }
    }

    #[test]
    fn local_indices_agree_with_global((h, config) in arb_config()) {
        let all_sites: Vec<usize> = (0..h.n_sites()).collect();
        prop_assert_eq!(
            h.local_index_of(&config, &all_sites).unwrap(),
            h.to_index(&config).unwrap()
        );
        for site in 0..h.n_sites() {
            prop_assert_eq!(
                h.local_index(&config, site).unwrap(),
                h.local_index_of(&config, &[site]).unwrap()
            );
        }
    }
}
