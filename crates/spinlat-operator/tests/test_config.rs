//! Tests for YAML model configuration.

use spinlat_hilbert::HilbertError;
use spinlat_operator::models::{IsingParams, quantum_ising_hamiltonian};
use spinlat_operator::{Lattice, LatticeGraph, LatticeSpec, ModelConfig, OperatorError};

#[test]
fn parses_full_model() {
    let yaml = "\
local_dim: 3
lattice:
  kind: chain
  length: 4
  periodic: true
ising:
  g: 0.5
  v: -2.0
";
    let cfg = ModelConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(cfg.local_dim, 3);
    assert_eq!(
        cfg.lattice,
        LatticeSpec::Chain {
            length: 4,
            periodic: true
        }
    );
    assert_eq!(cfg.ising, IsingParams { g: 0.5, v: -2.0 });

    let hilbert = cfg.build_hilbert().unwrap();
    assert_eq!(hilbert.local_dim(), 3);
    assert_eq!(hilbert.n_sites(), 4);
}

#[test]
fn defaults_fill_missing_fields() {
    let yaml = "\
lattice:
  kind: hypercube
  length: 2
  ndim: 2
ising:
  g: 3.0
";
    let cfg = ModelConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(cfg.local_dim, 2);
    assert_eq!(cfg.ising, IsingParams { g: 3.0, v: 1.0 });
    assert_eq!(
        cfg.lattice,
        LatticeSpec::Hypercube {
            length: 2,
            ndim: 2,
            periodic: false
        }
    );
    assert_eq!(cfg.build_lattice().unwrap().n_edges(), 4);
}

#[test]
fn edge_list_model_builds_same_hamiltonian() {
    let yaml = "\
lattice:
  kind: edges
  n_vertices: 2
  edges: [[0, 1]]
";
    let cfg = ModelConfig::from_yaml_str(yaml).unwrap();
    let from_config = cfg.build_ising().unwrap();

    let lattice = LatticeGraph::from_edges(2, [(0, 1)]).unwrap();
    let hilbert = cfg.build_hilbert().unwrap();
    let direct = quantum_ising_hamiltonian(&lattice, &hilbert, IsingParams::default()).unwrap();
    assert!(from_config.approx_eq(&direct, 1e-15));
    assert_eq!(lattice.n_vertices(), 2);
}

#[test]
fn yaml_roundtrip() {
    let cfg = ModelConfig {
        local_dim: 4,
        lattice: LatticeSpec::Hypercube {
            length: 3,
            ndim: 2,
            periodic: true,
        },
        ising: IsingParams { g: 0.25, v: 4.0 },
    };
    let yaml = cfg.to_yaml_string().unwrap();
    assert!(yaml.contains("kind: hypercube"));
    assert_eq!(ModelConfig::from_yaml_str(&yaml).unwrap(), cfg);
}

#[test]
fn reads_model_file() {
    let path = std::env::temp_dir().join(format!("spinlat-model-{}.yaml", std::process::id()));
    std::fs::write(&path, "lattice:\n  kind: chain\n  length: 3\n").unwrap();
    let cfg = ModelConfig::from_yaml_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(cfg.build_ising().unwrap().n_terms(), 3 + 2);
}

#[test]
fn missing_file_is_io_error() {
    let err = ModelConfig::from_yaml_file("/nonexistent/spinlat/model.yaml").unwrap_err();
    assert!(matches!(err, OperatorError::Io(_)));
}

#[test]
fn malformed_yaml_is_config_error() {
    let err = ModelConfig::from_yaml_str("lattice:\n  kind: torus\n").unwrap_err();
    assert!(matches!(err, OperatorError::Config(_)));
}

#[test]
fn invalid_local_dim_surfaces_hilbert_error() {
    let cfg = ModelConfig::from_yaml_str("local_dim: 1\nlattice:\n  kind: chain\n  length: 2\n").unwrap();
    assert!(matches!(
        cfg.build_ising(),
        Err(OperatorError::Hilbert(HilbertError::InvalidLocalDim(1)))
    ));
}
