//! Lattice connectivity.
//!
//! Composition functions only need vertex identifiers and edges with a
//! source and destination, so that is all [`Lattice`] asks for. Vertex
//! identifiers double as Hilbert-space site indices.
//!
//! [`LatticeGraph`] is the bundled implementation, an undirected petgraph
//! graph with constructors for the usual geometries.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OperatorError, OperatorResult};

/// An undirected bond between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source vertex.
    pub src: usize,
    /// Destination vertex.
    pub dst: usize,
}

/// Vertices and edges of a lattice.
pub trait Lattice {
    /// Number of vertices.
    fn n_vertices(&self) -> usize;

    /// Vertex identifiers.
    fn vertices(&self) -> impl Iterator<Item = usize> + '_;

    /// Every edge, each listed once.
    fn edges(&self) -> impl Iterator<Item = Edge> + '_;
}

/// A lattice stored as an undirected petgraph graph.
#[derive(Debug, Clone)]
pub struct LatticeGraph {
    graph: UnGraph<(), ()>,
}

impl LatticeGraph {
    /// Build a lattice from an explicit edge list.
    ///
    /// Edges must connect two distinct vertices below `n_vertices`.
    pub fn from_edges(
        n_vertices: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> OperatorResult<Self> {
        let mut graph = UnGraph::with_capacity(n_vertices, 0);
        for _ in 0..n_vertices {
            graph.add_node(());
        }
        for (src, dst) in edges {
            if src >= n_vertices || dst >= n_vertices || src == dst {
                return Err(OperatorError::InvalidEdge {
                    src,
                    dst,
                    n_vertices,
                });
            }
            graph.add_edge(NodeIndex::new(src), NodeIndex::new(dst), ());
        }
        debug!(
            n_vertices,
            n_edges = graph.edge_count(),
            "built lattice graph"
        );
        Ok(Self { graph })
    }

    /// Open or periodic one-dimensional chain.
    ///
    /// Periodic chains of one or two sites get no wrap-around bond, which
    /// would duplicate or self-loop an existing one.
    pub fn chain(length: usize, periodic: bool) -> OperatorResult<Self> {
        Self::hypercube(length, 1, periodic)
    }

    /// `length^ndim` hypercubic lattice with nearest-neighbour bonds.
    ///
    /// Vertex `v` has coordinates given by the base-`length` digits of `v`,
    /// the first dimension least significant.
    pub fn hypercube(length: usize, ndim: usize, periodic: bool) -> OperatorResult<Self> {
        if length == 0 || ndim == 0 {
            return Err(OperatorError::InvalidLattice(format!(
                "hypercube needs positive length and dimension, got length={length} ndim={ndim}"
            )));
        }
        let n_vertices = u32::try_from(ndim)
            .ok()
            .and_then(|d| length.checked_pow(d))
            .ok_or_else(|| {
                OperatorError::InvalidLattice(format!("{length}^{ndim} vertices overflow usize"))
            })?;

        let mut edges = Vec::new();
        for v in 0..n_vertices {
            let mut stride = 1;
            for _ in 0..ndim {
                let coord = (v / stride) % length;
                if coord + 1 < length {
                    edges.push((v, v + stride));
                } else if periodic && length > 2 {
                    edges.push((v, v - coord * stride));
                }
                stride *= length;
            }
        }
        Self::from_edges(n_vertices, edges)
    }

    /// Number of edges.
    pub fn n_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Vertices sharing an edge with `vertex`.
    pub fn neighbors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors(NodeIndex::new(vertex))
            .map(NodeIndex::index)
    }
}

impl Lattice for LatticeGraph {
    fn n_vertices(&self) -> usize {
        self.graph.node_count()
    }

    fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.graph.node_indices().map(NodeIndex::index)
    }

    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_references().map(|e| Edge {
            src: e.source().index(),
            dst: e.target().index(),
        })
    }
}
