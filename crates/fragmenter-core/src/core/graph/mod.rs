//! Molecular connectivity graphs.
//!
//! Wraps a `petgraph` undirected graph of atoms and bonds and provides the graph
//! operations fragmentation is built from: construction from explicit bonds,
//! bond perception from geometry, isomorphism testing and single-round bond
//! cleavage.

pub mod cleavage;
pub mod molecule_graph;
pub mod perception;
