//! # Core Module
//!
//! This module provides the stateless building blocks of fragmentation: molecule
//! data models, connectivity graphs, file formats and the persistent molecule
//! store interface.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Elements, atoms, bonds, formulas and charged molecules
//! - **Connectivity** ([`graph`]) - Molecule graphs, bond perception, isomorphism and cleavage
//! - **File I/O** ([`io`]) - Reading and writing molecular file formats
//! - **Persistent Records** ([`store`]) - Lookup of previously computed molecules
//!
//! Nothing in this module keeps state between calls. The stateful parts of a
//! fragmentation run live in [`crate::engine`].

pub mod graph;
pub mod io;
pub mod models;
pub mod store;
