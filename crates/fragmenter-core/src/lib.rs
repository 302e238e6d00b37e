//! # Fragmenter Core Library
//!
//! Enumerates the structurally distinct fragments of a molecule reachable by breaking
//! bonds, assigns each fragment its plausible charge states, skips anything already
//! present in a molecule store and emits one work unit per remaining candidate for a
//! downstream electronic-structure calculation.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture with a clear separation of concerns.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `MoleculeGraph`),
//!   graph algorithms (bond perception, isomorphism, cleavage), XYZ I/O and the
//!   `MoleculeStore` interface.
//!
//! - **[`engine`]: The Logic Core.** The stateful parts of a run: the fragment
//!   registry and level-wise enumerator, charge assignment, store membership checks
//!   and work-unit construction, together with configuration, errors and progress
//!   reporting.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into a single
//!   fragmentation procedure that takes a parent molecule and returns work units plus
//!   a completion record.

pub mod core;
pub mod engine;
pub mod workflows;
