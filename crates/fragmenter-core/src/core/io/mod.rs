//! Provides input/output functionality for molecular file formats.
//!
//! Formats implement the [`traits::MoleculeFile`] trait so callers can read and
//! write molecules without caring about the on-disk layout.

pub mod traits;
pub mod xyz;
