//! # Core Models Module
//!
//! This module contains the plain data structures used to describe molecules before
//! they are turned into graphs: elements, atoms, bonds, formulas and charged
//! molecule snapshots.
//!
//! ## Key Components
//!
//! - [`element`] - Supported chemical elements with atomic numbers and covalent radii
//! - [`atom`] - An element at a position in space
//! - [`topology`] - Bonds between atom indices and bond orders
//! - [`formula`] - Atom multisets with Hill-notation formatting and electron counting
//! - [`molecule`] - Ordered atoms with net charge and spin multiplicity
//!
//! ## Usage
//!
//! ```ignore
//! use fragmenter::core::models::{atom::Atom, element::Element, molecule::Molecule};
//!
//! let atoms = vec![
//!     Atom::new(Element::O, Point3::new(0.0, 0.0, 0.0)),
//!     Atom::new(Element::H, Point3::new(0.96, 0.0, 0.0)),
//! ];
//! let hydroxide = Molecule::with_charge_and_spin(atoms, -1, None)?;
//! ```

pub mod atom;
pub mod element;
pub mod formula;
pub mod molecule;
pub mod topology;
