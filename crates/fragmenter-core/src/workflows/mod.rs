//! # Workflows Module
//!
//! High-level entry points that run a complete procedure from a parent molecule to
//! its results.
//!
//! - **Fragmentation Workflow** ([`fragment`]) - Connectivity resolution, fragment
//!   enumeration, charge assignment, store screening and work-unit construction.

pub mod fragment;
