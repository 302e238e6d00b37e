//! # Engine Module
//!
//! The stateful side of a fragmentation run.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Depth, ring handling, charge policy and work-unit settings
//! - **Fragment Registry** ([`registry`]) - Isomorphism-deduplicated set of unique fragments
//! - **Enumeration** ([`enumerator`]) - Level-wise cleavage of the parent and its fragments
//! - **Charge Assignment** ([`charges`]) - Admissible charge states and derived spin multiplicities
//! - **Store Membership** ([`membership`]) - Skipping candidates that were already computed
//! - **Work Units** ([`work_units`]) - Calculation requests and the completion record
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front ends
//! - **Error Handling** ([`error`]) - Engine-level error types
//!
//! A run owns its registry and level index; nothing here is shared between runs.

pub mod charges;
pub mod config;
pub mod enumerator;
pub mod error;
pub mod membership;
pub mod progress;
pub mod registry;
pub mod work_units;
