//! Pure policy evaluation (no IO).
//!
//! Input: dependency declarations extracted elsewhere and a policy table.
//! Output: violations per manifest, aggregated into a run result + verdict.

#![forbid(unsafe_code)]

pub mod model;
pub mod policy;
pub mod report;
pub mod version;

mod engine;

#[cfg(test)]
mod proptest;

pub use engine::{evaluate, evaluate_manifest};
pub use report::aggregate;
