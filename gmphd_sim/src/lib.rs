//! Deterministic demo driver for `gmphd_core`.
//!
//! Builds a small synthetic two-target-plus-clutter scenario from a single
//! seed and drives the tracker loop over it. This crate owns the simulation,
//! CLI, and logging setup that the core library deliberately has no opinion
//! on.

mod scenario;

pub use scenario::{Scenario, ScenarioConfig, tag_rng_seed};
