//! Benchmark Harness Module
//!
//! Setup once, then per iteration: fresh session, insert every fact,
//! evaluate once, verify the count, keep the timing.
//!
//! # Components
//!
//! - [`driver`] - scenario runner with strict per-iteration verification

pub mod driver;

pub use driver::{BenchParams, ScenarioReport, run_scenario};
