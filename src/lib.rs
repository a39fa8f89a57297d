//! rulebench - eval vs indexed rule matching, measured honestly
//!
//! A correctness-checked micro-benchmark comparing two equivalent ways of
//! writing the same multi-fact rules: one opaque boolean predicate per
//! rule, versus per-attribute constraints the engine can index. Both run
//! against the same generated fact population, and every iteration's
//! satisfied-rule count is verified before its timing counts.
//!
//! # Modules
//!
//! - [`core_types`] - Core type aliases (PersonId, AddressId, RuleIdx)
//! - [`models`] - Person/Address facts and known matches
//! - [`rules`] - Rule definitions and the two condition-style builders
//! - [`scenario`] - Scenario selection (eval / indexed)
//! - [`dataset`] - Deterministic dataset generator
//! - [`engine`] - Engine boundary traits plus the reference engine
//! - [`bench`] - Benchmark driver with per-iteration verification
//! - [`perf`] - Single-shot samples and phase breakdown
//! - [`error`] - Typed setup and verification failures
//! - [`config`] - YAML config with CLI-friendly defaults
//! - [`logging`] - tracing subscriber setup

// Core types - must be first!
pub mod core_types;

// Facts, rules, data
pub mod dataset;
pub mod models;
pub mod rules;
pub mod scenario;

// Engine and harness
pub mod bench;
pub mod engine;
pub mod error;
pub mod perf;

// Ambient plumbing
pub mod config;
pub mod logging;

// Convenient re-exports at crate root
pub use bench::{BenchParams, ScenarioReport, run_scenario};
pub use core_types::{AddressId, PersonId, RuleIdx};
pub use dataset::Dataset;
pub use engine::{EvaluationSession, ReferenceEngine, RuleEngine};
pub use error::{CompileError, GenerationError, HarnessError};
pub use models::{Address, Fact, KnownMatch, Person};
pub use perf::IterationStats;
pub use rules::{Lhs, RuleDef, RuleSet, build_eval, build_indexed};
pub use scenario::Scenario;
