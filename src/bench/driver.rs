//! Benchmark Driver - setup once, iterate, verify, time
//!
//! The driver owns the shape of a run:
//!
//! 1. **Setup (untimed, once)**: generate the dataset, build the
//!    scenario's rule set, compile it.
//! 2. **Per iteration**: open a fresh session, insert every fact in
//!    dataset order (each person then its address, row by row), evaluate
//!    once, and check the satisfied-rule count against the known-match
//!    count.
//! 3. **Timing**: one single-shot sample per iteration covering insert +
//!    evaluate. Warm-up iterations run the identical body; their samples
//!    are discarded, their verification is not.
//!
//! A single wrong count aborts the whole run. Numbers from an engine that
//! got the answer wrong measure the wrong computation, so no partial
//! report survives a verification failure.

use std::time::Instant;

use crate::dataset::{self, Dataset};
use crate::engine::{EvaluationSession, RuleEngine};
use crate::error::HarnessError;
use crate::models::{Fact, KnownMatch};
use crate::perf::IterationStats;
use crate::scenario::Scenario;

/// Parameters of one scenario run
#[derive(Debug, Clone)]
pub struct BenchParams {
    pub scenario: Scenario,
    /// Number of linked (person, address) rows to generate
    pub population: usize,
    /// Iterations run before sampling starts; verified but not recorded
    pub warmup_iterations: u32,
    /// Iterations whose samples make up the report
    pub measured_iterations: u32,
    /// Noise-label seed; `None` draws fresh labels every run
    pub seed: Option<u64>,
}

impl Default for BenchParams {
    fn default() -> Self {
        Self {
            scenario: Scenario::Eval,
            population: 1000,
            warmup_iterations: 10,
            measured_iterations: 10,
            seed: Some(1),
        }
    }
}

/// Everything a finished run reports
#[derive(Debug)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub population: usize,
    /// The verified satisfied-rule count of every iteration
    pub expected_matches: usize,
    pub warmup_iterations: u32,
    pub stats: IterationStats,
}

/// Run one scenario to completion.
///
/// Every iteration, warm-up included, must report exactly `known.len()`
/// satisfied rules; the first mismatch aborts with
/// [`HarnessError::Verification`].
pub fn run_scenario<E: RuleEngine>(
    engine: &E,
    params: &BenchParams,
    known: &[KnownMatch],
) -> Result<ScenarioReport, HarnessError> {
    let dataset = dataset::generate(params.population, known, params.seed)?;
    let rules = params.scenario.build_rules(known);
    let base = engine.compile(rules)?;
    tracing::info!(
        scenario = %params.scenario,
        population = params.population,
        matches = known.len(),
        seed = ?params.seed,
        "setup complete"
    );

    let expected = known.len();
    let mut stats = IterationStats::with_capacity(params.measured_iterations as usize);
    let total = params.warmup_iterations + params.measured_iterations;

    for iteration in 0..total {
        let (satisfied, insert_ns, evaluate_ns) = run_iteration(engine, &base, &dataset);
        if satisfied != expected {
            return Err(HarnessError::Verification {
                scenario: params.scenario,
                iteration,
                expected,
                actual: satisfied,
            });
        }
        let warmup = iteration < params.warmup_iterations;
        if !warmup {
            stats.record(insert_ns, evaluate_ns);
        }
        tracing::debug!(iteration, warmup, satisfied, insert_ns, evaluate_ns, "iteration verified");
    }

    Ok(ScenarioReport {
        scenario: params.scenario,
        population: params.population,
        expected_matches: expected,
        warmup_iterations: params.warmup_iterations,
        stats,
    })
}

/// One iteration: fresh session, full insert, one evaluation.
///
/// Returns (satisfied count, insert ns, evaluate ns). Cloning facts out
/// of the dataset is part of the insert phase on purpose: handing a fact
/// to a session is what an engine user pays for.
fn run_iteration<E: RuleEngine>(
    engine: &E,
    base: &E::RuleBase,
    dataset: &Dataset,
) -> (usize, u64, u64) {
    let mut session = engine.open_session(base);

    let insert_start = Instant::now();
    for (person, address) in dataset.iter_pairs() {
        session.insert(Fact::Person(person.clone()));
        session.insert(Fact::Address(address.clone()));
    }
    let insert_ns = insert_start.elapsed().as_nanos() as u64;

    let evaluate_start = Instant::now();
    let satisfied = session.evaluate_all();
    let evaluate_ns = evaluate_start.elapsed().as_nanos() as u64;

    (satisfied, insert_ns, evaluate_ns)
}

// ============================================================
// TESTS
// ============================================================
