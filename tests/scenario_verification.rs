//! End-to-end scenario runs against the reference engine, plus the
//! verification gate itself (a lying engine must abort the run).

use rulebench::bench::{BenchParams, run_scenario};
use rulebench::dataset;
use rulebench::engine::{EvaluationSession, ReferenceEngine, ReferenceSession, RuleBase, RuleEngine};
use rulebench::error::{CompileError, HarnessError};
use rulebench::models::{Fact, KnownMatch, reference_matches};
use rulebench::rules::RuleSet;
use rulebench::scenario::Scenario;

fn reference_params(scenario: Scenario) -> BenchParams {
    // Reference population with trimmed iteration counts to keep the
    // suite quick; the iteration body is identical at any count
    BenchParams {
        scenario,
        population: 1000,
        warmup_iterations: 2,
        measured_iterations: 3,
        seed: Some(1),
    }
}

// ============================================================
// Reference runs
// ============================================================

#[test]
fn reference_population_verifies_for_both_scenarios() {
    let known = reference_matches();
    for scenario in Scenario::ALL {
        let report = run_scenario(&ReferenceEngine, &reference_params(scenario), &known)
            .unwrap_or_else(|e| panic!("{scenario} failed: {e}"));

        // Every iteration reported exactly 3 satisfied rules, and one
        // sample per measured iteration survived
        assert_eq!(report.expected_matches, 3);
        assert_eq!(report.stats.len(), 3);
        assert!(report.stats.min().is_some());
    }
}

#[test]
fn indexed_handles_reference_iteration_counts() {
    let known = reference_matches();
    let params = BenchParams {
        scenario: Scenario::Indexed,
        population: 1000,
        warmup_iterations: 10,
        measured_iterations: 10,
        seed: Some(1),
    };
    let report = run_scenario(&ReferenceEngine, &params, &known).unwrap();
    assert_eq!(report.stats.len(), 10);
}

#[test]
fn engine_count_agrees_with_dataset_ground_truth() {
    // The dataset's own cross-product scan is the ground truth the
    // engine must reproduce, rule by rule
    let known = reference_matches();
    let data = dataset::generate(1000, &known, Some(1)).unwrap();
    for m in &known {
        assert_eq!(data.matching_pairs(&m.name, &m.street), 1);
    }

    let report = run_scenario(
        &ReferenceEngine,
        &reference_params(Scenario::Indexed),
        &known,
    )
    .unwrap();
    assert_eq!(report.expected_matches, known.len());
}

#[test]
fn same_seed_verifies_identically_across_runs() {
    let known = reference_matches();
    for _ in 0..2 {
        let report =
            run_scenario(&ReferenceEngine, &reference_params(Scenario::Eval), &known).unwrap();
        assert_eq!(report.expected_matches, 3);
    }
}

#[test]
fn shared_name_across_two_matches_counts_both_rules() {
    // Two rules test the same person name with different streets; both
    // planted pairs exist, so both rules must be satisfied
    let known = vec![
        KnownMatch::new("Mario", "Main Street"),
        KnownMatch::new("Mario", "Second Street"),
    ];
    for scenario in Scenario::ALL {
        let report = run_scenario(&ReferenceEngine, &reference_params(scenario), &known).unwrap();
        assert_eq!(report.expected_matches, 2);
    }
}

#[test]
fn unseeded_run_still_verifies() {
    let known = reference_matches();
    let params = BenchParams {
        seed: None,
        ..reference_params(Scenario::Indexed)
    };
    let report = run_scenario(&ReferenceEngine, &params, &known).unwrap();
    assert_eq!(report.expected_matches, 3);
}

#[test]
fn setup_faults_abort_before_timing() {
    let known = reference_matches();
    let params = BenchParams {
        population: 2,
        ..reference_params(Scenario::Eval)
    };
    let err = run_scenario(&ReferenceEngine, &params, &known).unwrap_err();
    assert!(matches!(&err, HarnessError::Generation(_)), "got {err:?}");
}

// ============================================================
// The verification gate
// ============================================================

/// Delegates to the reference engine but reports one extra satisfied
/// rule, i.e. an engine that gets the answer wrong
struct InflatingEngine;

struct InflatingSession(ReferenceSession);

impl RuleEngine for InflatingEngine {
    type RuleBase = RuleBase;
    type Session = InflatingSession;

    fn compile(&self, rules: RuleSet) -> Result<RuleBase, CompileError> {
        ReferenceEngine.compile(rules)
    }

    fn open_session(&self, base: &RuleBase) -> InflatingSession {
        InflatingSession(ReferenceEngine.open_session(base))
    }
}

impl EvaluationSession for InflatingSession {
    fn insert(&mut self, fact: Fact) {
        self.0.insert(fact);
    }

    fn evaluate_all(self) -> usize {
        self.0.evaluate_all() + 1
    }
}

#[test]
fn lying_engine_aborts_on_the_first_iteration() {
    // Warm-up iterations are verified too: the mismatch must surface at
    // iteration 0, before any sample is recorded
    let known = reference_matches();
    let err = run_scenario(&InflatingEngine, &reference_params(Scenario::Indexed), &known)
        .unwrap_err();

    assert_eq!(
        err,
        HarnessError::Verification {
            scenario: Scenario::Indexed,
            iteration: 0,
            expected: 3,
            actual: 4,
        }
    );
}

#[test]
fn verification_error_names_scenario_and_counts() {
    let known = reference_matches();
    let err = run_scenario(&InflatingEngine, &reference_params(Scenario::Eval), &known)
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("eval"), "{msg}");
    assert!(msg.contains("expected 3"), "{msg}");
    assert!(msg.contains("reported 4"), "{msg}");
}
