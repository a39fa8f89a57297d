// error.rs - Typed failures for setup and verification
//
// Setup faults (generation, compilation) abort before any timing starts.
// Verification faults abort the whole run: a single wrong count means the
// numbers measure the wrong computation, so no report is worth keeping.

use thiserror::Error;

use crate::scenario::Scenario;

/// Dataset generation failures. All of them are setup faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("population {population} cannot hold {matches} reserved match positions")]
    PopulationTooSmall { population: usize, matches: usize },

    #[error("random noise label collided with reserved label {label:?}")]
    ReservedLabelCollision { label: String },
}

/// Rule compilation failures reported by an engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("rule at position {index} has an empty name")]
    EmptyRuleName { index: usize },

    #[error("duplicate rule name {name:?}")]
    DuplicateRuleName { name: String },
}

/// Top-level harness failure: anything that invalidates a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    #[error("dataset generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("rule set failed to compile: {0}")]
    Compile(#[from] CompileError),

    #[error(
        "verification failed: scenario {scenario}, iteration {iteration}: \
         expected {expected} satisfied rules, engine reported {actual}"
    )]
    Verification {
        scenario: Scenario,
        /// 0-based iteration index, counting warm-up iterations too
        iteration: u32,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_message_names_the_mismatch() {
        let err = HarnessError::Verification {
            scenario: Scenario::Eval,
            iteration: 4,
            expected: 3,
            actual: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("eval"));
        assert!(msg.contains("iteration 4"));
        assert!(msg.contains("expected 3"));
        assert!(msg.contains("reported 2"));
    }

    #[test]
    fn test_generation_error_converts_into_harness_error() {
        let gen_err = GenerationError::PopulationTooSmall {
            population: 2,
            matches: 3,
        };
        let harness: HarnessError = gen_err.clone().into();
        assert_eq!(harness, HarnessError::Generation(gen_err));
    }
}
