// scenario.rs - Scenario parameterization (which condition style to run)

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::KnownMatch;
use crate::rules::{self, RuleSet};

/// Which condition style a run measures.
///
/// Both scenarios share the generator, the driver, the verification and
/// the reporting; only the compiled rule set differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// One opaque boolean predicate per rule
    Eval,
    /// Per-attribute constraints plus an identity join
    Indexed,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::Eval, Scenario::Indexed];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Eval => "eval",
            Scenario::Indexed => "indexed",
        }
    }

    /// Build this scenario's rule set for the given known matches
    pub fn build_rules(&self, known: &[KnownMatch]) -> RuleSet {
        match self {
            Scenario::Eval => rules::build_eval(known),
            Scenario::Indexed => rules::build_indexed(known),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown scenario {0:?} (expected: eval, indexed, both)")]
pub struct UnknownScenario(pub String);

impl FromStr for Scenario {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eval" => Ok(Scenario::Eval),
            // "no_eval" is the historical name for the decomposed style
            "indexed" | "no_eval" => Ok(Scenario::Indexed),
            other => Err(UnknownScenario(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reference_matches;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!("eval".parse::<Scenario>(), Ok(Scenario::Eval));
        assert_eq!("indexed".parse::<Scenario>(), Ok(Scenario::Indexed));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(" EVAL ".parse::<Scenario>(), Ok(Scenario::Eval));
        assert_eq!("Indexed".parse::<Scenario>(), Ok(Scenario::Indexed));
    }

    #[test]
    fn test_parse_accepts_historical_alias() {
        assert_eq!("no_eval".parse::<Scenario>(), Ok(Scenario::Indexed));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "fancy".parse::<Scenario>().unwrap_err();
        assert_eq!(err, UnknownScenario("fancy".to_string()));
    }

    #[test]
    fn test_display_round_trips() {
        for s in Scenario::ALL {
            assert_eq!(s.to_string().parse::<Scenario>(), Ok(s));
        }
    }

    #[test]
    fn test_build_rules_matches_style() {
        let known = reference_matches();
        assert_eq!(Scenario::Eval.build_rules(&known).name(), "eval");
        assert_eq!(Scenario::Indexed.build_rules(&known).name(), "indexed");
    }
}
