// rules.rs - Rule definitions and the two equivalent condition styles
//
// Every scenario compiles the same logical conditions; what differs is how
// much structure the rule author exposes to the engine:
//
// - `Lhs::Eval` hides the whole condition inside one opaque predicate over
//   a candidate (person, address) pair. The engine can only call it.
// - `Lhs::Decomposed` names each tested attribute separately, which lets
//   the engine route facts by value at insert time and join by identity.

use std::fmt;

use crate::models::{Address, KnownMatch, Person};

/// Opaque pair predicate used by eval-style rules.
///
/// Receives one candidate combination: one person fact and one address
/// fact drawn from working memory. The engine learns nothing from it
/// beyond the boolean answer.
pub type PairPredicate = Box<dyn Fn(&Person, &Address) -> bool>;

/// Left-hand side of a rule, in one of the two supported styles.
pub enum Lhs {
    /// Single opaque predicate over a (person, address) candidate pair
    Eval(PairPredicate),
    /// Per-attribute equality constraints plus an implicit identity join
    /// (`person.address == address.id`)
    Decomposed { person_name: String, street: String },
}

impl Lhs {
    /// Semantic truth of this LHS against one candidate pair.
    ///
    /// Both styles agree on this answer for every pair; they differ only
    /// in what the engine is allowed to see before calling it.
    pub fn holds(&self, person: &Person, address: &Address) -> bool {
        match self {
            Lhs::Eval(pred) => pred(person, address),
            Lhs::Decomposed {
                person_name,
                street,
            } => {
                person.name == *person_name
                    && address.street == *street
                    && person.address == address.id
            }
        }
    }

    /// Short style tag for logs
    #[inline]
    pub fn style(&self) -> &'static str {
        match self {
            Lhs::Eval(_) => "eval",
            Lhs::Decomposed { .. } => "decomposed",
        }
    }
}

impl fmt::Debug for Lhs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lhs::Eval(_) => f.write_str("Eval(<opaque predicate>)"),
            Lhs::Decomposed {
                person_name,
                street,
            } => f
                .debug_struct("Decomposed")
                .field("person_name", person_name)
                .field("street", street)
                .finish(),
        }
    }
}

/// One rule: a unique name plus its left-hand side
#[derive(Debug)]
pub struct RuleDef {
    pub name: String,
    pub lhs: Lhs,
}

/// A named, ordered rule sequence handed to an engine for compilation
#[derive(Debug)]
pub struct RuleSet {
    name: String,
    rules: Vec<RuleDef>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>, rules: Vec<RuleDef>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn rules(&self) -> &[RuleDef] {
        &self.rules
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn into_rules(self) -> Vec<RuleDef> {
        self.rules
    }
}

// ============================================================
// BUILDERS (one rule per known match, names R1..Rk)
// ============================================================

/// Build the eval-style rule set: one opaque predicate per known match.
///
/// The predicate tests name, then street, then the identity join, in that
/// order, against every candidate pair the engine offers it.
pub fn build_eval(known: &[KnownMatch]) -> RuleSet {
    let rules = known
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let name = m.name.clone();
            let street = m.street.clone();
            RuleDef {
                name: format!("R{}", i + 1),
                lhs: Lhs::Eval(Box::new(move |p: &Person, a: &Address| {
                    p.name == name && a.street == street && p.address == a.id
                })),
            }
        })
        .collect();
    RuleSet::new("eval", rules)
}

/// Build the indexed-style rule set: the same conditions with each tested
/// attribute named separately, so the engine can index them.
pub fn build_indexed(known: &[KnownMatch]) -> RuleSet {
    let rules = known
        .iter()
        .enumerate()
        .map(|(i, m)| RuleDef {
            name: format!("R{}", i + 1),
            lhs: Lhs::Decomposed {
                person_name: m.name.clone(),
                street: m.street.clone(),
            },
        })
        .collect();
    RuleSet::new("indexed", rules)
}

// ============================================================
// TESTS
// ============================================================
