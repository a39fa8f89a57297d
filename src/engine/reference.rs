//! Reference Matching Engine
//!
//! Deliberately small, but it gives the two rule styles their real cost
//! shapes:
//!
//! - **Decomposed rules are indexed at compile time.** Each tested
//!   attribute value becomes a hash route, so an inserted fact reaches
//!   the candidate lists of exactly the rules testing its value. A fact
//!   whose value no rule tests costs one hash miss. Evaluation then only
//!   probes the tiny candidate lists for the identity join.
//! - **Eval rules stay opaque.** The engine cannot see inside the
//!   predicate, so evaluation scans person x address combinations until
//!   the predicate first holds, stopping early per rule.
//!
//! Every inserted fact is also retained in working memory in insertion
//! order; the eval scan runs over that retained memory.

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core_types::{AddressId, RuleIdx};
use crate::engine::{EvaluationSession, RuleEngine};
use crate::error::CompileError;
use crate::models::{Address, Fact, Person};
use crate::rules::{Lhs, RuleDef, RuleSet};

/// The in-crate engine both scenarios run against
#[derive(Debug, Default)]
pub struct ReferenceEngine;

/// Compiled rules plus the attribute routes built from decomposed LHSes
#[derive(Debug)]
struct CompiledRules {
    rules: Vec<RuleDef>,
    /// person-name constraint value -> rules testing it
    name_routes: FxHashMap<String, Vec<RuleIdx>>,
    /// street constraint value -> rules testing it
    street_routes: FxHashMap<String, Vec<RuleIdx>>,
}

/// Shareable handle to a compiled rule base.
///
/// Cheap to hand to any number of sessions; the compiled form is
/// immutable once built.
#[derive(Debug, Clone)]
pub struct RuleBase {
    inner: Rc<CompiledRules>,
}

impl RuleBase {
    #[inline]
    pub fn rule_count(&self) -> usize {
        self.inner.rules.len()
    }
}

/// One working memory: retained facts plus per-rule candidate state
#[derive(Debug)]
pub struct ReferenceSession {
    base: Rc<CompiledRules>,
    persons: Vec<Person>,
    addresses: Vec<Address>,
    /// Per rule: referenced address IDs of persons that passed the name route
    person_refs: Vec<Vec<AddressId>>,
    /// Per rule: IDs of addresses that passed the street route
    address_ids: Vec<FxHashSet<AddressId>>,
}

impl RuleEngine for ReferenceEngine {
    type RuleBase = RuleBase;
    type Session = ReferenceSession;

    fn compile(&self, rules: RuleSet) -> Result<RuleBase, CompileError> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for (index, rule) in rules.rules().iter().enumerate() {
            if rule.name.is_empty() {
                return Err(CompileError::EmptyRuleName { index });
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(CompileError::DuplicateRuleName {
                    name: rule.name.clone(),
                });
            }
        }
        drop(seen);

        let mut name_routes: FxHashMap<String, Vec<RuleIdx>> = FxHashMap::default();
        let mut street_routes: FxHashMap<String, Vec<RuleIdx>> = FxHashMap::default();
        for (index, rule) in rules.rules().iter().enumerate() {
            if let Lhs::Decomposed {
                person_name,
                street,
            } = &rule.lhs
            {
                name_routes.entry(person_name.clone()).or_default().push(index);
                street_routes.entry(street.clone()).or_default().push(index);
            }
        }

        tracing::debug!(
            rule_set = rules.name(),
            rules = rules.len(),
            name_routes = name_routes.len(),
            street_routes = street_routes.len(),
            "compiled rule base"
        );

        Ok(RuleBase {
            inner: Rc::new(CompiledRules {
                rules: rules.into_rules(),
                name_routes,
                street_routes,
            }),
        })
    }

    fn open_session(&self, base: &RuleBase) -> ReferenceSession {
        let n = base.inner.rules.len();
        ReferenceSession {
            base: Rc::clone(&base.inner),
            persons: Vec::new(),
            addresses: Vec::new(),
            person_refs: vec![Vec::new(); n],
            address_ids: vec![FxHashSet::default(); n],
        }
    }
}

impl EvaluationSession for ReferenceSession {
    fn insert(&mut self, fact: Fact) {
        match fact {
            Fact::Person(p) => {
                if let Some(routes) = self.base.name_routes.get(&p.name) {
                    for &rule in routes {
                        self.person_refs[rule].push(p.address);
                    }
                }
                self.persons.push(p);
            }
            Fact::Address(a) => {
                if let Some(routes) = self.base.street_routes.get(&a.street) {
                    for &rule in routes {
                        self.address_ids[rule].insert(a.id);
                    }
                }
                self.addresses.push(a);
            }
        }
    }

    fn evaluate_all(self) -> usize {
        let mut satisfied = 0;
        for (idx, rule) in self.base.rules.iter().enumerate() {
            let hit = match &rule.lhs {
                // Opaque: nothing to do but try combinations until one holds
                Lhs::Eval(pred) => self
                    .persons
                    .iter()
                    .any(|p| self.addresses.iter().any(|a| pred(p, a))),
                // Indexed: probe the identity join over the routed candidates
                Lhs::Decomposed { .. } => {
                    let ids = &self.address_ids[idx];
                    self.person_refs[idx].iter().any(|addr| ids.contains(addr))
                }
            };
            if hit {
                satisfied += 1;
            }
        }
        satisfied
    }
}

// ============================================================
// TESTS
// ============================================================
