// models.rs - Fact types inserted into a working memory

use serde::{Deserialize, Serialize};

use crate::core_types::{AddressId, PersonId};

// ============================================================
// FACTS (the two fact shapes every rule set matches over)
// ============================================================

/// Address fact - a street label plus its fact identity
///
/// The street label is NOT an identity. Two addresses with the same
/// street but different `id` never satisfy an identity join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    pub street: String,
}

impl Address {
    pub fn new(id: AddressId, street: impl Into<String>) -> Self {
        Self {
            id,
            street: street.into(),
        }
    }
}

/// Person fact - a name label plus a reference to exactly one address
///
/// The reference is held by ID, mirroring how a working memory sees two
/// separate facts rather than one nested object. The identity join in a
/// rule resolves `address` against `Address::id`, never against labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// ID of the address fact this person references
    pub address: AddressId,
}

impl Person {
    pub fn new(id: PersonId, name: impl Into<String>, address: AddressId) -> Self {
        Self {
            id,
            name: name.into(),
            address,
        }
    }
}

/// A fact handed to an evaluation session
///
/// Sessions receive facts one at a time and may route them by type and
/// attribute value at insert time. Nothing else about the dataset shape
/// leaks through this enum.
#[derive(Debug, Clone)]
pub enum Fact {
    Person(Person),
    Address(Address),
}

impl Fact {
    /// Short type tag for logs
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            Fact::Person(_) => "person",
            Fact::Address(_) => "address",
        }
    }
}

// ============================================================
// KNOWN MATCH (one planted (name, street) pair = one rule)
// ============================================================

/// One planted match: a (name, street) pair the generator guarantees to
/// exist exactly once as a linked person/address pair in the dataset.
///
/// Each known match produces one rule in every scenario, so the expected
/// satisfied-rule count of a run is simply the number of known matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownMatch {
    pub name: String,
    pub street: String,
}

impl KnownMatch {
    pub fn new(name: impl Into<String>, street: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            street: street.into(),
        }
    }
}

/// The reference match list used by the default config and the test suite
pub fn reference_matches() -> Vec<KnownMatch> {
    vec![
        KnownMatch::new("Mario", "Main Street"),
        KnownMatch::new("Duncan", "First Street"),
        KnownMatch::new("Toshiya", "Second Street"),
    ]
}

// ============================================================
// TESTS
// ============================================================
