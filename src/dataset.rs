//! Deterministic Dataset Generator
//!
//! Builds the fact population every scenario runs against: `population`
//! linked (person, address) pairs where row `i`'s person references row
//! `i`'s address and nothing else.
//!
//! Labels come in two kinds:
//! - **Noise**: fresh UUID strings, one per name and street. With a seed,
//!   the UUID bytes are drawn from a seeded `StdRng`, so the whole dataset
//!   is reproducible; without one they come from `Uuid::new_v4()`.
//! - **Reserved**: the known-match labels, planted at evenly spaced
//!   positions so every rule has exactly one satisfying pair and the
//!   expected satisfied-rule count of a run equals the match count.
//!
//! A noise label that collides with a reserved label would make the
//! expected count ambiguous, so generation fails instead of shipping
//! such a dataset.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use uuid::Uuid;

use crate::core_types::{AddressId, PersonId};
use crate::error::GenerationError;
use crate::models::{Address, KnownMatch, Person};

/// A generated fact population.
///
/// Invariant: `persons.len() == addresses.len()`, and `persons[i]`
/// references `addresses[i]` by ID.
#[derive(Debug, Clone)]
pub struct Dataset {
    persons: Vec<Person>,
    addresses: Vec<Address>,
}

impl Dataset {
    #[inline]
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    #[inline]
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    #[inline]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Iterate rows as linked (person, address) pairs in insertion order
    pub fn iter_pairs(&self) -> impl Iterator<Item = (&Person, &Address)> {
        self.persons.iter().zip(self.addresses.iter())
    }

    /// Count (person, address) combinations across the WHOLE dataset that
    /// carry the given labels AND are identity-joined.
    ///
    /// This is the ground truth a correct engine must agree with. It scans
    /// the full cross product, so cross-row combinations (right labels,
    /// wrong identity) are counted out, not skipped.
    pub fn matching_pairs(&self, name: &str, street: &str) -> usize {
        self.persons
            .iter()
            .filter(|p| p.name == name)
            .map(|p| {
                self.addresses
                    .iter()
                    .filter(|a| a.street == street && p.address == a.id)
                    .count()
            })
            .sum()
    }
}

/// Positions where known matches are planted: `(i + 1) * population / (k + 1)`
/// for the i-th of `k` matches.
///
/// For population 1000 and 3 matches this yields 250, 500, 750. The
/// positions are pairwise distinct whenever `matches <= population`, which
/// [`generate`] checks before calling this.
pub fn reserved_positions(population: usize, matches: usize) -> Vec<usize> {
    (0..matches)
        .map(|i| (i + 1) * population / (matches + 1))
        .collect()
}

/// Generate a dataset of `population` linked pairs with one planted pair
/// per known match.
///
/// With `seed: Some(s)` the noise labels are reproducible across runs and
/// platforms; with `None` every run draws fresh ones.
///
/// # Errors
/// - `PopulationTooSmall` if there are more known matches than rows
/// - `ReservedLabelCollision` if a drawn noise label equals any reserved
///   name or street
pub fn generate(
    population: usize,
    known: &[KnownMatch],
    seed: Option<u64>,
) -> Result<Dataset, GenerationError> {
    if known.len() > population {
        return Err(GenerationError::PopulationTooSmall {
            population,
            matches: known.len(),
        });
    }

    // Row index -> known match planted there
    let planted: FxHashMap<usize, &KnownMatch> = reserved_positions(population, known.len())
        .into_iter()
        .zip(known.iter())
        .collect();

    let reserved_labels: FxHashSet<&str> = known
        .iter()
        .flat_map(|m| [m.name.as_str(), m.street.as_str()])
        .collect();

    let mut rng = seed.map(StdRng::seed_from_u64);
    let mut persons = Vec::with_capacity(population);
    let mut addresses = Vec::with_capacity(population);

    for row in 0..population {
        let (name, street) = match planted.get(&row) {
            Some(m) => (m.name.clone(), m.street.clone()),
            None => {
                // Street first, then name: keeps the draw order stable
                let street = noise_label(&mut rng);
                let name = noise_label(&mut rng);
                for label in [&street, &name] {
                    if reserved_labels.contains(label.as_str()) {
                        return Err(GenerationError::ReservedLabelCollision {
                            label: label.clone(),
                        });
                    }
                }
                (name, street)
            }
        };
        addresses.push(Address::new(row as AddressId, street));
        persons.push(Person::new(row as PersonId, name, row as AddressId));
    }

    Ok(Dataset { persons, addresses })
}

/// One noise label: a UUID string, seeded or OS-random
fn noise_label(rng: &mut Option<StdRng>) -> String {
    match rng {
        Some(rng) => {
            let hi = rng.next_u64() as u128;
            let lo = rng.next_u64() as u128;
            Uuid::from_u128((hi << 64) | lo).to_string()
        }
        None => Uuid::new_v4().to_string(),
    }
}

// ============================================================
// TESTS
// ============================================================
