//! Core types used throughout the harness
//!
//! These are fundamental type aliases used by all modules.
//! They provide semantic meaning and keep the fact plumbing free of bare integers.

/// Person fact ID - unique within one generated dataset.
///
/// # Constraints:
/// - **Immutable**: assigned at generation time, NEVER reassigned
/// - **Sequential**: assigned contiguously (0, 1, 2, ...) in dataset order
pub type PersonId = u64;

/// Address fact ID - unique within one generated dataset.
///
/// # Usage:
/// - `Person::address` holds the ID of the referenced address fact
/// - Identity joins compare this ID, never the street label. Two addresses
///   with equal streets but different IDs are different facts.
pub type AddressId = u64;

/// Rule index inside a compiled rule base (position in declaration order)
pub type RuleIdx = usize;
