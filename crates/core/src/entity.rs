//! Entity trait: records that are told apart by identifier alone.

/// Entity marker + minimal interface.
///
/// Snapshot records carry no identity beyond their id; two records with the
/// same id inside one snapshot indicate an upstream inconsistency.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
