//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Two entities with the same id are the same record, even when their other
/// attributes differ (e.g. before and after a full-replace update).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
