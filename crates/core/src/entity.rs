//! Entity trait: identity + continuity across state changes.

/// Minimal interface shared by every persisted record.
///
/// The id is the only thing the persistence layer needs: stores key records
/// by it, and `save` derives the key from the record itself.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
