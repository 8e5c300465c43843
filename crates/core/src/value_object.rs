//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are never mutated in place. To "change"
/// one, build a new value (e.g. `ViewQuery::with_search` returns a new query).
///
/// - **Value Object**: two values with the same attributes are equal
///   (a view query, a stock adjustment request).
/// - **Entity**: two records with the same id are the same record even if
///   their attributes differ (a product, a category).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
