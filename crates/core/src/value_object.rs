//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; two value objects with the same
//! attributes are the same value. Pricing inputs such as device diagnostics
//! are value objects: they are built per request, compared by content and
//! never mutated.

/// Marker trait for value objects.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Flags { broken: bool }
///
/// impl ValueObject for Flags {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
