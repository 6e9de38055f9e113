//! Witness types encoding invariants in the type system.
//!
//! Instead of repeatedly validating that a confidence score is in [0, 1],
//! parse it once into a [`Confidence`]. Downstream code can then rely on
//! the invariant without re-checking.

mod confidence;

pub use confidence::Confidence;
