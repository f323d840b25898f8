//! Payload value model and shape-preserving traversal.
//!
//! Telemetry payloads are heterogeneous trees with no fixed schema. This
//! module models them as a tagged variant and provides the recursive walker
//! that applies a string transform to every text leaf without disturbing
//! the tree's shape.

mod value;
mod walker;

pub use value::Payload;
pub use walker::walk;
