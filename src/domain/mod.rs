//! Domain layer types and invariants.

pub mod channel;
pub mod envelope;
pub mod error;
pub mod node;
