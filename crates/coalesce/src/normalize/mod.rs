//! Per-field normalization and validation.

mod engine;
pub mod fields;

pub use engine::{NormalizeStats, Normalizer};
