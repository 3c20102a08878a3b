//! Field-wise reduction of an identity group into one canonical row.

mod engine;
mod policy;

pub use engine::MergeEngine;
pub use policy::{CombineRule, MergePolicy};
