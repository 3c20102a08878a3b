//! Identity key derivation and row grouping.

mod resolver;

pub use resolver::{IdentityKey, IdentityResolver, ResolvedGroups, UnidentifiedPolicy};
