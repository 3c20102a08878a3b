//! Coalesce: cleaning, deduplication and merge engine for contact exports.
//!
//! Coalesce ingests a merged contact table (TSV) aggregated from multiple
//! upstream systems and produces one canonical row per real-world contact:
//! every field normalized to a defined shape, duplicates grouped by identity
//! key, and each group reduced field-wise by a configurable merge policy.
//!
//! # Core Principles
//!
//! - **Schema as data**: per-column rules live in a table, not in control flow
//! - **Degrade, don't abort**: an invalid field becomes null; only missing or
//!   structurally broken input files stop a run
//! - **No fabrication**: every merged value existed verbatim in some input row
//!
//! # Example
//!
//! ```no_run
//! use coalesce::Pipeline;
//!
//! let pipeline = Pipeline::new();
//! let report = pipeline.run("merged_contacts.tsv", "contacts_cleaned.tsv").unwrap();
//!
//! println!("Rows in: {}", report.stats.rows_in);
//! println!("Contacts out: {}", report.stats.contacts_out);
//! ```

pub mod error;
pub mod identity;
pub mod input;
pub mod merge;
pub mod normalize;
pub mod output;
pub mod schema;
pub mod sequence;

mod pipeline;

pub use crate::pipeline::{Pipeline, PipelineConfig, RunReport, RunStats};
pub use error::{CoalesceError, Result};
pub use identity::{IdentityKey, IdentityResolver, ResolvedGroups, UnidentifiedPolicy};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use merge::{CombineRule, MergeEngine, MergePolicy};
pub use normalize::{NormalizeStats, Normalizer};
pub use output::write_table;
pub use schema::{ContactSchema, FieldKind};
pub use sequence::Sequencer;
