//! Pipeline driver: read → normalize → group → merge → sequence → write.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoalesceError, Result};
use crate::identity::{IdentityResolver, UnidentifiedPolicy};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::merge::{MergeEngine, MergePolicy};
use crate::normalize::{NormalizeStats, Normalizer};
use crate::output::write_table;
use crate::schema::ContactSchema;
use crate::sequence::Sequencer;

/// Configuration for a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Input parser configuration.
    pub parser: ParserConfig,
    /// Column rule table.
    pub schema: ContactSchema,
    /// Per-column combine rules for the merge stage.
    pub merge: MergePolicy,
    /// Policy for rows with no usable identity key.
    pub unidentified: UnidentifiedPolicy,
}

/// Aggregate statistics for one run, threaded through the stages and
/// returned at the end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Raw rows read from the input.
    pub rows_in: usize,
    /// Canonical rows written (one per contact group).
    pub contacts_out: usize,
    /// Rows folded into another row of their group.
    pub duplicates_merged: usize,
    /// Per-column count of values nulled during normalization.
    pub nulled_by_column: indexmap::IndexMap<String, usize>,
    /// Rows whose identity came from the email key.
    pub primary_key_rows: usize,
    /// Rows whose identity came from the fullname/mobile fallback.
    pub fallback_key_rows: usize,
    /// Rows with no usable identity key.
    pub unidentified_rows: usize,
}

/// Result of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Metadata about the input file.
    pub source: SourceMetadata,
    /// Per-stage statistics.
    pub stats: RunStats,
}

/// The batch cleaning/deduplication pipeline.
pub struct Pipeline {
    config: PipelineConfig,
    parser: Parser,
    normalizer: Normalizer,
    resolver: IdentityResolver,
    merger: MergeEngine,
    sequencer: Sequencer,
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let normalizer = Normalizer::new(config.schema.clone());
        let resolver = IdentityResolver::with_policy(config.unidentified);
        let merger = MergeEngine::with_policy(config.merge.clone());
        let sequencer = Sequencer::new(config.schema.sequence_columns.clone());

        Self {
            config,
            parser,
            normalizer,
            resolver,
            merger,
            sequencer,
        }
    }

    /// Run the whole pipeline: read `input`, write the canonical table to
    /// `output`. Nothing is written unless every stage succeeds.
    pub fn run(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<RunReport> {
        let input = input.as_ref();

        let (raw, source) = self.parser.parse_file(input)?;

        let missing = self.config.schema.missing_columns(&raw.headers);
        if !missing.is_empty() {
            return Err(CoalesceError::Header {
                path: input.to_path_buf(),
                missing: missing.join(", "),
            });
        }

        let (table, stats) = self.process(&raw)?;
        write_table(&table, output)?;

        Ok(RunReport {
            source,
            stats,
        })
    }

    /// Run the in-memory stages on an already-parsed table.
    pub fn process(&self, raw: &DataTable) -> Result<(DataTable, RunStats)> {
        let rows_in = raw.row_count();

        let (normalized, norm_stats): (DataTable, NormalizeStats) =
            self.normalizer.normalize_table(raw);

        let resolved = self.resolver.resolve(&normalized)?;

        let canonical_rows: Vec<Vec<String>> = resolved
            .groups
            .values()
            .map(|members| self.merger.merge_group(&normalized, members))
            .collect();

        let mut output = DataTable::new(
            normalized.headers.clone(),
            canonical_rows,
            normalized.delimiter,
        );
        self.sequencer.renumber(&mut output);

        let contacts_out = output.row_count();
        let stats = RunStats {
            rows_in,
            contacts_out,
            duplicates_merged: rows_in - contacts_out,
            nulled_by_column: norm_stats.nulled_by_column,
            primary_key_rows: resolved.primary_rows,
            fallback_key_rows: resolved.fallback_rows,
            unidentified_rows: resolved.unidentified_rows,
        };

        Ok((output, stats))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
