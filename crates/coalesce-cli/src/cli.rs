//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Coalesce: clean, deduplicate and merge a contact export
#[derive(Parser)]
#[command(name = "coalesce")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the merged contact export (TSV)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output path for the cleaned table (default: <input stem>_cleaned.tsv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the run report as JSON instead of the summary
    #[arg(long)]
    pub json: bool,

    /// Collapse rows with no identity (no email, name or mobile) into a
    /// single contact instead of keeping each as its own row
    #[arg(long)]
    pub merge_unidentified: bool,

    /// Enable verbose output (per-column null counts)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the output path, defaulting next to the input.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = self
                .input
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy();
            self.input.with_file_name(format!("{stem}_cleaned.tsv"))
        })
    }
}
