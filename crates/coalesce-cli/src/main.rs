//! Coalesce CLI - contact cleaning and deduplication pipeline.

mod cli;

use clap::Parser;
use colored::Colorize;

use coalesce::{Pipeline, PipelineConfig, RunReport, UnidentifiedPolicy};

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let output = cli.output_path();

    let config = PipelineConfig {
        unidentified: if cli.merge_unidentified {
            UnidentifiedPolicy::MergeAll
        } else {
            UnidentifiedPolicy::Separate
        },
        ..Default::default()
    };

    if !cli.json {
        println!(
            "{} {}",
            "Cleaning".cyan().bold(),
            cli.input.display().to_string().white()
        );
    }

    let report = Pipeline::with_config(config).run(&cli.input, &output)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&report, cli.verbose);
    println!(
        "{} {}",
        "Wrote".green().bold(),
        output.display().to_string().white()
    );

    Ok(())
}

fn print_summary(report: &RunReport, verbose: bool) {
    let stats = &report.stats;

    println!(
        "Read {} rows, wrote {} contacts ({} duplicates merged)",
        stats.rows_in.to_string().white().bold(),
        stats.contacts_out.to_string().white().bold(),
        stats.duplicates_merged.to_string().yellow()
    );
    println!(
        "Identity: {} by email, {} by name/mobile, {} unidentified",
        stats.primary_key_rows.to_string().white(),
        stats.fallback_key_rows.to_string().white(),
        stats.unidentified_rows.to_string().yellow()
    );

    let total_nulled: usize = stats.nulled_by_column.values().sum();
    println!(
        "Normalization nulled {} invalid values",
        total_nulled.to_string().yellow()
    );

    if verbose && !stats.nulled_by_column.is_empty() {
        println!();
        println!("{}", "Nulled by column:".yellow().bold());
        for (column, count) in &stats.nulled_by_column {
            println!("  {:24} {}", column, count);
        }
    }
}
