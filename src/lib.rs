//! Yolomerge: merge independently-labeled YOLO datasets.
//!
//! Yolomerge combines two or more object-detection datasets that use the
//! YOLO text-label convention into one unified dataset with a single,
//! deduplicated class index. Heterogeneous class names (numeric
//! identifier prefixes, mixed case, hyphen/underscore variants) are
//! normalized into canonical keys, every label file's class indices are
//! rewritten to the merged table, and images and labels are copied into
//! a unified tree under collision-free prefixed filenames.
//!
//! # Modules
//!
//! - [`config`]: the YAML merge configuration document
//! - [`merge`]: the merge pipeline (unification, remapping, reporting)
//! - [`error`]: error types for yolomerge operations

pub mod config;
pub mod error;
pub mod merge;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::MergeError;

/// The yolomerge CLI application.
#[derive(Parser)]
#[command(name = "yolomerge")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Merge the datasets described by a config file.
    Merge(MergeArgs),
}

/// Arguments for the merge subcommand.
#[derive(clap::Args)]
struct MergeArgs {
    /// Merge configuration file (YAML).
    config: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the run report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the yolomerge CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), MergeError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Merge(args)) => run_merge_command(args),
        None => {
            // No subcommand: just print a version banner and exit successfully
            println!("yolomerge {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Merge independently-labeled YOLO datasets.");
            println!();
            println!("Run 'yolomerge --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the merge subcommand.
fn run_merge_command(args: MergeArgs) -> Result<(), MergeError> {
    let config = config::MergeConfig::load(&args.config)?;
    let report = merge::run_merge(&config)?;

    // Output results
    match args.output.as_str() {
        "json" => {
            // Simple JSON output for programmatic use
            println!("{{");
            println!("  \"images_copied\": {},", report.images_copied);
            println!("  \"labels_written\": {},", report.labels_written);
            println!("  \"error_count\": {},", report.error_count());
            println!("  \"warning_count\": {},", report.warning_count());
            println!("  \"issues\": [");
            for (i, issue) in report.issues.iter().enumerate() {
                let comma = if i < report.issues.len() - 1 { "," } else { "" };
                println!("    {{");
                println!("      \"severity\": \"{:?}\",", issue.severity);
                println!("      \"code\": \"{:?}\",", issue.code);
                println!(
                    "      \"message\": \"{}\",",
                    issue.message.replace('"', "\\\"")
                );
                println!("      \"context\": \"{}\"", issue.context);
                println!("    }}{}", comma);
            }
            println!("  ]");
            println!("}}");
        }
        _ => {
            // Default text output
            print!("{}", report);
        }
    }

    // Determine exit status
    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(MergeError::MergeFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}
