use std::path::PathBuf;
use thiserror::Error;

use crate::merge::report::MergeReport;

/// The main error type for yolomerge operations.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse merge config from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Duplicate dataset prefix '{prefix}' in merge config")]
    DuplicatePrefix { prefix: String },

    #[error("Dataset '{prefix}' has no {kind} directory configured for split '{split}'")]
    SplitNotConfigured {
        prefix: String,
        split: String,
        kind: &'static str,
    },

    #[error("Failed to parse class table from {path}: {source}")]
    ClassTableParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid class table in {path}: {message}")]
    ClassTableInvalid { path: PathBuf, message: String },

    #[error("Missing image directory for dataset '{prefix}': {path}")]
    MissingImageDir { prefix: String, path: PathBuf },

    #[error("Failed while listing images under {path}: {message}")]
    ImageListing { path: PathBuf, message: String },

    #[error("Failed to copy image {src} to {dst}: {source}")]
    ImageCopy {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write label file {path}: {source}")]
    LabelWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write merged data.yaml to {path}: {source}")]
    DataYamlWrite {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write index maps to {path}: {source}")]
    IndexMapWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Merge completed with {error_count} error(s) and {warning_count} warning(s)")]
    MergeFailed {
        error_count: usize,
        warning_count: usize,
        report: MergeReport,
    },
}
