//! Run report types for structured warning reporting.
//!
//! A merge run never aborts on recoverable conditions (a missing label
//! file, a label line referencing an unmapped class index); it records
//! them here so they can be displayed, filtered, or escalated in strict
//! mode.

use std::fmt;

/// The result of a merge run.
///
/// Contains every recoverable issue found during the run, plus work
/// counters for the progress summary.
#[derive(Clone, Debug, Default)]
pub struct MergeReport {
    /// All issues found during the run.
    pub issues: Vec<MergeIssue>,

    /// Number of image files copied into the merged tree.
    pub images_copied: usize,

    /// Number of label files rewritten into the merged tree.
    pub labels_written: usize,
}

impl MergeReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: MergeIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Merged {} image(s) and {} label file(s)",
            self.images_copied, self.labels_written
        )?;

        if self.issues.is_empty() {
            return writeln!(f, "Merge completed: no issues found");
        }

        writeln!(
            f,
            "Merge completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single merge issue (error or warning).
#[derive(Clone, Debug)]
pub struct MergeIssue {
    /// The severity of the issue.
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    /// A human-readable description of the issue.
    pub message: String,

    /// Context about where the issue occurred.
    pub context: IssueContext,
}

impl MergeIssue {
    /// Creates a new merge issue.
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    /// Creates a new error.
    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    /// Creates a new warning.
    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for MergeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of a merge issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// A warning that doesn't stop the run but may indicate problems.
    Warning,
    /// An error that indicates corrupt or inconsistent source data.
    Error,
}

/// A stable code identifying the type of merge issue.
///
/// These codes can be used for filtering, ignoring specific issues,
/// or programmatic handling of run results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// An image has no matching label file; the image was copied but no
    /// destination label file was written.
    MissingLabel,
    /// A label line references a class index with no entry in the
    /// dataset's index map; the raw index was passed through unchanged.
    UnmappedIndex,
}

/// Context about where a merge issue occurred.
#[derive(Clone, Debug)]
pub enum IssueContext {
    /// Issue with a specific image file of a (dataset, split) pair.
    Image {
        prefix: String,
        split: String,
        file: String,
    },
    /// Issue with a specific line of a label file.
    LabelLine {
        prefix: String,
        split: String,
        file: String,
        line: usize,
    },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Image {
                prefix,
                split,
                file,
            } => write!(f, "{}/{} image '{}'", prefix, split, file),
            IssueContext::LabelLine {
                prefix,
                split,
                file,
                line,
            } => write!(f, "{}/{} label '{}' line {}", prefix, split, file, line),
        }
    }
}
