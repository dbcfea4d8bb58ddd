//! Image copy and label rewrite for one (dataset, split) pair.
//!
//! Every image is copied into the merged tree under a prefixed name so
//! two datasets with identically named files cannot overwrite each
//! other. The matching label file, when present, has the leading class
//! index of every line rewritten through the dataset's index map.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::report::{IssueCode, IssueContext, MergeIssue, MergeReport};
use super::unify::ClassIndexMap;
use crate::error::MergeError;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "png", "jpeg", "bmp", "webp"];
const LABEL_EXTENSION: &str = "txt";

/// Copies and rewrites one split of one dataset into the merged tree.
///
/// Images without a matching label file are still copied; the missing
/// label is recorded as a warning and no destination label file is
/// written. Label lines whose class index has no map entry keep their
/// raw index and are recorded as warnings.
#[allow(clippy::too_many_arguments)]
pub fn remap_split(
    prefix: &str,
    split: &str,
    src_images: &Path,
    src_labels: &Path,
    dst_images: &Path,
    dst_labels: &Path,
    index_map: &ClassIndexMap,
    report: &mut MergeReport,
) -> Result<(), MergeError> {
    if !src_images.is_dir() {
        return Err(MergeError::MissingImageDir {
            prefix: prefix.to_string(),
            path: src_images.to_path_buf(),
        });
    }

    fs::create_dir_all(dst_images).map_err(MergeError::Io)?;
    fs::create_dir_all(dst_labels).map_err(MergeError::Io)?;

    let mut image_files = collect_image_files(src_images)?;
    image_files.sort();

    for image_path in image_files {
        let Some(stem) = image_path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(ext) = image_path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let file_name = format!("{}.{}", stem, ext);

        let base_name = format!("{}_{}", prefix, stem);
        let dst_image = dst_images.join(format!("{}.{}", base_name, ext));
        fs::copy(&image_path, &dst_image).map_err(|source| MergeError::ImageCopy {
            src: image_path.clone(),
            dst: dst_image.clone(),
            source,
        })?;
        report.images_copied += 1;

        let label_path = src_labels.join(format!("{}.{}", stem, LABEL_EXTENSION));
        if !label_path.is_file() {
            report.add(MergeIssue::warning(
                IssueCode::MissingLabel,
                format!("no label file found for '{}', skipping label", file_name),
                IssueContext::Image {
                    prefix: prefix.to_string(),
                    split: split.to_string(),
                    file: file_name,
                },
            ));
            continue;
        }

        let content = fs::read_to_string(&label_path).map_err(MergeError::Io)?;
        let remapped = remap_label_lines(&content, index_map);

        for (line, raw_index) in &remapped.unmapped {
            report.add(MergeIssue::warning(
                IssueCode::UnmappedIndex,
                format!(
                    "class index '{}' has no merged mapping, passed through unchanged",
                    raw_index
                ),
                IssueContext::LabelLine {
                    prefix: prefix.to_string(),
                    split: split.to_string(),
                    file: file_name.clone(),
                    line: *line,
                },
            ));
        }

        let dst_label = dst_labels.join(format!("{}.{}", base_name, LABEL_EXTENSION));
        fs::write(&dst_label, remapped.content).map_err(|source| MergeError::LabelWrite {
            path: dst_label.clone(),
            source,
        })?;
        report.labels_written += 1;
    }

    Ok(())
}

/// The result of rewriting one label file's contents.
#[derive(Debug, PartialEq, Eq)]
pub struct RemappedLabels {
    /// Rewritten lines joined by `\n`, without a trailing newline.
    pub content: String,
    /// `(line number, raw index)` for every pass-through fallback.
    pub unmapped: Vec<(usize, String)>,
}

/// Rewrites the leading class index of every non-empty label line.
///
/// Lines are split on whitespace; the first field is looked up in the
/// index map and replaced by the merged index when found, kept verbatim
/// when not. Blank lines are dropped. Remaining fields pass through
/// untouched, re-joined by single spaces.
pub fn remap_label_lines(content: &str, index_map: &ClassIndexMap) -> RemappedLabels {
    let mut lines = Vec::new();
    let mut unmapped = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let Some(raw_index) = fields.next() else {
            continue;
        };

        let merged_index = match index_map.get(raw_index) {
            Some(merged) => merged.to_string(),
            None => {
                unmapped.push((line_idx + 1, raw_index.to_string()));
                raw_index.to_string()
            }
        };

        let mut rewritten = merged_index;
        for field in fields {
            rewritten.push(' ');
            rewritten.push_str(field);
        }
        lines.push(rewritten);
    }

    RemappedLabels {
        content: lines.join("\n"),
        unmapped,
    }
}

fn collect_image_files(images_dir: &Path) -> Result<Vec<PathBuf>, MergeError> {
    let mut files = Vec::new();

    // Splits are flat directories; one level is enough.
    for entry in WalkDir::new(images_dir).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|source| MergeError::ImageListing {
            path: images_dir.to_path_buf(),
            message: format!("failed while traversing directory: {source}"),
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), &IMAGE_EXTENSIONS) {
            files.push(entry.path().to_path_buf());
        }
    }

    Ok(files)
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    allowed
        .iter()
        .any(|allowed_ext| ext.eq_ignore_ascii_case(allowed_ext))
}
