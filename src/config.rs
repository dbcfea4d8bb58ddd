//! Merge configuration document.
//!
//! A merge run is driven entirely by a YAML config file: an ordered list
//! of source datasets (each with a class table and per-split image/label
//! directories) plus the destination root. Dataset order matters — it
//! fixes merged-index assignment — so datasets are a sequence, not a
//! mapping.
//!
//! ```yaml
//! output: dataset
//! datasets:
//!   - prefix: pets
//!     data_yaml: yolo-pets/data.yaml
//!     images:
//!       train: yolo-pets/images/train
//!       val: yolo-pets/images/val
//!     labels:
//!       train: yolo-pets/labels/train
//!       val: yolo-pets/labels/val
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MergeError;

fn default_splits() -> Vec<String> {
    vec!["train".to_string(), "val".to_string()]
}

/// Top-level merge configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeConfig {
    /// Destination root for the merged dataset tree.
    pub output: PathBuf,

    /// Datasets to merge, in merge order.
    pub datasets: Vec<DatasetConfig>,

    /// Split names, processed in listed order.
    #[serde(default = "default_splits")]
    pub splits: Vec<String>,
}

/// One source dataset.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Destination filename prefix; also the dataset's key in
    /// `index_maps.json`. Must be unique across datasets.
    pub prefix: String,

    /// Path to the dataset's `data.yaml` class table.
    pub data_yaml: PathBuf,

    /// Per-split image directories.
    pub images: BTreeMap<String, PathBuf>,

    /// Per-split label directories.
    pub labels: BTreeMap<String, PathBuf>,
}

impl MergeConfig {
    /// Loads a config file, resolving every relative path against the
    /// config file's parent directory.
    pub fn load(path: &Path) -> Result<Self, MergeError> {
        let data = fs::read_to_string(path).map_err(MergeError::Io)?;
        let mut config: MergeConfig =
            serde_yaml::from_str(&data).map_err(|source| MergeError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_relative_to(base);
        config.check_prefixes()?;
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        resolve(&mut self.output, base);
        for dataset in &mut self.datasets {
            resolve(&mut dataset.data_yaml, base);
            for dir in dataset.images.values_mut() {
                resolve(dir, base);
            }
            for dir in dataset.labels.values_mut() {
                resolve(dir, base);
            }
        }
    }

    fn check_prefixes(&self) -> Result<(), MergeError> {
        let mut seen = BTreeSet::new();
        for dataset in &self.datasets {
            if !seen.insert(dataset.prefix.as_str()) {
                return Err(MergeError::DuplicatePrefix {
                    prefix: dataset.prefix.clone(),
                });
            }
        }
        Ok(())
    }
}

impl DatasetConfig {
    /// Returns the (image dir, label dir) pair for a split.
    pub fn split_dirs(&self, split: &str) -> Result<(&Path, &Path), MergeError> {
        let images = self
            .images
            .get(split)
            .ok_or_else(|| MergeError::SplitNotConfigured {
                prefix: self.prefix.clone(),
                split: split.to_string(),
                kind: "image",
            })?;
        let labels = self
            .labels
            .get(split)
            .ok_or_else(|| MergeError::SplitNotConfigured {
                prefix: self.prefix.clone(),
                split: split.to_string(),
                kind: "label",
            })?;
        Ok((images.as_path(), labels.as_path()))
    }
}

fn resolve(path: &mut PathBuf, base: &Path) {
    if path.is_relative() {
        let joined = base.join(&*path);
        *path = joined;
    }
}
