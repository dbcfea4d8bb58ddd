//! Merged dataset artifacts: `merged-data.yaml` and `index_maps.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::unify::{ClassIndexMap, MergedClassTable};
use crate::error::MergeError;

pub const MERGED_DATA_YAML: &str = "merged-data.yaml";
pub const INDEX_MAPS_JSON: &str = "index_maps.json";

/// The merged `data.yaml` document, in the Ultralytics layout: absolute
/// dataset root, relative per-split image paths, merged class names.
#[derive(Debug, Serialize)]
struct MergedDataYaml {
    path: String,
    #[serde(flatten)]
    splits: BTreeMap<String, String>,
    names: BTreeMap<usize, String>,
}

/// Writes `merged-data.yaml` into the output root.
///
/// The root must already exist; its canonical absolute path is recorded
/// under `path` so the document works from any working directory.
pub fn write_merged_data_yaml(
    output_root: &Path,
    merged: &MergedClassTable,
    splits: &[String],
) -> Result<PathBuf, MergeError> {
    let canonical = fs::canonicalize(output_root).map_err(MergeError::Io)?;

    let doc = MergedDataYaml {
        path: canonical.to_string_lossy().into_owned(),
        splits: splits
            .iter()
            .map(|split| (split.clone(), format!("images/{}", split)))
            .collect(),
        names: merged
            .names()
            .iter()
            .enumerate()
            .map(|(index, name)| (index, name.clone()))
            .collect(),
    };

    let path = output_root.join(MERGED_DATA_YAML);
    let yaml = serde_yaml::to_string(&doc).map_err(|source| MergeError::DataYamlWrite {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, yaml).map_err(MergeError::Io)?;
    Ok(path)
}

/// Writes `index_maps.json` into the output root.
///
/// Diagnostic artifact only: records, per dataset prefix, how each raw
/// class index mapped into the merged table. Nothing reads it back.
pub fn write_index_maps(
    output_root: &Path,
    index_maps: &BTreeMap<String, ClassIndexMap>,
) -> Result<PathBuf, MergeError> {
    let path = output_root.join(INDEX_MAPS_JSON);
    let json =
        serde_json::to_string_pretty(index_maps).map_err(|source| MergeError::IndexMapWrite {
            path: path.clone(),
            source,
        })?;
    fs::write(&path, json).map_err(MergeError::Io)?;
    Ok(path)
}
