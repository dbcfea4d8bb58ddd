//! The merge pipeline: class unification, artifact writing, label
//! remapping.
//!
//! The pipeline is strictly two-phase. Unification runs to completion
//! over every dataset in config order before any file is copied; the
//! remap phase then consumes the finished per-dataset index maps as
//! read-only input. Each (dataset, split) pair is processed
//! independently of every other.

pub mod class_table;
pub mod normalize;
pub mod output;
pub mod remap;
pub mod report;
pub mod unify;

use std::collections::BTreeMap;
use std::fs;

use crate::config::{DatasetConfig, MergeConfig};
use crate::error::MergeError;
use report::MergeReport;
use unify::{ClassIndexMap, MergedClassTable};

/// Runs the full merge described by `config`.
///
/// Fatal conditions (unreadable class table, copy/write failure) abort
/// immediately, leaving any partial output behind; a re-run regenerates
/// everything. Recoverable conditions are collected in the returned
/// report.
pub fn run_merge(config: &MergeConfig) -> Result<MergeReport, MergeError> {
    let mut merged = MergedClassTable::new();
    let mut dataset_maps: Vec<(&DatasetConfig, ClassIndexMap)> =
        Vec::with_capacity(config.datasets.len());

    for dataset in &config.datasets {
        let table = class_table::read_class_table(&dataset.data_yaml)?;
        let index_map = merged.absorb(&table);
        dataset_maps.push((dataset, index_map));
    }

    fs::create_dir_all(&config.output).map_err(MergeError::Io)?;

    let data_yaml_path = output::write_merged_data_yaml(&config.output, &merged, &config.splits)?;
    println!(
        "Merged class list ({} class(es)) saved to: {}",
        merged.len(),
        data_yaml_path.display()
    );

    let index_maps: BTreeMap<String, ClassIndexMap> = dataset_maps
        .iter()
        .map(|(dataset, map)| (dataset.prefix.clone(), map.clone()))
        .collect();
    output::write_index_maps(&config.output, &index_maps)?;

    let mut report = MergeReport::new();
    for (dataset, index_map) in &dataset_maps {
        for split in &config.splits {
            println!("Processing {}/{}", dataset.prefix, split);
            let (src_images, src_labels) = dataset.split_dirs(split)?;
            remap::remap_split(
                &dataset.prefix,
                split,
                src_images,
                src_labels,
                &config.output.join("images").join(split),
                &config.output.join("labels").join(split),
                index_map,
                &mut report,
            )?;
        }
    }

    println!(
        "All images and labels merged into '{}'",
        config.output.display()
    );
    Ok(report)
}
