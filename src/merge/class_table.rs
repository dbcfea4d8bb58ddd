//! Source `data.yaml` class-table reader.
//!
//! Each source dataset carries an Ultralytics-style `data.yaml` whose
//! `names:` key maps class indices to class names. Indices are opaque
//! keys scoped to their dataset; they are kept as strings and visited in
//! document order, never re-sorted numerically.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::error::MergeError;

/// One dataset's class table: `(raw index, raw name)` pairs in the order
/// they appear in the source document.
#[derive(Clone, Debug)]
pub struct ClassTable {
    pub entries: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct DataYaml {
    names: Mapping,
}

/// Reads the `names:` table from a source `data.yaml`.
///
/// YAML integer keys and string keys are unified to their string form,
/// so `0: cat` and `'0': cat` denote the same raw index.
pub fn read_class_table(path: &Path) -> Result<ClassTable, MergeError> {
    let data = fs::read_to_string(path).map_err(MergeError::Io)?;
    let parsed: DataYaml =
        serde_yaml::from_str(&data).map_err(|source| MergeError::ClassTableParse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut entries = Vec::with_capacity(parsed.names.len());
    for (key, value) in &parsed.names {
        let raw_index = scalar_to_string(key).ok_or_else(|| MergeError::ClassTableInvalid {
            path: path.to_path_buf(),
            message: format!("class index {:?} is not a scalar", key),
        })?;
        let raw_name = scalar_to_string(value).ok_or_else(|| MergeError::ClassTableInvalid {
            path: path.to_path_buf(),
            message: format!("class name for index '{}' is not a scalar", raw_index),
        })?;
        entries.push((raw_index, raw_name));
    }

    Ok(ClassTable { entries })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_yaml(dir: &Path, contents: &str) -> std::path::PathBuf {
        let path = dir.join("data.yaml");
        fs::write(&path, contents).expect("write data yaml");
        path
    }

    #[test]
    fn preserves_document_order() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = write_yaml(
            temp.path(),
            "names:\n  0: cat\n  1: dog\n  10: parrot\n  2: ferret\n",
        );

        let table = read_class_table(&path).expect("read class table");
        let indices: Vec<&str> = table.entries.iter().map(|(i, _)| i.as_str()).collect();

        // Document order, not numeric order.
        assert_eq!(indices, vec!["0", "1", "10", "2"]);
        assert_eq!(table.entries[2].1, "parrot");
    }

    #[test]
    fn unifies_integer_and_string_keys() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = write_yaml(temp.path(), "names:\n  '0': cat\n  1: dog\n");

        let table = read_class_table(&path).expect("read class table");
        assert_eq!(
            table.entries,
            vec![
                ("0".to_string(), "cat".to_string()),
                ("1".to_string(), "dog".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_missing_names_key() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = write_yaml(temp.path(), "nc: 3\n");

        let err = read_class_table(&path).unwrap_err();
        assert!(matches!(err, MergeError::ClassTableParse { .. }));
    }

    #[test]
    fn rejects_non_scalar_names() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = write_yaml(temp.path(), "names:\n  0:\n    - nested\n");

        let err = read_class_table(&path).unwrap_err();
        assert!(matches!(err, MergeError::ClassTableInvalid { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_class_table(Path::new("does/not/exist.yaml")).unwrap_err();
        assert!(matches!(err, MergeError::Io(_)));
    }
}
