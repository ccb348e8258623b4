//! Joining MFT annotations onto a feature dataset

use super::config::MergeConfig;
use crate::model::{MftAnnotation, ANNOTATION_ID_COLUMN, FILE_ID_COLUMN, MFT_SCORE_COLUMNS};
use crate::table::{cell, read_csv, write_csv, Dataset, TableError};
use crate::validation::validate_output;
use anyhow::{Context, Result};
use csv::StringRecord;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::PathBuf;

/// Row counts from a merge run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// Rows in the feature dataset
    pub input_rows: usize,
    /// Rows written to the output
    pub merged_rows: usize,
    pub output_path: PathBuf,
}

/// Left-join annotation scores onto `dataset` by `file_id = id - 1`, then
/// drop every row without a `care` score.
///
/// `annotations` needs `id` and the ten score columns. `dataset` is keyed
/// by its `file_id` column; without one, row position is the key and a
/// `file_id` column is prepended to the output. The output has the dataset's
/// columns followed by the score columns, in dataset row order. An
/// annotation key matched by several annotation rows yields one output row
/// per match. Dataset columns that clash with a score name get an `_x`
/// suffix and the score column a `_y` suffix.
pub fn merge_annotations(dataset: &Dataset, annotations: &Dataset) -> Result<Dataset, TableError> {
    annotations.require_column(ANNOTATION_ID_COLUMN)?;
    let score_indices = MFT_SCORE_COLUMNS
        .iter()
        .map(|column| annotations.require_column(column))
        .collect::<Result<Vec<_>, _>>()?;

    let scores_by_file_id = project_scores(annotations, &score_indices)?;

    let key_index = dataset.column_index(FILE_ID_COLUMN);
    if key_index.is_none() {
        log::debug!(
            "{} has no '{}' column, keying rows by position",
            dataset.name(),
            FILE_ID_COLUMN
        );
    }

    let mut columns = Vec::with_capacity(dataset.columns().len() + MFT_SCORE_COLUMNS.len() + 1);
    if key_index.is_none() {
        columns.push(FILE_ID_COLUMN.to_string());
    }
    for column in dataset.columns() {
        if MFT_SCORE_COLUMNS.contains(&column.as_str()) {
            columns.push(format!("{}_x", column));
        } else {
            columns.push(column.clone());
        }
    }
    for column in MFT_SCORE_COLUMNS {
        if dataset.has_column(column) {
            columns.push(format!("{}_y", column));
        } else {
            columns.push(column.to_string());
        }
    }

    let mut merged = Dataset::new(columns).with_name("merged dataset");
    let mut dataset_keys = HashSet::new();

    for (position, row) in dataset.rows().iter().enumerate() {
        let key = match key_index {
            Some(index) => parse_key(dataset, position, &row[index])?,
            None => Some(position as i64),
        };
        let Some(key) = key else {
            continue;
        };
        dataset_keys.insert(key);

        let Some(matches) = scores_by_file_id.get(&key) else {
            continue;
        };
        for scores in matches {
            let mut out = Vec::with_capacity(merged.columns().len());
            if key_index.is_none() {
                out.push(key.to_string());
            }
            out.extend(row.iter().cloned());
            out.extend(scores.iter().cloned());
            merged.push_row(out)?;
        }
    }

    let unmatched = scores_by_file_id
        .keys()
        .filter(|k| !dataset_keys.contains(*k))
        .count();
    if unmatched > 0 {
        log::warn!(
            "{} annotation key(s) have no row in {} (check that annotation ids follow dataset row order)",
            unmatched,
            dataset.name()
        );
    }

    Ok(merged)
}

/// Annotation score cells grouped by derived `file_id`, in file order
///
/// Rows without a `care` score are left out: they could only produce rows
/// that get dropped after the join. So are rows whose id is missing or has
/// no `file_id`. Missing-value score cells are written back as empty cells.
fn project_scores(
    annotations: &Dataset,
    score_indices: &[usize],
) -> Result<HashMap<i64, Vec<Vec<String>>>, TableError> {
    let headers = StringRecord::from(annotations.columns().to_vec());
    let mut by_file_id: HashMap<i64, Vec<Vec<String>>> = HashMap::new();

    for (row_index, row) in annotations.rows().iter().enumerate() {
        let annotation: MftAnnotation = StringRecord::from(row.clone())
            .deserialize(Some(&headers))
            .map_err(|e| TableError::InvalidRecord {
                dataset: annotations.name().to_string(),
                row: row_index,
                message: e.to_string(),
            })?;

        if !annotation.has_care() {
            continue;
        }
        let Some(file_id) = annotation.file_id() else {
            log::debug!(
                "{} row {}: no file_id for id {:?}, skipping",
                annotations.name(),
                row_index,
                annotation.id
            );
            continue;
        };

        let scores = score_indices
            .iter()
            .map(|&i| {
                if cell::is_missing(&row[i]) {
                    String::new()
                } else {
                    row[i].clone()
                }
            })
            .collect();
        by_file_id.entry(file_id).or_default().push(scores);
    }

    Ok(by_file_id)
}

/// Parse a dataset `file_id` cell; missing-value cells are "no key"
fn parse_key(dataset: &Dataset, row: usize, value: &str) -> Result<Option<i64>, TableError> {
    cell::parse_key(value).map_err(|_| TableError::InvalidValue {
        dataset: dataset.name().to_string(),
        column: FILE_ID_COLUMN.to_string(),
        row,
        value: value.to_string(),
    })
}

/// Runs the merge over files on disk
pub struct DatasetMerger {
    config: MergeConfig,
}

impl DatasetMerger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Read both CSVs, merge, write the output and print row counts to stdout
    pub fn run(&self) -> Result<MergeSummary> {
        self.run_with_output(&mut std::io::stdout().lock())
    }

    /// Same as [`run`](Self::run), with the row counts written to `out`
    pub fn run_with_output<W: Write>(&self, out: &mut W) -> Result<MergeSummary> {
        log::info!("Loading annotations from {:?}", self.config.annotations_path);
        let annotations = read_csv(&self.config.annotations_path).with_context(|| {
            format!(
                "Failed to load annotations: {:?}",
                self.config.annotations_path
            )
        })?;

        log::info!("Loading dataset from {:?}", self.config.dataset_path);
        let dataset = read_csv(&self.config.dataset_path)
            .with_context(|| format!("Failed to load dataset: {:?}", self.config.dataset_path))?;
        writeln!(out, "dataset length = {}", dataset.len())?;

        let merged = merge_annotations(&dataset, &annotations).context("Failed to merge annotations")?;
        writeln!(out, "merged dataset length = {}", merged.len())?;

        write_csv(&merged, &self.config.output_path).with_context(|| {
            format!(
                "Failed to write merged dataset: {:?}",
                self.config.output_path
            )
        })?;
        log::info!("Merged dataset written to: {:?}", self.config.output_path);

        if self.config.validate {
            validate_output(&self.config.output_path, &merged)?;
        }

        Ok(MergeSummary {
            input_rows: dataset.len(),
            merged_rows: merged.len(),
            output_path: self.config.output_path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: &[&str], rows: &[&[&str]]) -> Dataset {
        let mut ds = Dataset::new(columns.iter().copied()).with_name("test dataset");
        for row in rows {
            ds.push_row(row.iter().map(|s| s.to_string()).collect()).unwrap();
        }
        ds
    }

    fn annotation_columns() -> Vec<&'static str> {
        let mut columns = vec!["id", "title"];
        columns.extend(MFT_SCORE_COLUMNS);
        columns
    }

    /// Annotation row with every score set to `care`
    fn annotation_row(id: &str, care: &str) -> Vec<String> {
        let mut row = vec![id.to_string(), format!("song {}", id)];
        row.extend(std::iter::repeat(care.to_string()).take(MFT_SCORE_COLUMNS.len()));
        row
    }

    fn annotations(rows: &[(&str, &str)]) -> Dataset {
        let mut ds = Dataset::new(annotation_columns()).with_name("annotations");
        for (id, care) in rows {
            ds.push_row(annotation_row(id, care)).unwrap();
        }
        ds
    }

    #[test]
    fn test_join_on_zero_based_id() {
        let data = dataset(&["file_id", "bpm"], &[&["0", "120"], &["1", "128"], &["2", "90"]]);
        let mft = annotations(&[("2", "0.5"), ("3", "0.25")]);

        let merged = merge_annotations(&data, &mft).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.column_values("file_id").unwrap(), vec!["1", "2"]);
        assert_eq!(merged.column_values("bpm").unwrap(), vec!["128", "90"]);
        assert_eq!(merged.column_values("care").unwrap(), vec!["0.5", "0.25"]);
        assert_eq!(merged.column_values("degradation").unwrap(), vec!["0.5", "0.25"]);
    }

    #[test]
    fn test_output_columns() {
        let data = dataset(&["file_id", "bpm"], &[]);
        let merged = merge_annotations(&data, &annotations(&[])).unwrap();

        let mut expected = vec!["file_id", "bpm"];
        expected.extend(MFT_SCORE_COLUMNS);
        assert_eq!(merged.columns(), expected.as_slice());
        assert!(!merged.has_column("id"));
        assert!(!merged.has_column("title"));
    }

    #[test]
    fn test_empty_annotations_give_empty_output() {
        let data = dataset(&["file_id"], &[&["0"], &["1"]]);
        let merged = merge_annotations(&data, &annotations(&[])).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_missing_care_is_dropped() {
        let data = dataset(&["file_id"], &[&["0"], &["1"], &["2"]]);
        let mft = annotations(&[("1", ""), ("2", "NaN"), ("3", "0.75")]);

        let merged = merge_annotations(&data, &mft).unwrap();
        assert_eq!(merged.column_values("file_id").unwrap(), vec!["2"]);
    }

    #[test]
    fn test_out_of_range_annotations_ignored() {
        let data = dataset(&["file_id"], &[&["0"], &["1"]]);
        let mft = annotations(&[("1", "0.1"), ("50", "0.2"), ("0", "0.3")]);

        let merged = merge_annotations(&data, &mft).unwrap();
        assert_eq!(merged.column_values("file_id").unwrap(), vec!["0"]);
    }

    #[test]
    fn test_duplicate_annotation_ids_multiply_rows() {
        let data = dataset(&["file_id"], &[&["0"], &["1"]]);
        let mft = annotations(&[("2", "0.1"), ("2", "0.2")]);

        let merged = merge_annotations(&data, &mft).unwrap();
        assert_eq!(merged.column_values("file_id").unwrap(), vec!["1", "1"]);
        assert_eq!(merged.column_values("care").unwrap(), vec!["0.1", "0.2"]);
    }

    #[test]
    fn test_dataset_order_preserved() {
        let data = dataset(&["file_id"], &[&["2"], &["0"], &["1"]]);
        let mft = annotations(&[("1", "0.1"), ("2", "0.2"), ("3", "0.3")]);

        let merged = merge_annotations(&data, &mft).unwrap();
        assert_eq!(merged.column_values("file_id").unwrap(), vec!["2", "0", "1"]);
        assert_eq!(merged.column_values("care").unwrap(), vec!["0.3", "0.1", "0.2"]);
    }

    #[test]
    fn test_position_used_without_file_id_column() {
        let data = dataset(&["title"], &[&["a"], &["b"], &["c"]]);
        let mft = annotations(&[("3", "0.9")]);

        let merged = merge_annotations(&data, &mft).unwrap();
        assert_eq!(merged.columns()[0], "file_id");
        assert_eq!(merged.rows(), &[{
            let mut row = vec!["2".to_string(), "c".to_string()];
            row.extend(std::iter::repeat("0.9".to_string()).take(10));
            row
        }]);
    }

    #[test]
    fn test_float_file_ids_accepted() {
        let data = dataset(&["file_id"], &[&["0.0"], &["1.0"], &[""]]);
        let mft = annotations(&[("2", "0.4")]);

        let merged = merge_annotations(&data, &mft).unwrap();
        assert_eq!(merged.column_values("file_id").unwrap(), vec!["1.0"]);
    }

    #[test]
    fn test_clashing_columns_suffixed() {
        let data = dataset(&["file_id", "care"], &[&["0", "old"]]);
        let mft = annotations(&[("1", "0.5")]);

        let merged = merge_annotations(&data, &mft).unwrap();
        assert_eq!(merged.columns()[1], "care_x");
        assert_eq!(merged.columns()[2], "care_y");
        assert_eq!(merged.column_values("care_x").unwrap(), vec!["old"]);
        assert_eq!(merged.column_values("care_y").unwrap(), vec!["0.5"]);
    }

    #[test]
    fn test_missing_score_column_is_error() {
        let data = dataset(&["file_id"], &[&["0"]]);
        let mft = dataset(&["id", "care", "harm"], &[&["1", "0.1", "0.2"]]);

        let err = merge_annotations(&data, &mft).unwrap_err();
        match err {
            TableError::MissingColumn { column, .. } => assert_eq!(column, "fairness"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_id_column_is_error() {
        let data = dataset(&["file_id"], &[&["0"]]);
        let mut columns = vec!["song_id"];
        columns.extend(MFT_SCORE_COLUMNS);
        let mft = dataset(&columns, &[]);

        let err = merge_annotations(&data, &mft).unwrap_err();
        assert!(matches!(err, TableError::MissingColumn { ref column, .. } if column == "id"));
    }

    #[test]
    fn test_invalid_file_id_is_error() {
        let data = dataset(&["file_id"], &[&["zero"]]);
        let err = merge_annotations(&data, &annotations(&[("1", "0.1")])).unwrap_err();
        assert!(matches!(err, TableError::InvalidValue { row: 0, .. }));
    }

    #[test]
    fn test_missing_tokens_in_care_are_dropped() {
        let data = dataset(&["file_id"], &[&["0"], &["1"], &["2"], &["3"], &["4"], &["5"]]);
        let mft = annotations(&[
            ("1", "NA"),
            ("2", "N/A"),
            ("3", "null"),
            ("4", "None"),
            ("5", "#N/A"),
            ("6", "<NA>"),
        ]);

        let merged = merge_annotations(&data, &mft).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_missing_tokens_in_other_scores_become_empty() {
        let data = dataset(&["file_id"], &[&["0"]]);
        let mut mft = Dataset::new(annotation_columns()).with_name("annotations");
        let mut row = annotation_row("1", "0.5");
        row[3] = "NA".to_string(); // harm
        row[11] = "null".to_string(); // degradation
        mft.push_row(row).unwrap();

        let merged = merge_annotations(&data, &mft).unwrap();
        assert_eq!(merged.column_values("care").unwrap(), vec!["0.5"]);
        assert_eq!(merged.column_values("harm").unwrap(), vec![""]);
        assert_eq!(merged.column_values("degradation").unwrap(), vec![""]);
    }

    #[test]
    fn test_float_annotation_ids_accepted() {
        let data = dataset(&["file_id"], &[&["0"], &["1"], &["2"]]);
        let mft = annotations(&[("2.0", "0.5"), ("3.0", "0.25")]);

        let merged = merge_annotations(&data, &mft).unwrap();
        assert_eq!(merged.column_values("file_id").unwrap(), vec!["1", "2"]);
    }

    #[test]
    fn test_blank_annotation_id_is_skipped() {
        let data = dataset(&["file_id"], &[&["0"], &["1"]]);
        let mft = annotations(&[("", "0.5"), ("NaN", "0.6"), ("2", "0.7")]);

        let merged = merge_annotations(&data, &mft).unwrap();
        assert_eq!(merged.column_values("file_id").unwrap(), vec!["1"]);
        assert_eq!(merged.column_values("care").unwrap(), vec!["0.7"]);
    }

    #[test]
    fn test_minimum_annotation_id_is_skipped() {
        let data = dataset(&["file_id"], &[&["0"]]);
        let mft = annotations(&[("-9223372036854775808", "0.5"), ("1", "0.7")]);

        let merged = merge_annotations(&data, &mft).unwrap();
        assert_eq!(merged.column_values("care").unwrap(), vec!["0.7"]);
    }

    #[test]
    fn test_invalid_annotation_id_is_error() {
        let data = dataset(&["file_id"], &[&["0"]]);
        let err = merge_annotations(&data, &annotations(&[("one", "0.1")])).unwrap_err();
        assert!(matches!(err, TableError::InvalidRecord { row: 0, .. }));
    }

    #[test]
    fn test_non_numeric_score_is_error() {
        let data = dataset(&["file_id"], &[&["0"]]);
        let err = merge_annotations(&data, &annotations(&[("1", "high")])).unwrap_err();
        assert!(err.to_string().contains("annotations"));
    }
}
