//! Dataset construction from a folder of audio files

use super::config::ConstructConfig;
use super::scanner::{record_id, scan_audio_files};
use crate::analysis::FeatureExtractor;
use crate::model::{AudioRecord, FILE_ID_COLUMN};
use crate::table::{write_csv, Dataset};
use anyhow::{Context, Result};
use rayon::prelude::*;

/// Record identifier → features, in dataset order
pub type RecordSet = Vec<(String, AudioRecord)>;

/// Builds a feature dataset from an audio folder
pub struct DatasetConstructor<E: FeatureExtractor> {
    config: ConstructConfig,
    extractor: E,
}

impl<E: FeatureExtractor> DatasetConstructor<E> {
    pub fn new(config: ConstructConfig, extractor: E) -> Self {
        Self { config, extractor }
    }

    /// Extract one record per audio file in the configured folder
    ///
    /// Files are processed in parallel; the result keeps scan order.
    pub fn extract_from_folder(&self) -> Result<RecordSet> {
        let root = &self.config.audio_dir;
        log::info!(
            "Extracting features from {:?} ({} extractor)",
            root,
            self.extractor.name()
        );

        let files = scan_audio_files(&self.config)?;
        if files.is_empty() {
            log::warn!("No audio files found in {:?}", root);
            return Ok(Vec::new());
        }
        log::info!("Found {} audio files", files.len());

        let results: Vec<_> = files
            .par_iter()
            .map(|path| (path, self.extractor.extract(path)))
            .collect();

        let mut records = Vec::with_capacity(results.len());
        let mut skipped = 0usize;
        for (path, result) in results {
            match result {
                Ok(record) => records.push((record_id(root, path), record)),
                Err(e) if self.config.skip_unreadable => {
                    log::warn!("Skipping {:?}: {:#}", path, e);
                    skipped += 1;
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to extract features from {:?}", path));
                }
            }
        }

        if skipped > 0 {
            log::warn!("{} file(s) skipped", skipped);
        }
        log::info!("Extracted {} records", records.len());
        Ok(records)
    }

    /// Convert records to a dataset: `file_id` followed by the feature columns
    ///
    /// `file_id` is the record's 0-based position.
    pub fn dict_to_dataset(records: &RecordSet) -> Result<Dataset> {
        let columns = std::iter::once(FILE_ID_COLUMN).chain(AudioRecord::COLUMNS);
        let mut dataset = Dataset::new(columns).with_name("audio feature dataset");

        for (file_id, (_, record)) in records.iter().enumerate() {
            let mut row = Vec::with_capacity(AudioRecord::COLUMNS.len() + 1);
            row.push(file_id.to_string());
            row.extend(record.values());
            dataset.push_row(row)?;
        }

        Ok(dataset)
    }

    /// Extract, convert, print a preview and optionally write the CSV
    pub fn run(&self) -> Result<Dataset> {
        let records = self.extract_from_folder()?;
        let dataset = Self::dict_to_dataset(&records)?;

        println!("{}", dataset.head(self.config.preview_rows));

        if let Some(ref output) = self.config.output {
            write_csv(&dataset, output)
                .with_context(|| format!("Failed to write dataset to {:?}", output))?;
            log::info!("Dataset written to: {:?} ({} rows)", output, dataset.len());
        }

        Ok(dataset)
    }
}
