//! Pipeline configuration

use std::path::PathBuf;

/// Default annotation file read by the merge pipeline
pub const DEFAULT_ANNOTATIONS_FILE: &str = "Billboard_songs_with_lyrucs_MFT_values.csv";

/// Default feature dataset read by the merge pipeline
pub const DEFAULT_DATASET_FILE: &str = "dataset.csv";

/// Default merged output
pub const DEFAULT_OUTPUT_FILE: &str = "dataset_billboard_MFT.csv";

/// File extensions picked up when scanning an audio folder
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "m4a", "aac"];

/// Configuration for building a dataset from a folder of audio files
#[derive(Debug, Clone)]
pub struct ConstructConfig {
    /// Folder containing the audio files
    pub audio_dir: PathBuf,

    /// Descend into subfolders
    pub recursive: bool,

    /// Lowercase extensions to include
    pub extensions: Vec<String>,

    /// Log and omit files that fail extraction instead of aborting
    pub skip_unreadable: bool,

    /// Write the dataset here when set
    pub output: Option<PathBuf>,

    /// Number of rows in the printed preview
    pub preview_rows: usize,
}

impl ConstructConfig {
    /// Create a new construction configuration
    pub fn new(audio_dir: PathBuf) -> Self {
        Self {
            audio_dir,
            recursive: true,
            extensions: AUDIO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            skip_unreadable: false,
            output: None,
            preview_rows: 5,
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Replace the accepted extension list
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    pub fn with_skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    /// Write the built dataset to a CSV file
    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }
}

/// Configuration for joining MFT annotations onto a feature dataset
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// CSV with `id` and the ten MFT score columns
    pub annotations_path: PathBuf,

    /// CSV with `file_id` (or rows in file order)
    pub dataset_path: PathBuf,

    /// Merged CSV output
    pub output_path: PathBuf,

    /// Re-read the output after writing and compare it with what was written
    pub validate: bool,
}

impl MergeConfig {
    /// Create a merge configuration with explicit paths
    pub fn new(annotations_path: PathBuf, dataset_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            annotations_path,
            dataset_path,
            output_path,
            validate: true,
        }
    }

    pub fn with_annotations(mut self, path: PathBuf) -> Self {
        self.annotations_path = path;
        self
    }

    pub fn with_dataset(mut self, path: PathBuf) -> Self {
        self.dataset_path = path;
        self
    }

    pub fn with_output(mut self, path: PathBuf) -> Self {
        self.output_path = path;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

/// The hard-coded file names, relative to the working directory
impl Default for MergeConfig {
    fn default() -> Self {
        Self::new(
            PathBuf::from(DEFAULT_ANNOTATIONS_FILE),
            PathBuf::from(DEFAULT_DATASET_FILE),
            PathBuf::from(DEFAULT_OUTPUT_FILE),
        )
    }
}
