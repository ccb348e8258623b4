//! Dataset construction and annotation merge pipelines

pub mod config;
pub mod construct;
pub mod merge;
pub mod scanner;

pub use config::{ConstructConfig, MergeConfig};
pub use construct::{DatasetConstructor, RecordSet};
pub use merge::{merge_annotations, DatasetMerger, MergeSummary};
pub use scanner::scan_audio_files;
