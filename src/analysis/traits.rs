//! Feature extractor trait

use crate::model::AudioRecord;
use anyhow::Result;
use std::path::Path;

/// Feature extractor trait - allows swapping between tag-only and full signal analysis
///
/// Implementations must be shareable across threads; the dataset constructor
/// extracts files in parallel.
pub trait FeatureExtractor: Send + Sync {
    /// Extract one dataset row from an audio file
    fn extract(&self, audio_path: &Path) -> Result<AudioRecord>;

    /// Short name used in log output
    fn name(&self) -> &'static str;
}

/// File name component of a path, used as the record's `file_name`
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
