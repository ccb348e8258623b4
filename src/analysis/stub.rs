//! Tag-only extractor
//!
//! Skips decoding entirely: only tags and container properties are read.
//! Signal and tempo columns are left empty. Useful for a quick look at a
//! large folder.

use super::tags::read_tags;
use super::traits::{file_name_of, FeatureExtractor};
use crate::model::AudioRecord;
use anyhow::Result;
use std::path::Path;

/// Extractor that reads tags and stream properties only
pub struct TagExtractor;

impl TagExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TagExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor for TagExtractor {
    fn extract(&self, audio_path: &Path) -> Result<AudioRecord> {
        log::debug!("Tag-only extraction for: {:?}", audio_path);

        let tags = read_tags(audio_path)?;

        let mut record = AudioRecord::new(file_name_of(audio_path));
        record.title = tags.title;
        record.artist = tags.artist;
        record.album = tags.album;
        record.duration_s = tags.duration_s;
        record.sample_rate = tags.sample_rate.unwrap_or(0);
        record.channels = tags.channels.unwrap_or(0);

        Ok(record)
    }

    fn name(&self) -> &'static str {
        "tags"
    }
}
