//! Full feature extractor
//!
//! Decodes the audio once, computes signal statistics, runs tempo/key
//! detection and reads tags.

use super::decode::decode_to_mono;
use super::signal::SignalStats;
use super::stratum::detect_tempo_and_key;
use super::tags::read_tags;
use super::traits::{file_name_of, FeatureExtractor};
use crate::model::AudioRecord;
use anyhow::{Context, Result};
use std::path::Path;

/// Feature extractor that decodes audio and analyses the signal
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    /// Detected tempi below this are doubled
    min_bpm: f32,
    /// Detected tempi above this are halved
    max_bpm: f32,
    /// Whether to run tempo/key detection
    detect_tempo: bool,
    /// Stop decoding after this many seconds (None = whole file)
    max_seconds: Option<f32>,
}

impl SignalExtractor {
    pub fn new() -> Self {
        Self {
            min_bpm: 70.0,
            max_bpm: 170.0,
            detect_tempo: true,
            max_seconds: Some(120.0),
        }
    }

    /// Create extractor with custom BPM range
    pub fn with_bpm_range(mut self, min: f32, max: f32) -> Self {
        self.min_bpm = min;
        self.max_bpm = max;
        self
    }

    /// Enable or disable tempo/key detection
    pub fn with_tempo(mut self, enable: bool) -> Self {
        self.detect_tempo = enable;
        self
    }

    /// Limit how much audio is decoded per file
    pub fn with_max_seconds(mut self, max_seconds: Option<f32>) -> Self {
        self.max_seconds = max_seconds;
        self
    }
}

impl Default for SignalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor for SignalExtractor {
    fn extract(&self, audio_path: &Path) -> Result<AudioRecord> {
        log::debug!("Extracting features: {:?}", audio_path);

        let audio = decode_to_mono(audio_path, self.max_seconds)
            .with_context(|| format!("Failed to decode {:?}", audio_path))?;

        let mut record = AudioRecord::new(file_name_of(audio_path));
        record.duration_s = audio.duration_s;
        record.sample_rate = audio.sample_rate;
        record.channels = audio.channels;

        let stats = SignalStats::from_samples(&audio.samples);
        record.rms = Some(stats.rms);
        record.peak = Some(stats.peak);
        record.crest_factor = Some(stats.crest_factor);
        record.zero_crossing_rate = Some(stats.zero_crossing_rate);
        record.brightness = Some(stats.brightness);

        if self.detect_tempo {
            match detect_tempo_and_key(
                &audio.samples,
                audio.sample_rate,
                self.min_bpm,
                self.max_bpm,
            ) {
                Ok(tempo) => {
                    record.bpm = Some(tempo.bpm);
                    record.bpm_confidence = Some(tempo.bpm_confidence);
                    record.key = tempo.key;
                    record.key_confidence = tempo.key.map(|_| tempo.key_confidence);
                }
                Err(e) => {
                    log::warn!("Tempo/key detection failed for {:?}: {}", audio_path, e);
                }
            }
        }

        // Release samples before the tag read
        drop(audio);

        match read_tags(audio_path) {
            Ok(tags) => {
                record.title = tags.title;
                record.artist = tags.artist;
                record.album = tags.album;
            }
            Err(e) => {
                log::warn!("Tag read failed for {:?}: {}", audio_path, e);
            }
        }

        Ok(record)
    }

    fn name(&self) -> &'static str {
        "signal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_requires_file() {
        let result = SignalExtractor::new().extract(Path::new("/nonexistent/file.mp3"));
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_options() {
        let extractor = SignalExtractor::new()
            .with_bpm_range(80.0, 160.0)
            .with_tempo(false)
            .with_max_seconds(None);
        assert_eq!(extractor.min_bpm, 80.0);
        assert_eq!(extractor.max_bpm, 160.0);
        assert!(!extractor.detect_tempo);
        assert!(extractor.max_seconds.is_none());
    }
}
