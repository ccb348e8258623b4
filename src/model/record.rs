use super::MusicalKey;

/// Feature values extracted from a single audio file (one dataset row)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioRecord {
    /// File name including extension
    pub file_name: String,

    /// Title tag (optional)
    pub title: Option<String>,

    /// Artist tag (optional)
    pub artist: Option<String>,

    /// Album tag (optional)
    pub album: Option<String>,

    /// Duration in seconds
    pub duration_s: f64,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels in the source file
    pub channels: u16,

    /// RMS level of the mono mix
    pub rms: Option<f32>,

    /// Absolute peak sample of the mono mix
    pub peak: Option<f32>,

    /// Peak / RMS ratio
    pub crest_factor: Option<f32>,

    /// Sign changes per sample
    pub zero_crossing_rate: Option<f32>,

    /// First-difference energy over total energy, a cheap spectral centroid proxy
    pub brightness: Option<f32>,

    /// Detected tempo
    pub bpm: Option<f32>,

    /// Tempo detection confidence (0.0-1.0)
    pub bpm_confidence: Option<f32>,

    /// Detected musical key
    pub key: Option<MusicalKey>,

    /// Key detection confidence (0.0-1.0)
    pub key_confidence: Option<f32>,
}

impl AudioRecord {
    /// Column names in the order produced by [`AudioRecord::values`]
    pub const COLUMNS: [&'static str; 17] = [
        "file_name",
        "title",
        "artist",
        "album",
        "duration_s",
        "sample_rate",
        "channels",
        "rms",
        "peak",
        "crest_factor",
        "zero_crossing_rate",
        "brightness",
        "bpm",
        "bpm_confidence",
        "key",
        "camelot",
        "key_confidence",
    ];

    /// Create an empty record for a file
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Render the record as dataset cells; missing values become empty cells
    pub fn values(&self) -> Vec<String> {
        vec![
            self.file_name.clone(),
            text(&self.title),
            text(&self.artist),
            text(&self.album),
            self.duration_s.to_string(),
            self.sample_rate.to_string(),
            self.channels.to_string(),
            number(self.rms),
            number(self.peak),
            number(self.crest_factor),
            number(self.zero_crossing_rate),
            number(self.brightness),
            number(self.bpm),
            number(self.bpm_confidence),
            self.key.map(|k| k.name().to_string()).unwrap_or_default(),
            self.key.map(|k| k.camelot().to_string()).unwrap_or_default(),
            number(self.key_confidence),
        ]
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn number(value: Option<f32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_match_columns() {
        let record = AudioRecord::new("001.mp3");
        assert_eq!(record.values().len(), AudioRecord::COLUMNS.len());
    }

    #[test]
    fn test_missing_values_are_empty_cells() {
        let mut record = AudioRecord::new("song.wav");
        record.duration_s = 2.5;
        record.sample_rate = 44100;
        record.channels = 2;
        record.bpm = Some(128.0);
        record.key = Some(MusicalKey::AMinor);

        let values = record.values();
        assert_eq!(values[0], "song.wav");
        assert_eq!(values[1], "");
        assert_eq!(values[4], "2.5");
        assert_eq!(values[5], "44100");
        assert_eq!(values[7], "");
        assert_eq!(values[12], "128");
        assert_eq!(values[14], "A Minor");
        assert_eq!(values[15], "8A");
        assert_eq!(values[16], "");
    }
}
