//! Tag and container property reading using lofty

use anyhow::{Context, Result};
use lofty::prelude::*;
use std::path::Path;

/// Tag text plus stream properties reported by the container
#[derive(Debug, Clone, Default)]
pub struct TagInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration_s: f64,
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
}

/// Read title/artist/album and stream properties without decoding audio
pub fn read_tags(path: &Path) -> Result<TagInfo> {
    let tagged_file = lofty::read_from_path(path)
        .with_context(|| format!("Failed to read tags: {:?}", path))?;

    let properties = tagged_file.properties();
    let mut info = TagInfo {
        duration_s: properties.duration().as_secs_f64(),
        sample_rate: properties.sample_rate(),
        channels: properties.channels().map(u16::from),
        ..TagInfo::default()
    };

    if let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
        info.title = non_empty(tag.title().map(|s| s.to_string()));
        info.artist = non_empty(tag.artist().map(|s| s.to_string()));
        info.album = non_empty(tag.album().map(|s| s.to_string()));
    }

    Ok(info)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_require_file() {
        assert!(read_tags(Path::new("/nonexistent/file.flac")).is_err());
    }

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty(Some("  Song ".into())), Some("Song".into()));
        assert_eq!(non_empty(Some("   ".into())), None);
        assert_eq!(non_empty(None), None);
    }
}
