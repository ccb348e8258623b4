//! Audio decoding to mono f32 samples using symphonia

use anyhow::{Context, Result};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decoded audio, downmixed to mono
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Mono samples (channel average)
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    /// Channel count of the source stream
    pub channels: u16,
    /// Duration of the whole file, even when decoding stopped early
    pub duration_s: f64,
}

/// Decode an audio file to mono f32 samples
///
/// Decoding stops after `max_seconds` of audio when a limit is given.
/// The reported duration comes from the container when it knows the frame
/// count, otherwise from the number of decoded samples.
pub fn decode_to_mono(path: &Path, max_seconds: Option<f32>) -> Result<DecodedAudio> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open audio file: {:?}", path))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension() {
        hint.with_extension(ext.to_str().unwrap_or(""));
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .with_context(|| format!("Failed to probe audio format: {:?}", path))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .with_context(|| format!("No audio track found in {:?}", path))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("No sample rate in audio track")?;
    let n_frames = track.codec_params.n_frames;
    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(0);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create audio decoder")?;

    let mut mono: Vec<f32> = Vec::new();
    let sample_limit = max_seconds.map(|s| (sample_rate as f32 * s) as usize);

    while sample_limit.map_or(true, |limit| mono.len() < limit) {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(e) => {
                log::warn!("Stopped reading {:?} early: {}", path, e);
                break;
            }
        };
        if packet.track_id() != track_id {
            continue;
        }

        let block = match decoder.decode(&packet) {
            Ok(block) => block,
            Err(SymphoniaError::DecodeError(e)) => {
                log::debug!("Skipping corrupt packet in {:?}: {}", path, e);
                continue;
            }
            Err(e) => {
                log::warn!("Stopped decoding {:?} early: {}", path, e);
                break;
            }
        };

        let spec = *block.spec();
        channels = spec.channels.count() as u16;
        let mut interleaved = SampleBuffer::<f32>::new(block.capacity() as u64, spec);
        interleaved.copy_interleaved_ref(block);
        downmix_into(&mut mono, interleaved.samples(), channels as usize);
    }

    if mono.is_empty() {
        anyhow::bail!("No audio samples decoded from {:?}", path);
    }

    let duration_s = match n_frames {
        Some(frames) if frames > 0 => frames as f64 / sample_rate as f64,
        _ => mono.len() as f64 / sample_rate as f64,
    };

    log::debug!(
        "Decoded {} samples ({:.1}s of {:.1}s) at {}Hz from {:?}",
        mono.len(),
        mono.len() as f32 / sample_rate as f32,
        duration_s,
        sample_rate,
        path
    );

    Ok(DecodedAudio {
        samples: mono,
        sample_rate,
        channels,
        duration_s,
    })
}

/// Append the channel average of each interleaved frame to `mono`
fn downmix_into(mono: &mut Vec<f32>, interleaved: &[f32], channels: usize) {
    if channels <= 1 {
        mono.extend_from_slice(interleaved);
        return;
    }
    mono.extend(
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_averages_frames() {
        let mut mono = vec![1.0];
        downmix_into(&mut mono, &[0.5, -0.5, 1.0, 0.0], 2);
        assert_eq!(mono, vec![1.0, 0.0, 0.5]);

        downmix_into(&mut mono, &[0.25], 1);
        assert_eq!(mono.len(), 4);
    }

    #[test]
    fn test_decode_requires_file() {
        let result = decode_to_mono(Path::new("/nonexistent/file.mp3"), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_non_audio() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("notes.mp3");
        std::fs::write(&path, b"not really audio").unwrap();
        assert!(decode_to_mono(&path, Some(10.0)).is_err());
    }
}
