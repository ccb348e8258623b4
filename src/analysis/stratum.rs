//! Tempo and key detection using stratum-dsp
//!
//! Runs on already-decoded mono samples so the file is decoded only once
//! per extraction.

use crate::model::MusicalKey;
use anyhow::Result;
use stratum_dsp::{analyze_audio, AnalysisConfig};

/// Tempo and key detected by stratum-dsp
#[derive(Debug, Clone)]
pub struct TempoKey {
    pub bpm: f32,
    pub bpm_confidence: f32,
    /// None when the backend reports a key we cannot map
    pub key: Option<MusicalKey>,
    pub key_confidence: f32,
}

/// Detect tempo and key, folding the BPM into `[min_bpm, max_bpm]`
pub fn detect_tempo_and_key(
    samples: &[f32],
    sample_rate: u32,
    min_bpm: f32,
    max_bpm: f32,
) -> Result<TempoKey> {
    // need at least one second of audio
    if samples.len() < sample_rate as usize {
        anyhow::bail!("Audio too short for tempo analysis");
    }

    let config = AnalysisConfig::default();
    let result = analyze_audio(samples, sample_rate, config)
        .map_err(|e| anyhow::anyhow!("Audio analysis failed: {:?}", e))?;

    if result.bpm <= 0.0 {
        anyhow::bail!("Could not detect BPM");
    }

    let bpm = fold_bpm(result.bpm, min_bpm, max_bpm);

    let key_name = result.key.name();
    let key = MusicalKey::from_name(&key_name);
    if key.is_none() {
        log::warn!("Could not map key: {}", key_name);
    }

    log::debug!(
        "Tempo/key: BPM={:.1} ({:.2}), Key={} ({:.2})",
        bpm,
        result.bpm_confidence,
        key.map(|k| k.name()).unwrap_or("unknown"),
        result.key_confidence
    );

    Ok(TempoKey {
        bpm,
        bpm_confidence: result.bpm_confidence,
        key,
        key_confidence: result.key_confidence,
    })
}

/// Double or halve a BPM until it lands inside the range, where possible
pub fn fold_bpm(bpm: f32, min_bpm: f32, max_bpm: f32) -> f32 {
    let mut bpm = bpm;
    if min_bpm > 0.0 && max_bpm > 0.0 && bpm > 0.0 {
        while bpm < min_bpm && bpm * 2.0 <= max_bpm {
            bpm *= 2.0;
        }
        while bpm > max_bpm && bpm / 2.0 >= min_bpm {
            bpm /= 2.0;
        }
    }
    bpm
}
