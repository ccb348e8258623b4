//! Time-domain signal statistics over mono samples

/// Summary statistics for a mono signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalStats {
    pub rms: f32,
    pub peak: f32,
    pub crest_factor: f32,
    pub zero_crossing_rate: f32,
    pub brightness: f32,
}

impl SignalStats {
    pub fn from_samples(samples: &[f32]) -> Self {
        let rms = rms(samples);
        let peak = peak(samples);
        Self {
            rms,
            peak,
            crest_factor: crest_factor(peak, rms),
            zero_crossing_rate: zero_crossing_rate(samples),
            brightness: brightness(samples),
        }
    }
}

/// Root mean square level
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_squares / samples.len() as f64).sqrt() as f32
}

/// Largest absolute sample
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
}

/// Peak to RMS ratio; 0 for silence
pub fn crest_factor(peak: f32, rms: f32) -> f32 {
    if rms <= f32::EPSILON {
        0.0
    } else {
        peak / rms
    }
}

/// Fraction of adjacent sample pairs that change sign
pub fn zero_crossing_rate(samples: &[f32]) -> f32 {
    if samples.len() < 2 {
        return 0.0;
    }

    let crossings = samples
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count();

    crossings as f32 / (samples.len() - 1) as f32
}

/// Energy of the first difference relative to signal energy
///
/// Rises with high-frequency content. For a pure sine of frequency f at
/// sample rate sr it approaches 4 sin^2(pi f / sr).
pub fn brightness(samples: &[f32]) -> f32 {
    if samples.len() < 2 {
        return 0.0;
    }

    let mut diff_energy = 0.0f64;
    let mut total_energy = 0.0f64;
    for w in samples.windows(2) {
        let diff = (w[1] - w[0]) as f64;
        diff_energy += diff * diff;
        total_energy += (w[1] as f64) * (w[1] as f64);
    }

    if total_energy == 0.0 {
        return 0.0;
    }
    (diff_energy / total_energy) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: u32, seconds: f32) -> Vec<f32> {
        let n = (sample_rate as f32 * seconds) as usize;
        (0..n)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_silence() {
        let stats = SignalStats::from_samples(&vec![0.0; 1000]);
        assert_eq!(stats.rms, 0.0);
        assert_eq!(stats.peak, 0.0);
        assert_eq!(stats.crest_factor, 0.0);
        assert_eq!(stats.zero_crossing_rate, 0.0);
        assert_eq!(stats.brightness, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let stats = SignalStats::from_samples(&[]);
        assert_eq!(stats.rms, 0.0);
        assert_eq!(stats.zero_crossing_rate, 0.0);
    }

    #[test]
    fn test_sine_levels() {
        let samples = sine(440.0, 44100, 1.0);
        let stats = SignalStats::from_samples(&samples);

        assert!((stats.rms - std::f32::consts::FRAC_1_SQRT_2).abs() < 0.01);
        assert!((stats.peak - 1.0).abs() < 0.01);
        assert!((stats.crest_factor - std::f32::consts::SQRT_2).abs() < 0.02);
    }

    #[test]
    fn test_zero_crossing_rate_tracks_frequency() {
        let low = zero_crossing_rate(&sine(100.0, 8000, 1.0));
        let high = zero_crossing_rate(&sine(1000.0, 8000, 1.0));

        // two crossings per period
        assert!((low - 200.0 / 8000.0).abs() < 0.002);
        assert!(high > low * 5.0);
    }

    #[test]
    fn test_brightness_tracks_frequency() {
        let low = brightness(&sine(100.0, 8000, 1.0));
        let high = brightness(&sine(2000.0, 8000, 1.0));
        assert!(high > low);

        // 4 sin^2(pi/4) = 2
        assert!((high - 2.0).abs() < 0.05);
    }
}
