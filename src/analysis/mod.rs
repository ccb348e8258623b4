//! Audio feature extraction layer
//!
//! Feature extraction sits behind the [`FeatureExtractor`] trait so the
//! dataset constructor does not care how a row is produced. Two
//! implementations exist: a tag-only reader and a full signal extractor.
//!
//! Decoding is done with symphonia, tempo and key detection with stratum-dsp,
//! and tags are read with lofty.

mod decode;
mod real;
mod signal;
mod stratum;
mod stub;
mod tags;
mod traits;

pub use decode::{decode_to_mono, DecodedAudio};
pub use real::SignalExtractor;
pub use signal::SignalStats;
pub use stratum::{detect_tempo_and_key, fold_bpm, TempoKey};
pub use stub::TagExtractor;
pub use tags::{read_tags, TagInfo};
pub use traits::FeatureExtractor;
