//! Data model shared by both pipelines
//!
//! Feature records produced by audio analysis and the MFT annotation rows
//! that get joined onto them.

mod annotation;
mod key;
mod record;

pub use annotation::{MftAnnotation, ANNOTATION_ID_COLUMN, FILE_ID_COLUMN, MFT_SCORE_COLUMNS};
pub use key::MusicalKey;
pub use record::AudioRecord;
