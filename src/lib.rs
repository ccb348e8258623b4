//! MFT Dataset - audio feature datasets joined with moral-foundation scores
//!
//! This library builds a feature dataset from a folder of audio files and
//! enriches a feature dataset with Moral Foundations Theory annotation
//! scores, keyed by row position.

pub mod analysis;
pub mod model;
pub mod pipeline;
pub mod table;
pub mod validation;

pub use pipeline::config::{ConstructConfig, MergeConfig};
pub use pipeline::construct::DatasetConstructor;
pub use pipeline::merge::{merge_annotations, DatasetMerger};
pub use table::Dataset;
