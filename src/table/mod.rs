//! Tabular datasets
//!
//! An in-memory table of string cells plus CSV reading and writing.

pub mod cell;
mod csv_io;
mod dataset;
mod error;

pub use csv_io::{read_csv, write_csv};
pub use dataset::Dataset;
pub use error::TableError;
