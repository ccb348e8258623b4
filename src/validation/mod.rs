//! Checks on written dataset files
//!
//! Re-reads written CSV files to confirm they round-trip

mod roundtrip;

pub use roundtrip::validate_output;
