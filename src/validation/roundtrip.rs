//! Round-trip validation of written datasets

use crate::table::{read_csv, Dataset};
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a written CSV by reading it back and comparing with `expected`
///
/// # Arguments
/// * `path` - CSV file that was just written
/// * `expected` - The dataset that was written to it
///
/// # Returns
/// Ok(()) if header and every cell match, Err naming the first difference otherwise
pub fn validate_output(path: &Path, expected: &Dataset) -> Result<()> {
    log::info!("Validating output at: {:?}", path);

    let actual =
        read_csv(path).with_context(|| format!("Failed to re-read output: {:?}", path))?;

    if actual.columns() != expected.columns() {
        log::error!("❌ Column mismatch in {:?}", path);
        anyhow::bail!(
            "Output columns differ: wrote [{}], read back [{}]",
            expected.columns().join(", "),
            actual.columns().join(", ")
        );
    }

    if actual.len() != expected.len() {
        log::error!("❌ Row count mismatch in {:?}", path);
        anyhow::bail!(
            "Output row count differs: wrote {}, read back {}",
            expected.len(),
            actual.len()
        );
    }

    for (row, (want, got)) in expected.rows().iter().zip(actual.rows()).enumerate() {
        if let Some(col) = (0..want.len()).find(|&c| want[c] != got[c]) {
            log::error!("❌ Cell mismatch in {:?}", path);
            anyhow::bail!(
                "Output differs at row {}, column '{}': wrote {:?}, read back {:?}",
                row,
                expected.columns()[col],
                want[col],
                got[col]
            );
        }
    }

    log::info!(
        "✅ Output validated: {} rows x {} columns",
        actual.len(),
        actual.columns().len()
    );
    Ok(())
}
