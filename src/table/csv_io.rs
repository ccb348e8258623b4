//! CSV reading and writing for datasets

use super::{Dataset, TableError};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read a CSV file with a header row into a dataset
pub fn read_csv(path: &Path) -> Result<Dataset, TableError> {
    log::debug!("Reading CSV: {:?}", path);

    let file = File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(String::from)
        .collect();

    let mut dataset = Dataset::new(columns).with_name(path.display().to_string());

    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        dataset.push_row(record.iter().map(String::from).collect())?;
    }

    log::debug!(
        "Read {} rows x {} columns from {:?}",
        dataset.len(),
        dataset.columns().len(),
        path
    );
    Ok(dataset)
}

/// Write a dataset as CSV: header row, one line per row, no index column
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<(), TableError> {
    let file = File::create(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    writer.write_record(dataset.columns()).map_err(csv_err)?;
    for row in dataset.rows() {
        writer.write_record(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Wrote {} rows to {:?}", dataset.len(), path);
    Ok(())
}
