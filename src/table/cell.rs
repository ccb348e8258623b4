//! Interpreting individual cells as numbers or missing values

/// Cell texts read as "no value" (the default NA set of pandas' `read_csv`)
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a cell holds one of the missing-value tokens
pub fn is_missing(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell.trim())
}

/// Parse a numeric cell; missing tokens give `None`
pub fn parse_number(cell: &str) -> Result<Option<f64>, String> {
    if is_missing(cell) {
        return Ok(None);
    }
    match cell.trim().parse::<f64>() {
        Ok(value) if value.is_nan() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(format!("'{}' is not a number", cell)),
    }
}

/// Parse an integer key cell
///
/// Integral floats ("3.0") are accepted since a column with any blank cell
/// is often written out as floats. Missing tokens give `None`.
pub fn parse_key(cell: &str) -> Result<Option<i64>, String> {
    if is_missing(cell) {
        return Ok(None);
    }
    let trimmed = cell.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(Some(value));
    }
    match parse_number(trimmed)? {
        None => Ok(None),
        Some(value)
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
        {
            Ok(Some(value as i64))
        }
        Some(_) => Err(format!("'{}' is not an integer", cell)),
    }
}
