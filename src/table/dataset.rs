use super::TableError;
use std::fmt;

/// Widest cell shown by the text preview before truncation
const PREVIEW_CELL_WIDTH: usize = 24;

/// Rectangular dataset: a header plus rows of string cells
///
/// Cells are kept as text so values written back out are byte-identical to
/// what was read. A row's position (0-based) is its implicit identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Where the data came from, used in error messages
    name: String,

    columns: Vec<String>,

    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Create an empty dataset with the given columns
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: "dataset".to_string(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Set the name used to identify this dataset in errors
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row; it must have exactly one cell per column
    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                dataset: self.name.clone(),
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of a column that must exist
    pub fn require_column(&self, name: &str) -> Result<usize, TableError> {
        self.column_index(name)
            .ok_or_else(|| TableError::MissingColumn {
                dataset: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// All cells of one column, in row order
    pub fn column_values(&self, name: &str) -> Result<Vec<&str>, TableError> {
        let index = self.require_column(name)?;
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// First `n` rows as a new dataset
    pub fn head(&self, n: usize) -> Dataset {
        Dataset {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= PREVIEW_CELL_WIDTH {
        cell.to_string()
    } else {
        let mut short: String = cell.chars().take(PREVIEW_CELL_WIDTH - 3).collect();
        short.push_str("...");
        short
    }
}

/// Aligned text preview with a leading row-index column
impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(
                f,
                "Empty dataset\nColumns: [{}]\nIndex: []",
                self.columns.join(", ")
            );
        }

        let header: Vec<String> = self.columns.iter().map(|c| truncate(c)).collect();
        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|c| truncate(c)).collect())
            .collect();

        let index_width = (self.rows.len() - 1).to_string().len();
        let widths: Vec<usize> = header
            .iter()
            .enumerate()
            .map(|(i, h)| {
                body.iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:>width$}", "", width = index_width)?;
        for (h, w) in header.iter().zip(&widths) {
            write!(f, "  {:>width$}", h, width = *w)?;
        }

        for (i, row) in body.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{:<width$}", i, width = index_width)?;
            for (cell, w) in row.iter().zip(&widths) {
                write!(f, "  {:>width$}", cell, width = *w)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut ds = Dataset::new(["file_id", "title"]).with_name("sample.csv");
        ds.push_row(vec!["0".into(), "First".into()]).unwrap();
        ds.push_row(vec!["1".into(), "Second".into()]).unwrap();
        ds.push_row(vec!["2".into(), "Third".into()]).unwrap();
        ds
    }

    #[test]
    fn test_push_row_rejects_wrong_width() {
        let mut ds = sample();
        let err = ds.push_row(vec!["3".into()]).unwrap_err();
        assert!(matches!(
            err,
            TableError::RowWidth { row: 3, expected: 2, actual: 1, .. }
        ));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_require_column_names_dataset() {
        let ds = sample();
        assert_eq!(ds.require_column("title").unwrap(), 1);

        let err = ds.require_column("care").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("care"));
        assert!(message.contains("sample.csv"));
    }

    #[test]
    fn test_head_and_column_values() {
        let ds = sample();
        let head = ds.head(2);
        assert_eq!(head.len(), 2);
        assert_eq!(head.columns(), ds.columns());
        assert_eq!(ds.column_values("title").unwrap(), vec!["First", "Second", "Third"]);
        assert_eq!(ds.head(10).len(), 3);
    }

    #[test]
    fn test_preview_layout() {
        let preview = sample().head(2).to_string();
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("file_id"));
        assert!(lines[1].starts_with('0'));
        assert!(lines[2].ends_with("Second"));
    }

    #[test]
    fn test_preview_truncates_long_cells() {
        let mut ds = Dataset::new(["lyrics"]);
        ds.push_row(vec!["x".repeat(100)]).unwrap();
        let preview = ds.to_string();
        assert!(preview.contains("..."));
        assert!(!preview.contains(&"x".repeat(30)));
    }

    #[test]
    fn test_empty_preview() {
        let ds = Dataset::new(["a", "b"]);
        assert!(ds.is_empty());
        assert!(ds.to_string().starts_with("Empty dataset"));
    }
}
