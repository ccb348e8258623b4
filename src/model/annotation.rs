use crate::table::cell;
use serde::{Deserialize, Deserializer};

/// Column holding the 1-based annotation identifier
pub const ANNOTATION_ID_COLUMN: &str = "id";

/// Column holding the 0-based dataset row identifier
pub const FILE_ID_COLUMN: &str = "file_id";

/// The ten Moral Foundations Theory score columns, in output order
pub const MFT_SCORE_COLUMNS: [&str; 10] = [
    "care",
    "harm",
    "fairness",
    "cheating",
    "loyalty",
    "betrayal",
    "authority",
    "subversion",
    "purity",
    "degradation",
];

/// One row of the MFT annotation file
///
/// Extra columns in the file (lyrics, titles, ...) are ignored on deserialization.
/// Missing-value cells (empty, `NA`, `NaN`, `null`, ...) deserialize to `None`,
/// in the id column as well as the scores.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MftAnnotation {
    /// 1-based annotation identifier; integral floats such as `2.0` are accepted
    #[serde(deserialize_with = "key_cell")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "score_cell")]
    pub care: Option<f64>,
    #[serde(deserialize_with = "score_cell")]
    pub harm: Option<f64>,
    #[serde(deserialize_with = "score_cell")]
    pub fairness: Option<f64>,
    #[serde(deserialize_with = "score_cell")]
    pub cheating: Option<f64>,
    #[serde(deserialize_with = "score_cell")]
    pub loyalty: Option<f64>,
    #[serde(deserialize_with = "score_cell")]
    pub betrayal: Option<f64>,
    #[serde(deserialize_with = "score_cell")]
    pub authority: Option<f64>,
    #[serde(deserialize_with = "score_cell")]
    pub subversion: Option<f64>,
    #[serde(deserialize_with = "score_cell")]
    pub purity: Option<f64>,
    #[serde(deserialize_with = "score_cell")]
    pub degradation: Option<f64>,
}

fn score_cell<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let text = String::deserialize(deserializer)?;
    cell::parse_number(&text).map_err(serde::de::Error::custom)
}

fn key_cell<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let text = String::deserialize(deserializer)?;
    cell::parse_key(&text).map_err(serde::de::Error::custom)
}

impl MftAnnotation {
    /// Dataset row this annotation belongs to (`id - 1`)
    ///
    /// `None` when the id is missing or has no predecessor.
    pub fn file_id(&self) -> Option<i64> {
        self.id?.checked_sub(1)
    }

    /// Whether the `care` score is present; rows without it count as unannotated
    pub fn has_care(&self) -> bool {
        self.care.is_some_and(|c| !c.is_nan())
    }
}
