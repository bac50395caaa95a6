use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column `{0}` not found in header")]
    MissingColumn(&'static str),
}

/// Conditions that leave a search without a report. Both are shown to the
/// user as warnings, not failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("at least one commercial type must be selected")]
    NoCommercialType,
    #[error("no insertions match the selected filters")]
    NoData,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}
