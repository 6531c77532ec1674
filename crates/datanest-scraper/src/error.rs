use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("scratch copy I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row is missing column {index}")]
    MissingColumn { index: usize },

    #[error("unparseable {field}: {reason}")]
    Field { field: &'static str, reason: String },
}

impl ScraperError {
    /// Row-level parse problems are absorbed by the orchestrator (the row is
    /// skipped and the run continues); everything else is run-fatal.
    #[must_use]
    pub fn is_row_level(&self) -> bool {
        matches!(self, Self::MissingColumn { .. } | Self::Field { .. })
    }
}
