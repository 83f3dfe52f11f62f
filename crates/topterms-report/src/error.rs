use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read report input: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write NDJSON output: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to serialize output row: {0}")]
    Serialize(#[from] serde_json::Error),
}
