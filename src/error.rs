use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("malformed source: {0}")]
    MalformedSource(String),

    #[error("IO error")]
    IoFailure(#[from] std::io::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(error: serde_json::Error) -> Self {
        ReportError::MalformedSource(error.to_string())
    }
}
