use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrustGraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed row at line {line}: expected at least 5 fields, found {fields}")]
    MalformedRow { line: u64, fields: usize },
}

pub type Result<T> = std::result::Result<T, TrustGraphError>;
