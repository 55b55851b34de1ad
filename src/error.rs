use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Missing required field '{field}' on {record}")]
    MissingField { record: &'static str, field: &'static str },

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid trend window size {0}: must be at least 1 month")]
    InvalidWindowSize(usize),

    #[error("Invalid label precision {0}: must be between 0 and 10 decimal places")]
    InvalidLabelDecimals(u32),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
