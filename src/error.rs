use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("json parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
