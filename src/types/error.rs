use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
