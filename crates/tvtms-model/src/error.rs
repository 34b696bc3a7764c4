use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid book id: {0:?}")]
    InvalidBookId(String),
    #[error("invalid tradition name: {0:?}")]
    InvalidTradition(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
