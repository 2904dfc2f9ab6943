use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("response is not ok: {0}")]
    Status(StatusCode),
    #[error("no product at position {0}")]
    NoSuchProduct(usize),
    #[error("no product is being edited")]
    NoOpenForm,
    #[error("invalid command: {0}")]
    Command(String),
}
