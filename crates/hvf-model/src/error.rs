use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid export layout: {0}")]
    Layout(#[from] serde_json::Error),
    #[error("export layout field '{field}' must not be empty")]
    EmptyLayoutField { field: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
