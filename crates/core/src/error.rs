use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelpError {
    #[error("invalid base content: {0}")]
    BaseContent(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HelpError>;
