use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("build tool error: {0}")]
    Buck(#[from] cairn_buck::BuckError),
    #[error("maven error: {0}")]
    Maven(#[from] cairn_maven::MavenError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
