use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] cairn_core::CoreError),
    #[error(transparent)]
    Buck(#[from] cairn_buck::BuckError),
    #[error(transparent)]
    Maven(#[from] cairn_maven::MavenError),
}

pub type Result<T> = std::result::Result<T, GenError>;
