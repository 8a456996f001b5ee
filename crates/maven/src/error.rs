use thiserror::Error;

#[derive(Error, Debug)]
pub enum MavenError {
    #[error("cannot parse maven coords '{0}'")]
    Coords(String),
    #[error("checksum fetch failed for {uri}: {source}")]
    Checksum {
        uri: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("lockfile '{0}' is not found, restore it or regenerate with `cairn uplock`")]
    MissingLockfile(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MavenError>;
