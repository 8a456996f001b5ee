use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuckError {
    #[error("malformed target specifier '{0}'")]
    MalformedTarget(String),
    #[error("failed to run `{command}`: {source}")]
    Exec {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with status {status}")]
    ExitStatus { command: String, status: i32 },
    #[error("unreadable query output: {0}")]
    Output(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BuckError>;
