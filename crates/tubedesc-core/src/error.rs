use thiserror::Error;

#[derive(Error, Debug)]
pub enum TubedescError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation service error: {0}")]
    Service(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TubedescError>;
