use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Registration error: {0}")]
    Registration(String),
}

pub type Result<T> = std::result::Result<T, Error>;
