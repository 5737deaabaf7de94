use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameworkError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Missing dependency: {0}")]
    MissingDependency(&'static str),

    #[error("State error: {0}")]
    State(String),
}

pub type Result<T> = std::result::Result<T, FrameworkError>;
