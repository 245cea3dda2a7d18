use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandoffError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Navigation error: {0}")]
    Navigation(String),
    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HandoffError>;
