use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for environment variable {var}")]
    EnvOverride { var: String, value: String },

    #[error("'persistence_filepath' is required when 'persistence' is set to true")]
    MissingPersistenceFilepath,

    #[error("'api_token' must not be empty")]
    EmptyToken,

    #[error("Invalid api_url {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("Invalid settings for command {command:?}: {source}")]
    CommandSettings {
        command: String,
        #[source]
        source: toml::de::Error,
    },
}
