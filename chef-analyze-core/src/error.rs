use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChefAnalyzeError {
    #[error("unable to detect current directory")]
    CurrentDirectory(#[source] std::io::Error),

    #[error("unable to detect home directory")]
    HomeDirectory,

    #[error("invalid config file name '{0}': must be a plain relative path")]
    InvalidFileName(String),

    /// `searched` holds every candidate that was probed, in order.
    #[error("file '{name}' not found")]
    ConfigNotFound { name: String, searched: Vec<PathBuf> },

    #[error("unable to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, ChefAnalyzeError>;
