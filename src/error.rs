use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown route: {0} (expected /, /employees, /add-employee or /update-employee/<id>)")]
    InvalidRoute(String),

    #[error("Employee form has {count} invalid field{}", if *count == 1 { "" } else { "s" })]
    InvalidForm { count: usize },

    #[error("{0}")]
    Banner(String),
}

pub type Result<T> = std::result::Result<T, EmsError>;
