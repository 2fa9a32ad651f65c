use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to read fixture file at {path}: {source}")]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixture {origin}: {source}")]
    FixtureParse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("fixture references unknown server {server}")]
    FixtureUnknownServer { server: String },
    #[error("unable to resolve storage path: {details}")]
    StoragePathResolution { details: String },
    #[error("failed to create directory {path}: {source}")]
    StorageDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to initialize logging: {0}")]
    LoggingInit(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
