use thiserror::Error;

/// Failures while materializing the reference score table.
#[derive(Error, Debug)]
pub enum ResourceLoadError {
    #[error("score table not found: {0}")]
    NotFound(String),

    #[error("score table unreadable: {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("score table malformed: {0}")]
    Malformed(String),

    #[error("score table has no rows: {0}")]
    Empty(String),
}

#[derive(Error, Debug)]
pub enum SuscoinError {
    #[error(transparent)]
    ResourceLoad(#[from] ResourceLoadError),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("trip file malformed: {0}")]
    TripFile(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SuscoinError>;
