use waygate_core::RoomKey;
use thiserror::Error;

pub type AppResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The actor's location is not part of the world
    #[error("no current room")]
    NoCurrentRoom,

    /// A room that an exit points to does not exist
    #[error("unknown room: {0}")]
    UnknownRoom(RoomKey),

    #[error("Not found")]
    NotFound,

    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    #[error("validation failed: {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Error)]
pub enum ConfigErrorKind {
    #[error("failed to read file: {0}")]
    Read(std::io::Error),

    #[error("failed to parse file: {0}")]
    Parse(toml::de::Error),

    #[error("messages.{0} needs at least one message pair")]
    EmptyMessages(&'static str),

    #[error("invalid environment variable {0}: {1}")]
    InvalidEnv(String, String),
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: std::path::PathBuf,
        #[source]
        source: ConfigErrorKind,
    },

    #[error("invalid environment: {0}")]
    Env(ConfigErrorKind),
}
