use thiserror::Error;

/// A single row failed schema validation.
///
/// Not a variant of [`ExportError`]: a rejected row is dropped and counted
/// by the engine, never propagated as a failure of the export.
#[derive(Error, Debug)]
#[error("row rejected: {reason}")]
pub struct RowValidationError {
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cursor read failed: {message}")]
    CursorRead { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, ExportError>;
