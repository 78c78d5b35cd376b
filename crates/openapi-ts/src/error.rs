//! Error type shared by the generator pipeline.

use std::path::PathBuf;

/// Errors that can occur while generating types.
///
/// The type builder itself never fails on malformed schemas; these variants
/// cover configuration, document acquisition, and output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read config file {}: {message}", .path.display())]
    ConfigFile { path: PathBuf, message: String },

    #[error("failed to parse OpenAPI document: {0}")]
    Parse(String),

    #[error("invalid OpenAPI document: {0}")]
    Validation(String),

    #[error("invalid primitive type: {0}. Valid types: {valid}", valid = crate::ast::PrimitiveKind::NAMES.join(", "))]
    InvalidPrimitive(String),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
