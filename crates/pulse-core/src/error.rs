// File: crates/pulse-core/src/error.rs
// Summary: Library error type. Rendering never fails; errors come from input construction and validation.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("invalid color `{0}`: expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),
    #[error("duplicate id `{0}` in chart dataset")]
    DuplicateId(String),
    #[error("failed to write {path}: {message}")]
    Io { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, ChartError>;
