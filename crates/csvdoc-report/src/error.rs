use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The template refers to a property the data does not have.
    #[error("template references property '{property}' which is not in the data")]
    PropertyNotInData { property: String },

    #[error("failed to write report: {message}")]
    Write { message: String },
}

pub(crate) fn write_error(err: impl Display) -> RenderError {
    RenderError::Write {
        message: err.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
