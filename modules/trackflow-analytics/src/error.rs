use thiserror::Error;

/// Why an event fails the standard action shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Expected an object, found {0}")]
    NotAnObject(&'static str),

    #[error("Missing `type` field")]
    MissingType,

    #[error("`type` must be a non-empty string")]
    InvalidType,

    #[error("`error` must be a boolean")]
    InvalidError,

    #[error("Unexpected top-level field `{0}`")]
    UnexpectedField(String),
}
