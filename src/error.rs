use reqwest::StatusCode;
use thiserror::Error;

/// A record failed the data collector field-type allow-list.
///
/// The allowed field types are text, boolean, double, UTC timestamp and
/// GUID. Anything else in a record aborts its whole batch before any
/// network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("record type '{record_type}' must serialize to a JSON object, got {found}")]
    NotAnObject {
        record_type: &'static str,
        found: &'static str,
    },
    #[error(
        "field '{field}' of record type '{record_type}' has unsupported type {found}; \
         valid field types are String, Boolean, Double, DateTime and Guid"
    )]
    UnsupportedField {
        record_type: &'static str,
        field: String,
        found: &'static str,
    },
    #[error("record type '{record_type}' could not be serialized: {message}")]
    Unserializable {
        record_type: &'static str,
        message: String,
    },
}

/// Error surface of a single submission attempt.
///
/// Argument and schema failures are detected locally and never reach the
/// network; transport failures keep the underlying cause. There is no
/// retry, so every variant propagates straight to the caller.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("log ingestion request failed")]
    Transport(#[source] reqwest::Error),
    #[error("log ingestion endpoint returned status {status} body_sample={body_sample}")]
    Status {
        status: StatusCode,
        body_sample: String,
    },
}
