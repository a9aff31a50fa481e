use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for number filter operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// A filter expression that cannot be turned into a predicate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// No kind is registered under this name
    #[error("Unknown filter: {0:?}")]
    UnknownFilter(String),

    /// A parametric kind was given no parameter, e.g. `GT`
    #[error("Missing parameter for {0} filter")]
    MissingParameter(String),

    /// The parameter is not a base-10 signed integer
    #[error("Invalid parameter for {kind} filter: {param:?}")]
    InvalidParameter { kind: String, param: String },
}

/// Failure to load numbers from a source location
#[derive(Error, Debug)]
pub enum SourceError {
    /// The location could not be opened or read
    #[error("Failed to open file: {}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that can occur while building or running a pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The filter expression was rejected by the registry
    #[error(transparent)]
    InvalidFilter(#[from] FilterError),

    /// Builder was not given a predicate
    #[error("Cannot build pipeline without a predicate")]
    MissingPredicate,

    /// Builder was not given any sink
    #[error("Cannot build pipeline with no sinks")]
    NoSinks,

    /// A sink failed to write its output
    #[error("Sink {sink} failed: {source}")]
    Sink {
        sink: String,
        #[source]
        source: io::Error,
    },
}
