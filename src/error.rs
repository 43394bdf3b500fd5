//! Crate-level error type

use crate::config::ConfigError;
use crate::rdf::ParseError;
use crate::source::SourceError;
use thiserror::Error;

/// Errors surfaced by the ontology engine
#[derive(Error, Debug)]
pub enum SoliError {
    /// The document could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// No class answers to the given key
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected argument (zero limit, empty query, unknown category)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The document source failed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Configuration could not be loaded or is inconsistent
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No collision-free IRI was found
    #[error("Failed to generate a unique IRI after {0} attempts")]
    IriExhausted(usize),
}

pub type SoliResult<T> = Result<T, SoliError>;
