use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the provider failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returned a non-OK status code.
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The provider answered successfully but without any usable text.
    #[error("No content returned by {0}")]
    NoContent(&'static str),
    /// The response from the provider was unexpected (e.g. no choices
    /// returned in a completion).
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
