use crate::{ArtifactId, AssetKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required answer field was left empty, or an operation targeted an
    /// artifact of the wrong kind. Raised before any external call.
    #[error("Validation error: {0}")]
    Validation(String),
    /// A required reference kind was not among the selected artifacts.
    #[error("Missing required dependency: {0}")]
    MissingDependency(AssetKind),
    /// A selected artifact does not exist for this business or cannot be
    /// referenced by the target kind.
    #[error("Dependency mismatch: {0}")]
    DependencyMismatch(String),
    /// The external generation service failed or returned no content.
    /// Surfaced verbatim; nothing is retried and nothing is persisted.
    #[error("Generation error: {0}")]
    Generation(#[from] brandkit_gen::GeneratorError),
    #[error("Artifact not found: {0}")]
    NotFound(ArtifactId),
    #[error("Store error: {0}")]
    Store(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
