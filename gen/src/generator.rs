use crate::GeneratorResult;

/// One fully assembled request to the text-generation service: a system
/// role describing the expertise to adopt, plus the user prompt carrying
/// the interpolated business context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system: String,
    pub prompt: String,
}

/// The opaque "structured context in, free-form text out" service the
/// pipeline generates artifacts with.
///
/// A call is blocking for the triggering action and is made at most once
/// per action; implementations are expected to bound the round trip with
/// a timeout rather than retry.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    fn provider(&self) -> &'static str;
    /// Produce free-form text for the given request.
    ///
    /// Returns an error when the service fails or returns an empty
    /// payload; the caller never receives partial output.
    async fn generate(&self, request: GenerationRequest) -> GeneratorResult<String>;
}
