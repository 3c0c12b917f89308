use crate::{
    normalize_personas, normalize_statements, prompt, resolve, Artifact, ArtifactId, AssetContent,
    AssetKind, AssetStatus, BrandscriptAnswers, BusinessId, BusinessInfoAnswers, ContentStore,
    NewArtifact, PipelineError, PipelineResult,
};
use brandkit_gen::TextGenerator;
use std::sync::Arc;

/// Drives one create/update action end to end: resolve dependencies,
/// assemble the prompt, call the generator (at most once), normalize the
/// response, and persist the resulting artifact.
///
/// Holds no per-action state, so one instance can serve concurrent actions
/// across businesses; the store is the only shared state. Any failure
/// aborts the action before the write — no artifact is ever persisted
/// half-built.
pub struct Pipeline {
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn ContentStore>,
}

impl Pipeline {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<dyn ContentStore>) -> Self {
        Self { generator, store }
    }

    /// Generate and store a brandscript from the eight-question form.
    /// Generation is mandatory and blocking; the narrative is stored
    /// verbatim.
    pub async fn create_brandscript(
        &self,
        business_id: BusinessId,
        answers: BrandscriptAnswers,
    ) -> PipelineResult<Artifact> {
        prompt::validate_brandscript_answers(&answers)?;
        let request = prompt::brandscript_request(&answers);
        let narrative = self.generator.generate(request).await?;

        self.store
            .insert(NewArtifact {
                business_id,
                status: AssetStatus::Complete,
                content: AssetContent::Brandscript { answers, narrative },
                referenced_assets: Vec::new(),
            })
            .await
    }

    /// Store business facts directly. There is no generation step: the
    /// answers are the content.
    pub async fn create_business_info(
        &self,
        business_id: BusinessId,
        answers: BusinessInfoAnswers,
    ) -> PipelineResult<Artifact> {
        prompt::validate_business_info_answers(&answers)?;

        self.store
            .insert(NewArtifact {
                business_id,
                status: AssetStatus::Complete,
                content: AssetContent::BusinessInfo { answers },
                referenced_assets: Vec::new(),
            })
            .await
    }

    /// Generate customer personas from a selected brandscript and optional
    /// business info, normalizing the response into structured records at
    /// write time.
    pub async fn create_customer_personas(
        &self,
        business_id: BusinessId,
        selected: Vec<ArtifactId>,
    ) -> PipelineResult<Artifact> {
        let pool = self.store.list_by_business(&business_id).await?;
        let deps = resolve(AssetKind::CustomerPersonas, &selected, &pool)?;
        let narrative = deps
            .narrative()
            .ok_or(PipelineError::MissingDependency(AssetKind::Brandscript))?;

        let request = prompt::personas_request(narrative, deps.business_info());
        let raw = self.generator.generate(request).await?;
        let personas = normalize_personas(&raw);
        if personas.is_empty() {
            tracing::warn!(business_id = %business_id, "persona text had no recognizable structure");
        }

        let referenced_assets = deps.reference_ids(AssetKind::CustomerPersonas);
        self.store
            .insert(NewArtifact {
                business_id,
                status: AssetStatus::Complete,
                content: AssetContent::CustomerPersonas { personas, raw },
                referenced_assets,
            })
            .await
    }

    /// Generate problem statements from a selected brandscript and optional
    /// personas. An empty normalized list is still stored; callers treat a
    /// zero-length result as "no usable statements", not as an error.
    pub async fn create_problem_statements(
        &self,
        business_id: BusinessId,
        selected: Vec<ArtifactId>,
    ) -> PipelineResult<Artifact> {
        let pool = self.store.list_by_business(&business_id).await?;
        let deps = resolve(AssetKind::ProblemStatements, &selected, &pool)?;
        let narrative = deps
            .narrative()
            .ok_or(PipelineError::MissingDependency(AssetKind::Brandscript))?;

        let request = prompt::statements_request(narrative, deps.personas_raw().unwrap_or(""));
        let raw = self.generator.generate(request).await?;
        let statements = normalize_statements(&raw);

        let referenced_assets = deps.reference_ids(AssetKind::ProblemStatements);
        self.store
            .insert(NewArtifact {
                business_id,
                status: AssetStatus::Complete,
                content: AssetContent::ProblemStatements { statements },
                referenced_assets,
            })
            .await
    }

    /// Re-generate a brandscript from edited answers, overwriting its
    /// content in place. The id and `referenced_assets` are unchanged.
    pub async fn update_brandscript(
        &self,
        id: &ArtifactId,
        answers: BrandscriptAnswers,
    ) -> PipelineResult<Artifact> {
        prompt::validate_brandscript_answers(&answers)?;
        let existing = self.store.get(id).await?;
        if existing.kind() != AssetKind::Brandscript {
            return Err(PipelineError::Validation(format!(
                "artifact {id} is a {}, expected brandscript",
                existing.kind()
            )));
        }

        let request = prompt::brandscript_request(&answers);
        let narrative = self.generator.generate(request).await?;
        self.store
            .update(id, AssetContent::Brandscript { answers, narrative })
            .await
    }

    /// Overwrite business-info answers in place. Never calls the generator
    /// and touches no other artifact.
    pub async fn update_business_info(
        &self,
        id: &ArtifactId,
        answers: BusinessInfoAnswers,
    ) -> PipelineResult<Artifact> {
        prompt::validate_business_info_answers(&answers)?;
        let existing = self.store.get(id).await?;
        if existing.kind() != AssetKind::BusinessInfo {
            return Err(PipelineError::Validation(format!(
                "artifact {id} is a {}, expected business_info",
                existing.kind()
            )));
        }

        self.store
            .update(id, AssetContent::BusinessInfo { answers })
            .await
    }

    /// Delete one artifact. Dependents referencing it keep their ids;
    /// [`crate::dangling_references`] flags them.
    pub async fn delete_artifact(&self, id: &ArtifactId) -> PipelineResult<()> {
        self.store.delete(id).await
    }

    pub async fn get_artifact(&self, id: &ArtifactId) -> PipelineResult<Artifact> {
        self.store.get(id).await
    }

    /// All artifacts of one business, newest first.
    pub async fn list_artifacts(&self, business_id: &BusinessId) -> PipelineResult<Vec<Artifact>> {
        self.store.list_by_business(business_id).await
    }
}
