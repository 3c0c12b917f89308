use crate::{
    Artifact, ArtifactId, AssetContent, BusinessId, NewArtifact, PipelineError, PipelineResult,
};
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

/// Persistence boundary for artifacts.
///
/// Implementations must provide atomic single-record writes; the pipeline
/// never needs multi-record transactions. An artifact's kind is immutable,
/// so `update` replaces content within the same variant only.
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Persist a new artifact, assigning its id and timestamps.
    async fn insert(&self, artifact: NewArtifact) -> PipelineResult<Artifact>;
    /// Replace the content of an existing artifact in place.
    async fn update(&self, id: &ArtifactId, content: AssetContent) -> PipelineResult<Artifact>;
    /// Delete one artifact. Never cascades to artifacts referencing it.
    async fn delete(&self, id: &ArtifactId) -> PipelineResult<()>;
    async fn get(&self, id: &ArtifactId) -> PipelineResult<Artifact>;
    /// All artifacts of one business, ordered by creation time descending.
    async fn list_by_business(&self, business_id: &BusinessId) -> PipelineResult<Vec<Artifact>>;
}

/// In-memory reference store used by tests and demos. Records live in a
/// vec in insertion order, which doubles as the creation-time order.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Artifact>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> PipelineResult<std::sync::MutexGuard<'_, Vec<Artifact>>> {
        self.records
            .lock()
            .map_err(|_| PipelineError::Store("memory store lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl ContentStore for MemoryStore {
    async fn insert(&self, artifact: NewArtifact) -> PipelineResult<Artifact> {
        let now = Utc::now();
        let record = Artifact {
            id: ArtifactId(Uuid::new_v4().to_string()),
            business_id: artifact.business_id,
            status: artifact.status,
            content: artifact.content,
            referenced_assets: artifact.referenced_assets,
            created_at: now,
            updated_at: now,
        };
        tracing::debug!(id = %record.id, kind = %record.kind(), "inserting artifact");
        self.lock()?.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &ArtifactId, content: AssetContent) -> PipelineResult<Artifact> {
        let mut records = self.lock()?;
        let record = records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| PipelineError::NotFound(id.clone()))?;
        if record.kind() != content.kind() {
            return Err(PipelineError::Validation(format!(
                "artifact kind is immutable: cannot change {} to {}",
                record.kind(),
                content.kind()
            )));
        }
        record.content = content;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, id: &ArtifactId) -> PipelineResult<()> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|record| &record.id != id);
        if records.len() == before {
            return Err(PipelineError::NotFound(id.clone()));
        }
        Ok(())
    }

    async fn get(&self, id: &ArtifactId) -> PipelineResult<Artifact> {
        self.lock()?
            .iter()
            .find(|record| &record.id == id)
            .cloned()
            .ok_or_else(|| PipelineError::NotFound(id.clone()))
    }

    async fn list_by_business(&self, business_id: &BusinessId) -> PipelineResult<Vec<Artifact>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|record| &record.business_id == business_id)
            .rev()
            .cloned()
            .collect())
    }
}
