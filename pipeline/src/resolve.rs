use crate::{
    registry::roles, spec_for, Artifact, ArtifactId, AssetContent, AssetKind, BusinessInfoAnswers,
    PipelineError, PipelineResult,
};
use std::collections::HashMap;

/// The prior artifacts picked for one generation, keyed by reference role.
#[derive(Debug, Default)]
pub struct ResolvedDependencies<'a> {
    by_role: HashMap<&'static str, &'a Artifact>,
}

impl<'a> ResolvedDependencies<'a> {
    #[must_use]
    pub fn get(&self, role: &str) -> Option<&'a Artifact> {
        self.by_role.get(role).copied()
    }

    /// Narrative of the resolved brandscript, if one was selected.
    #[must_use]
    pub fn narrative(&self) -> Option<&'a str> {
        match self.get(roles::BRANDSCRIPT).map(|a| &a.content) {
            Some(AssetContent::Brandscript { narrative, .. }) => Some(narrative),
            _ => None,
        }
    }

    /// Answers of the resolved business-info artifact, if one was selected.
    #[must_use]
    pub fn business_info(&self) -> Option<&'a BusinessInfoAnswers> {
        match self.get(roles::BUSINESS_INFO).map(|a| &a.content) {
            Some(AssetContent::BusinessInfo { answers }) => Some(answers),
            _ => None,
        }
    }

    /// Raw persona text of the resolved personas artifact, if one was
    /// selected.
    #[must_use]
    pub fn personas_raw(&self) -> Option<&'a str> {
        match self.get(roles::PERSONAS).map(|a| &a.content) {
            Some(AssetContent::CustomerPersonas { raw, .. }) => Some(raw),
            _ => None,
        }
    }

    /// Ids of the resolved references, in the registry's declared order for
    /// `kind`. This is the `referenced_assets` value of the new artifact.
    #[must_use]
    pub fn reference_ids(&self, kind: AssetKind) -> Vec<ArtifactId> {
        spec_for(kind)
            .references
            .iter()
            .filter_map(|reference| self.by_role.get(reference.role).map(|a| a.id.clone()))
            .collect()
    }
}

/// Select the prior artifacts a new `kind` artifact will be generated from.
///
/// `selected` is scanned in caller order and the first artifact of each
/// allowed reference kind wins; the resolver never infers "most recent" on
/// its own. `pool` is the full set of the owning business's artifacts, so a
/// selected id belonging to another business is simply not found and fails
/// the same way an unknown id does. All failures happen here, before the
/// generator is ever involved.
pub fn resolve<'a>(
    kind: AssetKind,
    selected: &[ArtifactId],
    pool: &'a [Artifact],
) -> PipelineResult<ResolvedDependencies<'a>> {
    let spec = spec_for(kind);

    let mut chosen: Vec<&Artifact> = Vec::with_capacity(selected.len());
    for id in selected {
        let artifact = pool.iter().find(|a| &a.id == id).ok_or_else(|| {
            PipelineError::DependencyMismatch(format!(
                "selected artifact {id} does not exist for this business"
            ))
        })?;
        if !spec
            .references
            .iter()
            .any(|reference| reference.kind == artifact.kind())
        {
            return Err(PipelineError::DependencyMismatch(format!(
                "artifact {id} of kind {} cannot be referenced by {kind}",
                artifact.kind()
            )));
        }
        chosen.push(artifact);
    }

    let mut by_role = HashMap::new();
    for reference in spec.references {
        match chosen.iter().find(|a| a.kind() == reference.kind) {
            Some(artifact) => {
                by_role.insert(reference.role, *artifact);
            }
            None if reference.required => {
                return Err(PipelineError::MissingDependency(reference.kind));
            }
            None => {}
        }
    }

    Ok(ResolvedDependencies { by_role })
}

/// Ids in `artifact.referenced_assets` that no longer resolve within `pool`.
///
/// Deletion never cascades or blocks, so a derived artifact can outlive what
/// it was generated from; callers use this to flag stale references in
/// listings instead of treating them as errors.
#[must_use]
pub fn dangling_references(artifact: &Artifact, pool: &[Artifact]) -> Vec<ArtifactId> {
    artifact
        .referenced_assets
        .iter()
        .filter(|id| !pool.iter().any(|a| &a.id == *id))
        .cloned()
        .collect()
}
