use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque store-assigned artifact identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactId(pub String);

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArtifactId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Reference to the business that owns an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessId(pub String);

impl fmt::Display for BusinessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BusinessId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Brandscript,
    BusinessInfo,
    CustomerPersonas,
    ProblemStatements,
}

impl AssetKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brandscript => "brandscript",
            Self::BusinessInfo => "business_info",
            Self::CustomerPersonas => "customer_personas",
            Self::ProblemStatements => "problem_statements",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Draft` exists in the data model but the pipeline currently stores every
/// successfully created artifact as `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Draft,
    Complete,
}

/// The eight-question form a brandscript is generated from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandscriptAnswers {
    pub company_name: String,
    pub products_services: String,
    pub target_audience: String,
    pub main_problem: String,
    pub solution: String,
    pub differentiation: String,
    pub authority: String,
    pub steps: String,
}

impl BrandscriptAnswers {
    /// Field name/value pairs in form order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("company_name", &self.company_name),
            ("products_services", &self.products_services),
            ("target_audience", &self.target_audience),
            ("main_problem", &self.main_problem),
            ("solution", &self.solution),
            ("differentiation", &self.differentiation),
            ("authority", &self.authority),
            ("steps", &self.steps),
        ]
    }
}

/// The seven-question business facts form. Stored as-is, never generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessInfoAnswers {
    pub services: String,
    pub excluded_services: String,
    pub locations: String,
    pub excluded_locations: String,
    pub priority_service: String,
    pub phone_number: String,
    pub address: String,
}

impl BusinessInfoAnswers {
    /// Field name/value pairs in form order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("services", &self.services),
            ("excluded_services", &self.excluded_services),
            ("locations", &self.locations),
            ("excluded_locations", &self.excluded_locations),
            ("priority_service", &self.priority_service),
            ("phone_number", &self.phone_number),
            ("address", &self.address),
        ]
    }
}

/// One named section of a normalized persona, e.g. "Pain Points &
/// Frustrations" with its bullet points in generator order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaSection {
    pub title: String,
    pub points: Vec<String>,
}

/// A customer persona normalized at write time from the generator's
/// markdown prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub sections: Vec<PersonaSection>,
}

/// Content of one artifact. The variant is the artifact's kind, so each
/// kind's required shape is enforced by the type system rather than by
/// runtime checks in callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssetContent {
    Brandscript {
        answers: BrandscriptAnswers,
        /// Generator output, stored verbatim.
        narrative: String,
    },
    BusinessInfo {
        answers: BusinessInfoAnswers,
    },
    CustomerPersonas {
        personas: Vec<Persona>,
        /// Generator output, retained verbatim alongside the normalized
        /// records.
        raw: String,
    },
    ProblemStatements {
        statements: Vec<String>,
    },
}

impl AssetContent {
    #[must_use]
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Brandscript { .. } => AssetKind::Brandscript,
            Self::BusinessInfo { .. } => AssetKind::BusinessInfo,
            Self::CustomerPersonas { .. } => AssetKind::CustomerPersonas,
            Self::ProblemStatements { .. } => AssetKind::ProblemStatements,
        }
    }
}

/// One stored marketing artifact owned by a business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: ArtifactId,
    pub business_id: BusinessId,
    pub status: AssetStatus,
    pub content: AssetContent,
    /// Ids of the artifacts this one was derived from, in registry order.
    /// Empty for brandscript and business info.
    pub referenced_assets: Vec<ArtifactId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Artifact {
    #[must_use]
    pub fn kind(&self) -> AssetKind {
        self.content.kind()
    }
}

/// Store-insert payload. The id and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewArtifact {
    pub business_id: BusinessId,
    pub status: AssetStatus,
    pub content: AssetContent,
    pub referenced_assets: Vec<ArtifactId>,
}
