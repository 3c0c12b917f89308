mod errors;
mod normalize;
mod pipeline;
mod prompt;
mod registry;
mod resolve;
mod store;
mod types;

pub use errors::{PipelineError, PipelineResult};
pub use normalize::{normalize_personas, normalize_statements};
pub use pipeline::Pipeline;
pub use prompt::{
    brandscript_request, personas_request, statements_request, validate_brandscript_answers,
    validate_business_info_answers,
};
pub use registry::{roles, spec_for, ReferenceSpec, TypeSpec};
pub use resolve::{dangling_references, resolve, ResolvedDependencies};
pub use store::{ContentStore, MemoryStore};
pub use types::*;
