use crate::AssetKind;

/// Roles resolved dependencies play when assembling a prompt.
pub mod roles {
    pub const BRANDSCRIPT: &str = "brandscript";
    pub const BUSINESS_INFO: &str = "business_info";
    pub const PERSONAS: &str = "personas";
}

/// One reference slot of a derived kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceSpec {
    /// Role the resolved artifact plays during prompt assembly.
    pub role: &'static str,
    pub kind: AssetKind,
    pub required: bool,
}

/// Static description of an asset kind: the answer fields it needs, the
/// prior kinds it may reference (in order), and whether creating it invokes
/// the generator.
#[derive(Debug, Clone, Copy)]
pub struct TypeSpec {
    pub kind: AssetKind,
    pub required_fields: &'static [&'static str],
    pub references: &'static [ReferenceSpec],
    pub generates: bool,
}

const BRANDSCRIPT: TypeSpec = TypeSpec {
    kind: AssetKind::Brandscript,
    required_fields: &[
        "company_name",
        "products_services",
        "target_audience",
        "main_problem",
        "solution",
        "differentiation",
        "authority",
        "steps",
    ],
    references: &[],
    generates: true,
};

const BUSINESS_INFO: TypeSpec = TypeSpec {
    kind: AssetKind::BusinessInfo,
    required_fields: &[
        "services",
        "excluded_services",
        "locations",
        "excluded_locations",
        "priority_service",
        "phone_number",
        "address",
    ],
    references: &[],
    generates: false,
};

const CUSTOMER_PERSONAS: TypeSpec = TypeSpec {
    kind: AssetKind::CustomerPersonas,
    required_fields: &[],
    references: &[
        ReferenceSpec {
            role: roles::BRANDSCRIPT,
            kind: AssetKind::Brandscript,
            required: true,
        },
        ReferenceSpec {
            role: roles::BUSINESS_INFO,
            kind: AssetKind::BusinessInfo,
            required: false,
        },
    ],
    generates: true,
};

const PROBLEM_STATEMENTS: TypeSpec = TypeSpec {
    kind: AssetKind::ProblemStatements,
    required_fields: &[],
    references: &[
        ReferenceSpec {
            role: roles::BRANDSCRIPT,
            kind: AssetKind::Brandscript,
            required: true,
        },
        ReferenceSpec {
            role: roles::PERSONAS,
            kind: AssetKind::CustomerPersonas,
            required: false,
        },
    ],
    generates: true,
};

/// Look up the static spec for a kind. Total over the enum; an unknown kind
/// cannot exist.
#[must_use]
pub fn spec_for(kind: AssetKind) -> &'static TypeSpec {
    match kind {
        AssetKind::Brandscript => &BRANDSCRIPT,
        AssetKind::BusinessInfo => &BUSINESS_INFO,
        AssetKind::CustomerPersonas => &CUSTOMER_PERSONAS,
        AssetKind::ProblemStatements => &PROBLEM_STATEMENTS,
    }
}
