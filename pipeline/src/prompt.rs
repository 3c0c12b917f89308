//! Deterministic prompt assembly. No network or storage access happens
//! here; resolved dependency contents and form answers go in, a
//! [`GenerationRequest`] comes out.

use crate::{BrandscriptAnswers, BusinessInfoAnswers, PipelineError, PipelineResult};
use brandkit_gen::GenerationRequest;

const BRANDSCRIPT_SYSTEM: &str =
    "You are a professional brand strategist specialized in creating clear and impactful brandscripts.";
const PERSONAS_SYSTEM: &str =
    "You are a marketing expert specialized in creating detailed customer personas based on business information and brandscripts.";
const STATEMENTS_SYSTEM: &str =
    "You are a marketing expert specializing in understanding customer pain points and creating compelling problem statements.";

fn missing_fields<'a>(fields: impl IntoIterator<Item = (&'static str, &'a str)>) -> Vec<&'static str> {
    fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
}

fn require_all<'a>(
    fields: impl IntoIterator<Item = (&'static str, &'a str)>,
) -> PipelineResult<()> {
    let missing = missing_fields(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Every brandscript answer must be non-empty before generation is
/// attempted.
pub fn validate_brandscript_answers(answers: &BrandscriptAnswers) -> PipelineResult<()> {
    require_all(answers.fields())
}

/// Every business-info answer must be non-empty before storage is
/// attempted.
pub fn validate_business_info_answers(answers: &BusinessInfoAnswers) -> PipelineResult<()> {
    require_all(answers.fields())
}

/// "excluded_services" -> "Excluded services", for labelled prompt lines.
fn field_label(name: &str) -> String {
    let mut label = name.replace('_', " ");
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    label
}

#[must_use]
pub fn brandscript_request(answers: &BrandscriptAnswers) -> GenerationRequest {
    let prompt = format!(
        "Based on the provided business information, please complete the following brandscript:

Business Information:
- Company Name: {company_name}
- Products/Services: {products_services}
- Target Audience: {target_audience}
- Main Problem: {main_problem}
- Solution: {solution}
- Differentiation: {differentiation}
- Authority: {authority}
- Customer Steps: {steps}

Please create a complete brandscript following this structure:

1. A Character
What do they want?

2. With a problem
External:
Internal:
Philosophical:

3. Meets a guide
Empathy:
Competency & authority:

4. Who give them a plan
Summarize your plan (3 steps):

5. And calls them to action
Affirmation:
Direct:
Marketing:

6a. Success
Successful results:

6b. Failure
Tragic results:

7. Identity transformation
Before:
After:

Please format the response consistently and clearly, making sure to maintain the structure while incorporating all the provided business information naturally.",
        company_name = answers.company_name,
        products_services = answers.products_services,
        target_audience = answers.target_audience,
        main_problem = answers.main_problem,
        solution = answers.solution,
        differentiation = answers.differentiation,
        authority = answers.authority,
        steps = answers.steps,
    );

    GenerationRequest {
        system: BRANDSCRIPT_SYSTEM.to_string(),
        prompt,
    }
}

/// Personas are generated from the brandscript narrative plus, when
/// supplied, the business-info answers rendered as labelled lines.
#[must_use]
pub fn personas_request(
    narrative: &str,
    business_info: Option<&BusinessInfoAnswers>,
) -> GenerationRequest {
    let info_lines = business_info
        .map(|info| {
            info.fields()
                .iter()
                .map(|(name, value)| format!("{}: {value}", field_label(name)))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    let prompt = format!(
        "Based on the following BrandScript and business information, generate three distinct customer personas that represent the target audience for this business.

BrandScript:
{narrative}

Business Information:
{info_lines}

Each persona should be detailed and realistic, reflecting different segments of the market that would benefit from the described services.
For each persona, provide:

Basic Demographics
- Full name
- Age
- Location (considering the business's service area)
- Income level
- Industry
- Current role/position
- Education level
- Family status

Professional Context
- Years of business experience
- Size of team they manage (if applicable)
- Current marketing challenges
- Previous experience with marketing services
- Decision-making authority level

Psychological Profile
- Primary business goals
- Personal aspirations
- Core values
- Communication preferences
- Decision-making style
- Risk tolerance

Pain Points & Frustrations
- Current marketing-related challenges
- Time constraints
- Resource limitations
- Specific industry pressures
- Competition concerns

Desires & Motivations
- Immediate business needs
- Long-term vision
- Definition of success
- Expected outcomes from marketing services
- Timeline expectations

Buying Behavior
- Information gathering process
- Preferred communication channels
- Key decision-making factors
- Budget sensitivity
- Typical objections
- Trust indicators they look for

For each persona, write a brief narrative that brings their story to life, explaining how they discovered they needed marketing help and what specific aspects of the business's services would appeal to them."
    );

    GenerationRequest {
        system: PERSONAS_SYSTEM.to_string(),
        prompt,
    }
}

/// Problem statements are generated from the brandscript narrative plus the
/// raw persona text. Personas are optional context; pass an empty string
/// when none were selected. The brandscript is not optional.
#[must_use]
pub fn statements_request(narrative: &str, personas: &str) -> GenerationRequest {
    let personas_block = if personas.is_empty() {
        String::new()
    } else {
        format!("Customer Personas:\n{personas}\n\n")
    };
    let alignment_line = if personas.is_empty() {
        "Align with the target market described in the brandscript"
    } else {
        "Align with the specific challenges and aspirations of provided personas"
    };

    let prompt = format!(
        "Context Setting
You are tasked with generating 30 authentic problem statements based on the provided brandscript and optional customer personas. These statements should reflect genuine pain points, aspirations, and concerns that lead potential customers to seek our solution.

Input Data:

Brandscript:
{narrative}

{personas_block}Output Requirements:
Generate 30 diverse first-person problem statements that:
- Directly reflect the problems identified in the brandscript
- {alignment_line}
- Vary in emotional intensity and urgency
- Sound natural and conversational
- Are concise and ad-copy ready (no more than 15 words each)
- Connect logically to the solution offered

Use these problem statement formats:
- Personal struggles (\"I keep falling behind on...\")
- Emotional expressions (\"I'm frustrated trying to...\")
- Questions (\"Why can't I figure out...\")
- Direct pain points (\"I'm tired of dealing with...\")
- Aspirational concerns (\"I wish I could...\")
- Time-based issues (\"I never have enough time to...\")
- Cost-related problems (\"I'm wasting money on...\")
- Future worries (\"I'm concerned about falling behind...\")

Special Instructions:
- Write all statements in first person
- Each statement should stand alone as a complete thought
- Vary the emotional intensity from mild concern to urgent need
- Mirror the language and tone of the target market
- Reference industry-specific challenges when relevant
- Balance rational and emotional appeals
- Ensure statements naturally lead to the solution offered in the brandscript

Format your response as a simple array of strings, with each string being a problem statement. DO NOT include any JSON formatting marks like quotes around the array itself or 'json' keyword. Just provide the clean array."
    );

    GenerationRequest {
        system: STATEMENTS_SYSTEM.to_string(),
        prompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> BrandscriptAnswers {
        BrandscriptAnswers {
            company_name: "Acme Plumbing".to_string(),
            products_services: "Residential plumbing".to_string(),
            target_audience: "Homeowners".to_string(),
            main_problem: "Leaky pipes".to_string(),
            solution: "Same-day repair".to_string(),
            differentiation: "Flat pricing".to_string(),
            authority: "4000 five-star reviews".to_string(),
            steps: "Call, book, relax".to_string(),
        }
    }

    #[test]
    fn brandscript_prompt_interpolates_every_answer() {
        let request = brandscript_request(&answers());
        for (_, value) in answers().fields() {
            assert!(request.prompt.contains(value), "prompt misses {value:?}");
        }
        assert!(request.system.contains("brand strategist"));
    }

    #[test]
    fn validation_names_every_empty_field() {
        let mut incomplete = answers();
        incomplete.solution = String::new();
        incomplete.steps = "   ".to_string();

        let error = validate_brandscript_answers(&incomplete).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("solution"));
        assert!(message.contains("steps"));
        assert!(!message.contains("company_name"));
    }

    #[test]
    fn personas_prompt_without_business_info_has_empty_section() {
        let request = personas_request("THE NARRATIVE", None);
        assert!(request.prompt.contains("THE NARRATIVE"));
        assert!(request.prompt.contains("Business Information:\n\n"));
    }

    #[test]
    fn personas_prompt_labels_business_info_lines() {
        let info = BusinessInfoAnswers {
            services: "Drain cleaning".to_string(),
            excluded_services: "Gas lines".to_string(),
            ..BusinessInfoAnswers::default()
        };
        let request = personas_request("n", Some(&info));
        assert!(request.prompt.contains("Services: Drain cleaning"));
        assert!(request.prompt.contains("Excluded services: Gas lines"));
    }

    #[test]
    fn statements_prompt_personas_are_optional_context() {
        let with = statements_request("n", "PERSONA TEXT");
        assert!(with.prompt.contains("Customer Personas:\nPERSONA TEXT"));
        assert!(with.prompt.contains("provided personas"));

        let without = statements_request("n", "");
        assert!(!without.prompt.contains("Customer Personas:"));
        assert!(without.prompt.contains("target market described in the brandscript"));
    }
}
