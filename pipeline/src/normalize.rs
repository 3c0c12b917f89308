//! Turns the generator's loosely structured prose into the shapes the
//! store keeps.

use crate::{Persona, PersonaSection};

/// One attempt at extracting statements. `None` or an empty result hands
/// the input to the next strategy in the chain.
type ParseStrategy = fn(&str) -> Option<Vec<String>>;

/// Strictest first. New generator quirks are handled by appending a
/// strategy, not by touching the existing ones.
const STATEMENT_STRATEGIES: &[ParseStrategy] =
    &[parse_json_array, split_quoted_lines, split_plain_lines];

/// Parse generator output into a list of problem statements.
///
/// The generator is asked for a simple array of strings but reliably wraps
/// it in markdown fences, switches quote styles, doubles escapes, or
/// numbers the lines instead. The chain never errors; an empty list is the
/// worst case and callers treat it as "no usable statements", not a
/// failure.
#[must_use]
pub fn normalize_statements(raw: &str) -> Vec<String> {
    let body = strip_code_fence(raw);
    for (tier, strategy) in STATEMENT_STRATEGIES.iter().enumerate() {
        if let Some(items) = strategy(body) {
            if !items.is_empty() {
                if tier > 0 {
                    tracing::debug!(tier, "statement parsing fell back past strict JSON");
                }
                return items;
            }
        }
    }
    tracing::warn!("statement parsing exhausted every tier");
    Vec::new()
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

fn strip_wrapping_quotes(text: &str) -> &str {
    let text = text.strip_prefix(['"', '\'']).unwrap_or(text);
    text.strip_suffix(['"', '\'']).unwrap_or(text)
}

/// Applied to every emitted item regardless of the tier that produced it:
/// trailing commas and wrapping quotes go, escaped quotes are unescaped.
fn clean_item(item: &str) -> String {
    let trimmed = item.trim().trim_end_matches(',').trim();
    strip_wrapping_quotes(trimmed).replace("\\\"", "\"")
}

fn parse_json_array(body: &str) -> Option<Vec<String>> {
    let items: Vec<String> = serde_json::from_str(body).ok()?;
    Some(items.iter().map(|item| clean_item(item)).collect())
}

fn split_quoted_lines(body: &str) -> Option<Vec<String>> {
    let body = body.trim();
    let body = body.strip_prefix('[').unwrap_or(body);
    let body = body.strip_suffix(']').unwrap_or(body);

    let items: Vec<String> = body
        .split(",\n")
        .map(clean_item)
        .filter(|item| !item.is_empty())
        .collect();
    // A single item means the comma-newline separator was never there; let
    // the line-based strategy judge the input instead.
    if items.len() > 1 {
        Some(items)
    } else {
        None
    }
}

fn split_plain_lines(body: &str) -> Option<Vec<String>> {
    Some(
        body.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(strip_ordinal)
            .map(clean_item)
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

/// "12. Foo" -> "Foo". Lines that merely start with digits are untouched.
fn strip_ordinal(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return line;
    }
    rest.strip_prefix('.').map_or(line, str::trim_start)
}

const PERSONA_HEADING: &str = "### Persona";

/// Parse generator persona prose into structured records.
///
/// The generator writes markdown: `### Persona N: Name` headings followed
/// by `**Section Title:**` blocks of `-` bullet points. Section and point
/// order is preserved. Returns an empty vec when no heading is present;
/// callers keep the raw text alongside either way, so nothing is lost.
#[must_use]
pub fn normalize_personas(raw: &str) -> Vec<Persona> {
    raw.split(PERSONA_HEADING)
        .skip(1)
        .enumerate()
        .map(|(index, chunk)| parse_persona(index, chunk))
        .collect()
}

fn parse_persona(index: usize, chunk: &str) -> Persona {
    let heading = chunk.lines().next().unwrap_or("").trim();
    let name = heading
        .split_once(':')
        .map(|(_, name)| name.trim())
        .filter(|name| !name.is_empty())
        .map_or_else(|| format!("Persona {}", index + 1), str::to_string);

    Persona {
        name,
        sections: parse_sections(chunk),
    }
}

fn parse_sections(chunk: &str) -> Vec<PersonaSection> {
    let mut sections = Vec::new();
    let mut rest = chunk;
    while let Some(start) = rest.find("**") {
        let after_title = &rest[start + 2..];
        let Some(title_end) = after_title.find("**") else {
            break;
        };
        let title = after_title[..title_end].trim().trim_end_matches(':').trim();
        let body_rest = &after_title[title_end + 2..];
        let body = &body_rest[..body_rest.find("**").unwrap_or(body_rest.len())];
        if !title.is_empty() {
            sections.push(PersonaSection {
                title: title.to_string(),
                points: parse_points(body),
            });
        }
        rest = body_rest;
    }
    sections
}

fn parse_points(body: &str) -> Vec<String> {
    body.lines()
        .map(|line| line.trim().trim_start_matches('-').trim())
        .filter(|line| !line.is_empty() && *line != ":")
        .map(str::to_string)
        .collect()
}
