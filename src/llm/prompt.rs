//! llm/prompt.rs
//!
//! Renders the generation request sent to the model: bounded file
//! excerpts, the caller's options, and a strict output schema.

use crate::config::GenerationConfig;
use crate::types::{FileRecord, TestStrategy};

// Request size must stay predictable regardless of repository shape.
const CONTENT_CHAR_LIMIT: usize = 3000;
const CASES_PER_FILE: usize = 2;
const MAX_CASES: usize = 10;

#[derive(Debug, Clone)]
pub struct ModelPrompt {
    pub system: String,
    pub user: String,
    pub target_count: usize,
}

/* ============================================================
   Public API
   ============================================================ */

pub fn build(
    files: &[FileRecord],
    config: &GenerationConfig,
    strategy: &TestStrategy,
) -> ModelPrompt {
    let target_count = (files.len() * CASES_PER_FILE).min(MAX_CASES);

    ModelPrompt {
        system: system_prompt(),
        user: user_prompt(files, config, strategy, target_count),
        target_count,
    }
}

/* ============================================================
   System prompt (stable, reused)
   ============================================================ */

fn system_prompt() -> String {
    r#"
You are an expert test engineer producing test case plans for unfamiliar codebases.

Rules:
- Base every test case on the code excerpts provided, nothing else
- Prefer small, deterministic, high-signal tests
- Name the specific function under test whenever one exists
- Do NOT invent files or functions that are not in the excerpts
- Output exactly one JSON object and no surrounding prose
"#
    .trim()
    .to_string()
}

/* ============================================================
   User prompt
   ============================================================ */

fn user_prompt(
    files: &[FileRecord],
    config: &GenerationConfig,
    strategy: &TestStrategy,
    target_count: usize,
) -> String {
    let mut out = String::new();

    /* ---------- FILES ---------- */
    for f in files {
        out.push_str(&format!("FILE: {}\n", f.path));
        out.push_str(&format!("LANGUAGE: {}\n", f.language));
        out.push_str("```\n");
        out.push_str(truncated(f.content.as_deref().unwrap_or_default()));
        out.push_str("\n```\n\n");
    }

    /* ---------- REQUEST ---------- */
    let types: Vec<&str> = config.types.iter().map(|t| t.as_str()).collect();

    out.push_str("REQUEST\n");
    out.push_str(&format!("Test types: {}\n", types.join(", ")));
    out.push_str(&format!("Complexity: {}\n", config.complexity));
    out.push_str(&format!(
        "Test framework: {}\n",
        resolved_framework(config, strategy)
    ));

    if config.include_edge_cases {
        out.push_str("Include edge cases for boundary inputs.\n");
    }
    if config.include_negative_tests {
        out.push_str("Include negative tests for invalid inputs and failure paths.\n");
    }

    out.push_str(&format!(
        "Produce at most {target_count} test cases, covering the most important behavior first.\n\n"
    ));

    /* ---------- OUTPUT SCHEMA ---------- */
    out.push_str(
        "OUTPUT FORMAT\n\
         Respond with exactly one JSON object of the shape:\n\
         {\n\
         \x20 \"testCases\": [\n\
         \x20   {\n\
         \x20     \"title\": string,\n\
         \x20     \"description\": string,\n\
         \x20     \"type\": string,\n\
         \x20     \"priority\": \"low\" | \"medium\" | \"high\" | \"critical\",\n\
         \x20     \"file\": string,\n\
         \x20     \"function\": string | null,\n\
         \x20     \"code\": string,\n\
         \x20     \"setup\": string | null,\n\
         \x20     \"teardown\": string | null,\n\
         \x20     \"dependencies\": [string],\n\
         \x20     \"tags\": [string]\n\
         \x20   }\n\
         \x20 ]\n\
         }\n\
         No markdown fences, no commentary, JSON only.\n",
    );

    out
}

/* ============================================================
   Helpers
   ============================================================ */

fn truncated(content: &str) -> &str {
    match content.char_indices().nth(CONTENT_CHAR_LIMIT) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

/// "auto" resolves to whatever the repository itself suggested.
fn resolved_framework<'a>(config: &'a GenerationConfig, strategy: &'a TestStrategy) -> &'a str {
    if config.framework == "auto" {
        &strategy.test_framework
    } else {
        &config.framework
    }
}
