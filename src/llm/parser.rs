//! llm/parser.rs
//!
//! Recovers structured test cases from untrusted model output. The
//! response may be clean JSON, fenced JSON, or JSON buried in prose;
//! whatever happens, this module never fails the request.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::config::GenerationConfig;
use crate::testgen::case::{GeneratedBy, TestCase, TestPriority};
use crate::testgen::fallback;
use crate::types::FileRecord;

const CODE_PLACEHOLDER: &str = "// TODO: implement this test";

/// Outcome of the structured-recovery attempt.
#[derive(Debug)]
pub enum ParsedModel {
    Parsed(Vec<TestCase>),
    Unparseable,
}

/* ============================================================
   Public API
   ============================================================ */

/// Parse the raw model response. On total failure this defers to the
/// deterministic generator instead of propagating an error.
pub fn parse(raw: &str, files: &[FileRecord], config: &GenerationConfig) -> Vec<TestCase> {
    match try_parse(raw, files, config) {
        ParsedModel::Parsed(cases) => cases,
        ParsedModel::Unparseable => {
            log::warn!("model response unparseable, using deterministic generator");
            fallback::generate("model response could not be parsed", files, config)
        }
    }
}

/// Structured recovery only; exposed so callers can distinguish a
/// real parse from fallback output.
pub fn try_parse(raw: &str, files: &[FileRecord], config: &GenerationConfig) -> ParsedModel {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedModel::Unparseable;
    }

    // Ordered strategies, lazily evaluated, first success wins.
    let strategies: &[fn(&str) -> Option<Value>] =
        &[whole_document, fenced_block, embedded_object];

    let entries = strategies
        .iter()
        .find_map(|s| s(trimmed).and_then(case_entries));

    match entries {
        Some(entries) if !entries.is_empty() => {
            let cases = entries
                .iter()
                .enumerate()
                .map(|(i, v)| normalize(v, i + 1, files, config))
                .collect();
            ParsedModel::Parsed(cases)
        }
        _ => ParsedModel::Unparseable,
    }
}

/* ============================================================
   Parse strategies
   ============================================================ */

fn whole_document(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

lazy_static! {
    static ref FENCE: Regex = Regex::new(r"```(?:[A-Za-z]+)?\s*([\s\S]*?)```").unwrap();
}

fn fenced_block(text: &str) -> Option<Value> {
    let inner = FENCE.captures(text)?.get(1)?.as_str().trim();
    serde_json::from_str(inner).ok()
}

/// Last resort: locate the first `"testCases"` key and carve out the
/// smallest enclosing balanced object.
fn embedded_object(text: &str) -> Option<Value> {
    let key_pos = text.find("\"testCases\"")?;
    let start = text[..key_pos].rfind('{')?;
    let candidate = balanced_object(&text[start..])?;
    serde_json::from_str(candidate).ok()
}

/// Scan forward from a `{`, tracking brace depth and string state,
/// and return the balanced slice.
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// A usable result is either `{"testCases": [...]}` or a bare array
/// of objects.
fn case_entries(doc: Value) -> Option<Vec<Value>> {
    let array = match doc {
        Value::Object(map) => map.get("testCases")?.as_array()?.clone(),
        Value::Array(items) => items,
        _ => return None,
    };

    let objects: Vec<Value> = array.into_iter().filter(|v| v.is_object()).collect();
    Some(objects)
}

/* ============================================================
   Normalization
   ============================================================ */

// Explicit field-by-field defaulting; absent and empty both count as
// missing so a "" title still gets synthesized.
fn normalize(
    entry: &Value,
    ordinal: usize,
    files: &[FileRecord],
    config: &GenerationConfig,
) -> TestCase {
    let mut case = TestCase::stamped(GeneratedBy::Model);

    case.title = field_string(entry, "title")
        .unwrap_or_else(|| format!("Test Case {ordinal}"));
    case.description = field_string(entry, "description").unwrap_or_default();
    case.test_type = field_string(entry, "type")
        .as_deref()
        .and_then(crate::config::TestType::parse)
        .unwrap_or_else(|| config.primary_type());
    case.priority = field_string(entry, "priority")
        .as_deref()
        .and_then(TestPriority::parse)
        .unwrap_or_default();
    case.file = field_string(entry, "file")
        .or_else(|| files.first().map(|f| f.path.clone()))
        .unwrap_or_default();
    case.code = field_string(entry, "code").unwrap_or_else(|| CODE_PLACEHOLDER.into());
    case.setup = field_string(entry, "setup");
    case.teardown = field_string(entry, "teardown");
    case.dependencies = field_string_list(entry, "dependencies");
    case.tags = field_string_list(entry, "tags");

    // Best-effort enrichment, not required for validity.
    case.function = field_string(entry, "function")
        .or_else(|| recover_function(&case.code));

    case
}

fn field_string(entry: &Value, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

// Tolerates both ["a", "b"] and "a, b".
fn field_string_list(entry: &Value, key: &str) -> Vec<String> {
    match entry.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => {
            s.split(',').map(|p| p.trim().to_owned()).collect()
        }
        _ => Vec::new(),
    }
}

/* ============================================================
   Function recovery
   ============================================================ */

lazy_static! {
    // A quoted identifier right after a test-grouping keyword, or a
    // conventional test function declaration.
    static ref FN_FROM_CODE: Vec<Regex> = vec![
        Regex::new(r#"\b(?:describe|context|suite)\s*\(\s*['"`]([A-Za-z_$][\w$]*)['"`]"#).unwrap(),
        Regex::new(r#"\b(?:it|test)\s*\(\s*['"`]([A-Za-z_$][\w$]*)['"`]"#).unwrap(),
        Regex::new(r"def\s+test_([a-z_]\w*)").unwrap(),
        Regex::new(r"fn\s+test_([a-z_]\w*)").unwrap(),
        Regex::new(r"func\s+Test([A-Za-z]\w*)").unwrap(),
    ];
}

fn recover_function(code: &str) -> Option<String> {
    FN_FROM_CODE
        .iter()
        .find_map(|re| re.captures(code))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestType;
    use crate::types::Language;
    use pretty_assertions::assert_eq;

    fn one_file() -> Vec<FileRecord> {
        let mut r = FileRecord::new("src/calc.js", "calc.js", 40)
            .with_content("export function calc() {}");
        r.language = Language::JavaScript;
        vec![r]
    }

    #[test]
    fn clean_json_round_trips() {
        let raw = r#"{"testCases":[{"title":"adds numbers","type":"unit","priority":"high","file":"src/calc.js","code":"expect(1).toBe(1)"}]}"#;
        let cases = parse(raw, &one_file(), &GenerationConfig::default());

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].title, "adds numbers");
        assert_eq!(cases[0].test_type, TestType::Unit);
        assert_eq!(cases[0].priority, TestPriority::High);
        assert_eq!(cases[0].generated_by, GeneratedBy::Model);
    }

    #[test]
    fn fenced_response_is_unwrapped() {
        let raw = "Sure! ```json\n{\"testCases\":[{\"title\":\"x\"}]}\n```";
        let cases = parse(raw, &one_file(), &GenerationConfig::default());

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].title, "x");
        assert_eq!(cases[0].generated_by, GeneratedBy::Model);
        // everything else defaulted
        assert_eq!(cases[0].file, "src/calc.js");
        assert_eq!(cases[0].code, CODE_PLACEHOLDER);
        assert_eq!(cases[0].priority, TestPriority::Medium);
    }

    #[test]
    fn object_embedded_in_prose_is_carved_out() {
        let raw = "Here is my analysis of the code.\n\
                   The result {\"testCases\":[{\"title\":\"embedded\"}]} should help.\n\
                   Let me know if you need more.";
        let cases = parse(raw, &one_file(), &GenerationConfig::default());

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].title, "embedded");
    }

    #[test]
    fn malformed_text_falls_back_nonempty() {
        let cases = parse("total garbage %%%", &one_file(), &GenerationConfig::default());
        assert!(!cases.is_empty());
        assert!(cases
            .iter()
            .all(|c| c.generated_by != GeneratedBy::Model));
    }

    #[test]
    fn valid_json_without_test_cases_key_falls_back() {
        let cases = parse(
            r#"{"analysis": "looks fine"}"#,
            &one_file(),
            &GenerationConfig::default(),
        );
        assert!(!cases.is_empty());
        assert!(cases.iter().all(|c| c.generated_by != GeneratedBy::Model));
    }

    #[test]
    fn missing_type_defaults_to_first_requested() {
        let cfg = GenerationConfig {
            types: vec![TestType::Api, TestType::Unit],
            ..Default::default()
        };
        let raw = r#"{"testCases":[{"title":"t"}]}"#;
        let cases = parse(raw, &one_file(), &cfg);
        assert_eq!(cases[0].test_type, TestType::Api);
    }

    #[test]
    fn untitled_cases_get_ordinal_titles() {
        let raw = r#"{"testCases":[{"code":"a"},{"code":"b"}]}"#;
        let cases = parse(raw, &one_file(), &GenerationConfig::default());
        assert_eq!(cases[0].title, "Test Case 1");
        assert_eq!(cases[1].title, "Test Case 2");
    }

    #[test]
    fn function_recovered_from_test_declaration_idioms() {
        let raw = r#"{"testCases":[
            {"title":"js","code":"describe('parseHeader', () => { it('works', () => {}) })"},
            {"title":"py","code":"def test_load_config():\n    assert True"}
        ]}"#;
        let cases = parse(raw, &one_file(), &GenerationConfig::default());
        assert_eq!(cases[0].function.as_deref(), Some("parseHeader"));
        assert_eq!(cases[1].function.as_deref(), Some("load_config"));
    }

    #[test]
    fn dependency_lists_tolerate_comma_strings() {
        let raw = r#"{"testCases":[{"title":"t","dependencies":"jest, supertest"}]}"#;
        let cases = parse(raw, &one_file(), &GenerationConfig::default());
        assert_eq!(cases[0].dependencies, vec!["jest", "supertest"]);
    }

    #[test]
    fn empty_test_cases_array_is_not_usable() {
        let raw = r#"{"testCases":[]}"#;
        assert!(matches!(
            try_parse(raw, &one_file(), &GenerationConfig::default()),
            ParsedModel::Unparseable
        ));
    }
}
