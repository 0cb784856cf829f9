//! testgen/fallback.rs
//!
//! Deterministic, model-free test case generation. Runs whenever the
//! model is unavailable or unreadable; always succeeds.

use crate::config::{GenerationConfig, TestType};
use crate::testgen::case::{GeneratedBy, TestCase, TestPriority};
use crate::testgen::extract::{extract_signatures, Signature};
use crate::testgen::templates;
use crate::types::{FileRecord, Language};

/* ============================================================
   Public API
   ============================================================ */

/// One case per (extracted signature x requested type); generic
/// smoke cases when a file yields no signatures. `reason` records why
/// the fallback ran and travels in each case's description.
pub fn generate(reason: &str, files: &[FileRecord], config: &GenerationConfig) -> Vec<TestCase> {
    let mut out = Vec::new();

    for file in files {
        let signatures = file
            .content
            .as_deref()
            .map(|c| extract_signatures(file.language, c))
            .unwrap_or_default();

        let framework = framework_for(file.language, config);

        if signatures.is_empty() {
            for t in &config.types {
                out.push(generic_case(file, framework, *t, reason));
            }
            continue;
        }

        for sig in &signatures {
            for t in &config.types {
                out.push(function_case(file, framework, sig, *t, reason));
            }
        }
    }

    out
}

/* ============================================================
   Case construction
   ============================================================ */

fn function_case(
    file: &FileRecord,
    framework: &str,
    sig: &Signature,
    test_type: TestType,
    reason: &str,
) -> TestCase {
    let mut case = TestCase::stamped(GeneratedBy::FallbackFunctionBased);

    case.title = format!("{test_type} test: {}", sig.name);
    case.description = format!(
        "Exercises `{}` in {}. Generated without model assistance ({reason}).",
        sig.name, file.path
    );
    case.test_type = test_type;
    case.priority = if sig.is_exported {
        TestPriority::High
    } else {
        TestPriority::Medium
    };
    case.file = file.path.clone();
    case.function = Some(sig.name.clone());
    case.code = templates::function_template(
        file.language,
        framework,
        &sig.name,
        &file.path,
        test_type,
    );
    case.tags = tags_for(file.language, test_type);
    case
}

fn generic_case(
    file: &FileRecord,
    framework: &str,
    test_type: TestType,
    reason: &str,
) -> TestCase {
    let mut case = TestCase::stamped(GeneratedBy::FallbackGeneric);

    case.title = format!("{test_type} smoke test: {}", file.name);
    case.description = format!(
        "Module-level check for {}. Generated without model assistance ({reason}).",
        file.path
    );
    case.test_type = test_type;
    case.file = file.path.clone();
    case.code = templates::generic_template(file.language, framework, &file.path, test_type);
    case.tags = tags_for(file.language, test_type);
    case
}

/* ============================================================
   Helpers
   ============================================================ */

fn framework_for(language: Language, config: &GenerationConfig) -> &str {
    if config.framework != "auto" {
        &config.framework
    } else {
        templates::idiomatic_framework(language)
    }
}

fn tags_for(language: Language, test_type: TestType) -> Vec<String> {
    vec![language.to_string(), test_type.as_str().into(), "fallback".into()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn js_file() -> FileRecord {
        let mut r = FileRecord::new("src/math.js", "math.js", 120)
            .with_content("export function add(a, b) { return a + b; }\nexport function sub(a, b) { return a - b; }\n");
        r.language = Language::JavaScript;
        r
    }

    #[test]
    fn one_case_per_signature_per_requested_type() {
        let cfg = GenerationConfig::default(); // unit only
        let cases = generate("model unavailable", &[js_file()], &cfg);

        assert_eq!(cases.len(), 2);
        assert!(cases
            .iter()
            .all(|c| c.generated_by == GeneratedBy::FallbackFunctionBased));
        assert!(cases.iter().all(|c| c.test_type == TestType::Unit));
        assert!(cases.iter().any(|c| c.function.as_deref() == Some("add")));
        assert!(cases.iter().any(|c| c.function.as_deref() == Some("sub")));
    }

    #[test]
    fn exported_signatures_rank_high() {
        let cfg = GenerationConfig::default();
        let cases = generate("model unavailable", &[js_file()], &cfg);
        assert!(cases.iter().all(|c| c.priority == TestPriority::High));
    }

    #[test]
    fn file_without_signatures_gets_generic_cases() {
        let mut r = FileRecord::new("notes.md", "notes.md", 10).with_content("# notes");
        r.language = Language::Markdown;

        let cfg = GenerationConfig {
            types: vec![TestType::Unit, TestType::Integration],
            ..Default::default()
        };
        let cases = generate("unparseable response", &[r], &cfg);

        assert_eq!(cases.len(), 2);
        assert!(cases
            .iter()
            .all(|c| c.generated_by == GeneratedBy::FallbackGeneric));
    }

    #[test]
    fn regeneration_is_deterministic_modulo_bookkeeping() {
        let cfg = GenerationConfig::default();
        let a = generate("same reason", &[js_file()], &cfg);
        let b = generate("same reason", &[js_file()], &cfg);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.title, y.title);
            assert_eq!(x.test_type, y.test_type);
            assert_eq!(x.file, y.file);
            assert_eq!(x.code, y.code);
            assert_ne!(x.id, y.id); // fresh ids each run
        }
    }

    #[test]
    fn empty_file_set_yields_empty_output() {
        let cfg = GenerationConfig::default();
        assert!(generate("nothing to do", &[], &cfg).is_empty());
    }
}
