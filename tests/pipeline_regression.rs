//! End-to-end pipeline behavior over in-memory repositories.

use pretty_assertions::assert_eq;

use testloom::config::{GenerationConfig, TestType};
use testloom::llm::backend::{Disabled, ModelBackend};
use testloom::llm::prompt::ModelPrompt;
use testloom::pipeline::{self, preloaded_content};
use testloom::testgen::case::GeneratedBy;
use testloom::types::{FileCategory, FileRecord};

/* ============================================================
   Helpers
   ============================================================ */

struct Scripted(String);

impl ModelBackend for Scripted {
    fn run(&self, _prompt: &ModelPrompt) -> Result<String, String> {
        Ok(self.0.clone())
    }
    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn record(path: &str, content: &str) -> FileRecord {
    let name = path.rsplit('/').next().unwrap_or(path).to_string();
    FileRecord::new(path, name, content.len() as u64).with_content(content)
}

fn unit_only() -> GenerationConfig {
    GenerationConfig {
        types: vec![TestType::Unit],
        ..Default::default()
    }
}

/* ============================================================
   Scenario: model unavailable, signatures extracted
   ============================================================ */

#[test]
fn failed_model_call_yields_one_case_per_exported_function() {
    let files = vec![record(
        "src/math.js",
        "export function add(a, b) { return a + b; }\n\
         export function sub(a, b) { return a - b; }\n",
    )];

    let report =
        pipeline::generate(&files, &unit_only(), 10, &Disabled, &preloaded_content).unwrap();

    assert_eq!(report.test_cases.len(), 2);
    for case in &report.test_cases {
        assert_eq!(case.generated_by, GeneratedBy::FallbackFunctionBased);
        assert_eq!(case.test_type, TestType::Unit);
        assert_eq!(case.file, "src/math.js");
    }

    let functions: Vec<&str> = report
        .test_cases
        .iter()
        .filter_map(|c| c.function.as_deref())
        .collect();
    assert_eq!(functions, vec!["add", "sub"]);
}

/* ============================================================
   Scenario: manifest + sources under a tight cap
   ============================================================ */

#[test]
fn manifest_shapes_structure_but_sources_win_selection() {
    let mut files = vec![record("package.json", "{\"name\":\"demo\"}")];
    for i in 0..5 {
        files.push(record(
            &format!("src/mod{i}.js"),
            "export function f() { return 0; }",
        ));
    }

    let report =
        pipeline::generate(&files, &unit_only(), 3, &Disabled, &preloaded_content).unwrap();

    assert_eq!(report.summary.selected_files, 3);
    assert_eq!(report.summary.total_files, 6);
    assert_eq!(report.project_structure.project_type, "node");
    assert_eq!(report.test_strategy.test_framework, "jest");

    // the manifest itself was not analyzed; the cap went to sources
    assert!(report.test_cases.iter().all(|c| c.file.starts_with("src/")));
}

/* ============================================================
   Scenario: fenced model response
   ============================================================ */

#[test]
fn fenced_model_response_produces_model_stamped_cases() {
    let backend = Scripted(
        "Sure! ```json\n{\"testCases\":[{\"title\":\"x\"}]}\n```".to_string(),
    );
    let files = vec![record("src/a.js", "export function a() {}")];

    let report =
        pipeline::generate(&files, &unit_only(), 10, &backend, &preloaded_content).unwrap();

    assert_eq!(report.test_cases.len(), 1);
    let case = &report.test_cases[0];
    assert_eq!(case.title, "x");
    assert_eq!(case.generated_by, GeneratedBy::Model);
    assert_eq!(case.test_type, TestType::Unit);
    assert_eq!(case.file, "src/a.js");
    assert!(!case.code.is_empty());
}

/* ============================================================
   Robustness: unreadable model output never fails the request
   ============================================================ */

#[test]
fn prose_only_model_response_falls_back() {
    let backend = Scripted("I could not find anything testable, sorry.".to_string());
    let files = vec![record("src/a.py", "def run():\n    pass\n")];

    let report =
        pipeline::generate(&files, &unit_only(), 10, &backend, &preloaded_content).unwrap();

    assert!(!report.test_cases.is_empty());
    assert!(report
        .test_cases
        .iter()
        .all(|c| c.generated_by != GeneratedBy::Model));
}

#[test]
fn total_fetch_failure_degrades_to_empty_generation() {
    // fetch fails for every file: generation degrades, not errors
    let files = vec![FileRecord::new("src/a.js", "a.js", 10)];
    let fetch = |_: &FileRecord| -> Result<String, String> { Err("offline".into()) };

    let report = pipeline::generate(&files, &unit_only(), 10, &Disabled, &fetch).unwrap();

    assert_eq!(report.summary.analyzed_files, 0);
    assert_eq!(report.file_errors.len(), 1);
    assert!(report.test_cases.is_empty());
}

/* ============================================================
   Mixed repository walkthrough
   ============================================================ */

#[test]
fn python_repository_end_to_end_without_model() {
    let files = vec![
        record("pyproject.toml", "[project]\nname = \"demo\"\n"),
        record("tests/conftest.py", "import pytest\n"),
        record(
            "src/loader.py",
            "def load(path):\n    return path\n\ndef _slurp(path):\n    return None\n",
        ),
        record("README.md", "# demo"),
        record("node_modules/x/i.js", "ignored"),
    ];

    let report =
        pipeline::generate(&files, &unit_only(), 10, &Disabled, &preloaded_content).unwrap();

    assert_eq!(report.project_structure.project_type, "python");
    assert_eq!(
        report.project_structure.test_framework.as_deref(),
        Some("pytest")
    );
    assert_eq!(report.test_strategy.test_framework, "pytest");

    // exported function ranks high, private one medium
    let load = report
        .test_cases
        .iter()
        .find(|c| c.function.as_deref() == Some("load"))
        .unwrap();
    let slurp = report
        .test_cases
        .iter()
        .find(|c| c.function.as_deref() == Some("_slurp"))
        .unwrap();
    assert_eq!(load.priority, testloom::TestPriority::High);
    assert_eq!(slurp.priority, testloom::TestPriority::Medium);

    assert!(load.code.contains("def test_load_unit()"));
}

/* ============================================================
   Selection ordering
   ============================================================ */

#[test]
fn selection_obeys_source_config_test_ordering() {
    let files = vec![
        record("src/a.js", "export function a() {}"),
        record("src/a.test.js", "test('a', () => {})"),
        record("package.json", "{}"),
    ];

    let report =
        pipeline::generate(&files, &unit_only(), 10, &Disabled, &preloaded_content).unwrap();

    // all three are eligible: source first, config second, test last
    assert_eq!(report.summary.selected_files, 3);

    let categories: Vec<FileCategory> = {
        let sel = testloom::testgen::select::select(&files, 10);
        sel.selected.iter().map(|f| f.category).collect()
    };
    assert_eq!(
        categories,
        vec![
            FileCategory::Source,
            FileCategory::Config,
            FileCategory::Test
        ]
    );
}
