//! pipeline.rs
//!
//! Request lifecycle: select files, build the prompt, call the model,
//! parse what comes back, fall back when it does not. Stateless
//! across requests; the only hard failure is an empty input set.

use serde::Serialize;
use thiserror::Error;

use crate::config::GenerationConfig;
use crate::llm::backend::ModelBackend;
use crate::llm::{parser, prompt};
use crate::testgen::case::TestCase;
use crate::testgen::{fallback, select};
use crate::types::{FileError, FileRecord, ProjectStructure, TestStrategy};

/* ============================================================
   Phases
   ============================================================ */

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Selecting,
    Prompting,
    AwaitingModel,
    Parsing,
    FallingBack,
    Done,
}

fn advance(phase: &mut Phase, next: Phase) {
    log::debug!("pipeline phase {:?} -> {:?}", phase, next);
    *phase = next;
}

/* ============================================================
   Results
   ============================================================ */

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no files to analyze")]
    NoFiles,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    pub total_files: usize,
    pub selected_files: usize,
    pub analyzed_files: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub test_cases: Vec<TestCase>,
    pub project_structure: ProjectStructure,
    pub test_strategy: TestStrategy,
    pub summary: RequestSummary,
    pub file_errors: Vec<FileError>,
}

/// Supplies content for a selected file when the listing did not
/// carry it. Failures are isolated per file.
pub type FetchFn<'a> = &'a dyn Fn(&FileRecord) -> Result<String, String>;

/// Fetcher for callers whose records already carry content.
pub fn preloaded_content(record: &FileRecord) -> Result<String, String> {
    record
        .content
        .clone()
        .ok_or_else(|| "content not provided".into())
}

/* ============================================================
   Public API
   ============================================================ */

pub fn generate(
    files: &[FileRecord],
    config: &GenerationConfig,
    max_files: usize,
    backend: &dyn ModelBackend,
    fetch: FetchFn<'_>,
) -> Result<GenerationReport, PipelineError> {
    if files.is_empty() {
        return Err(PipelineError::NoFiles);
    }

    let mut phase = Phase::Selecting;
    let config = config.clone().normalized();

    let selection = select::select(files, max_files);
    log::info!(
        "selected {} of {} files (project type: {})",
        selection.selected.len(),
        files.len(),
        selection.structure.project_type
    );

    /* ---------- content ---------- */

    let mut file_errors: Vec<FileError> = Vec::new();
    let mut analyzed: Vec<FileRecord> = Vec::new();

    for f in &selection.selected {
        let content = match &f.content {
            Some(c) => Ok(c.clone()),
            None => fetch(f),
        };

        match content {
            Ok(c) => analyzed.push(f.clone().with_content(c)),
            Err(e) => {
                log::warn!("skipping {}: {}", f.path, e);
                file_errors.push(FileError {
                    path: f.path.clone(),
                    error: e,
                });
            }
        }
    }

    /* ---------- generation ---------- */

    let test_cases = if analyzed.is_empty() {
        // Nothing fetchable; degrade to zero or generic cases rather
        // than failing the request.
        advance(&mut phase, Phase::FallingBack);
        fallback::generate("no analyzable file contents", &analyzed, &config)
    } else {
        advance(&mut phase, Phase::Prompting);
        let request = prompt::build(&analyzed, &config, &selection.strategy);

        advance(&mut phase, Phase::AwaitingModel);
        match backend.run(&request) {
            Ok(raw) => {
                advance(&mut phase, Phase::Parsing);
                parser::parse(&raw, &analyzed, &config)
            }
            Err(e) => {
                log::warn!("model invocation failed ({}): {}", backend.name(), e);
                advance(&mut phase, Phase::FallingBack);
                fallback::generate(&format!("model invocation failed: {e}"), &analyzed, &config)
            }
        }
    };

    advance(&mut phase, Phase::Done);

    Ok(GenerationReport {
        summary: RequestSummary {
            total_files: files.len(),
            selected_files: selection.selected.len(),
            analyzed_files: analyzed.len(),
        },
        project_structure: selection.structure,
        test_strategy: selection.strategy,
        test_cases,
        file_errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::backend::Disabled;
    use crate::llm::prompt::ModelPrompt;

    struct Scripted(&'static str);

    impl ModelBackend for Scripted {
        fn run(&self, _prompt: &ModelPrompt) -> Result<String, String> {
            Ok(self.0.to_string())
        }
        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn js_repo() -> Vec<FileRecord> {
        vec![FileRecord::new("src/a.js", "a.js", 30)
            .with_content("export function a() { return 1; }")]
    }

    #[test]
    fn empty_input_is_the_only_error() {
        let err = generate(
            &[],
            &GenerationConfig::default(),
            10,
            &Disabled,
            &preloaded_content,
        );
        assert!(matches!(err, Err(PipelineError::NoFiles)));
    }

    #[test]
    fn model_failure_recovers_via_fallback() {
        let report = generate(
            &js_repo(),
            &GenerationConfig::default(),
            10,
            &Disabled,
            &preloaded_content,
        )
        .unwrap();

        assert!(!report.test_cases.is_empty());
        assert_eq!(report.summary.analyzed_files, 1);
    }

    #[test]
    fn scripted_model_output_is_parsed() {
        let backend = Scripted(r#"{"testCases":[{"title":"from model"}]}"#);
        let report = generate(
            &js_repo(),
            &GenerationConfig::default(),
            10,
            &backend,
            &preloaded_content,
        )
        .unwrap();

        assert_eq!(report.test_cases.len(), 1);
        assert_eq!(report.test_cases[0].title, "from model");
    }

    #[test]
    fn fetch_failures_are_collected_not_fatal() {
        let files = vec![
            FileRecord::new("src/ok.js", "ok.js", 10).with_content("function ok() {}"),
            FileRecord::new("src/broken.js", "broken.js", 10),
        ];
        let report = generate(
            &files,
            &GenerationConfig::default(),
            10,
            &Disabled,
            &preloaded_content,
        )
        .unwrap();

        assert_eq!(report.summary.selected_files, 2);
        assert_eq!(report.summary.analyzed_files, 1);
        assert_eq!(report.file_errors.len(), 1);
        assert_eq!(report.file_errors[0].path, "src/broken.js");
    }
}
