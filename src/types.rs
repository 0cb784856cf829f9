//! types.rs
//!
//! Shared data model for the repository analysis pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/* ---------- languages ---------- */

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Rust,
    Go,
    Java,
    Ruby,
    Php,
    CSharp,
    Cpp,
    Swift,
    Kotlin,
    Html,
    Css,
    Json,
    Yaml,
    Toml,
    Markdown,
    Sql,
    Shell,
    Unknown,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Go => "go",
            Language::Java => "java",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::CSharp => "csharp",
            Language::Cpp => "cpp",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Html => "html",
            Language::Css => "css",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Toml => "toml",
            Language::Markdown => "markdown",
            Language::Sql => "sql",
            Language::Shell => "shell",
            Language::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/* ---------- file classification ---------- */

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Source,
    Test,
    Config,
    Docs,
    Web,
    Unknown,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::Source => "source",
            FileCategory::Test => "test",
            FileCategory::Config => "config",
            FileCategory::Docs => "docs",
            FileCategory::Web => "web",
            FileCategory::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A repository file as seen by the pipeline.
///
/// Listings arrive without content; content is attached once the
/// source collaborator has fetched it. Classification fields start
/// at their unknown defaults and are filled in by the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub size: u64,
    pub language: Language,
    pub category: FileCategory,
    /// 1 = most important, 4 = least.
    pub priority: u8,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, name: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            content: None,
            size,
            language: Language::Unknown,
            category: FileCategory::Unknown,
            priority: 4,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/* ---------- derived structure ---------- */

/// Inferred shape of the repository. Recomputed per request from the
/// current file set, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStructure {
    #[serde(rename = "type")]
    pub project_type: String,
    pub framework: Option<String>,
    pub build_tool: Option<String>,
    pub test_framework: Option<String>,
    pub language: Option<String>,
}

impl ProjectStructure {
    pub fn unknown() -> Self {
        Self {
            project_type: "unknown".into(),
            framework: None,
            build_tool: None,
            test_framework: None,
            language: None,
        }
    }
}

/// Test-authoring convention for a project type. Total: every
/// structure resolves to some strategy, unrecognized types included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStrategy {
    pub test_framework: String,
    pub test_file_pattern: String,
    pub test_directory: String,
    pub mocking_library: String,
}

/* ---------- per-file errors ---------- */

/// A tolerated per-file failure (fetch error, unreadable content).
/// Collected as metadata, never fatal to the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileError {
    pub path: String,
    pub error: String,
}
