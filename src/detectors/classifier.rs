//! detectors/classifier.rs
//!
//! Per-file classification from name and path alone. Never errors:
//! anything it cannot place is excluded, not rejected.

use glob::Pattern;
use lazy_static::lazy_static;

use crate::types::{FileCategory, Language};

/* ============================================================
   Result shape
   ============================================================ */

#[derive(Debug, Clone)]
pub struct Classification {
    pub should_analyze: bool,
    pub language: Language,
    pub category: FileCategory,
    pub priority: u8,
    pub reason: &'static str,
}

impl Classification {
    fn skip(reason: &'static str) -> Self {
        Self {
            should_analyze: false,
            language: Language::Unknown,
            category: FileCategory::Unknown,
            priority: 4,
            reason,
        }
    }
}

/* ============================================================
   Static tables
   ============================================================ */

// Matched as plain substrings of the full path.
const IGNORE_SUBSTRINGS: &[&str] = &[
    "node_modules",
    ".git/",
    "__pycache__",
    ".venv/",
    "target/",
    "dist/",
    "build/",
    "vendor/",
    "coverage/",
    ".idea/",
    ".vscode/",
    ".cache/",
    ".DS_Store",
    "Thumbs.db",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.lock",
    "poetry.lock",
    "Pipfile.lock",
    "composer.lock",
    "Gemfile.lock",
    "go.sum",
];

// `*` means "match anything"; no further glob semantics intended.
const IGNORE_WILDCARDS: &[&str] = &[
    "*.min.js",
    "*.min.css",
    "*.map",
    "*.log",
    "*.tmp",
    "*.pyc",
    "*.class",
    "*.o",
    "*.so",
    "*.dylib",
    "*.dll",
    "*.exe",
    "*.png",
    "*.jpg",
    "*.jpeg",
    "*.gif",
    "*.ico",
    "*.svg",
    "*.woff",
    "*.woff2",
    "*.ttf",
    "*.pdf",
    "*.zip",
    "*.tar.gz",
];

// Manifest and build files carry structure-detection signal far out of
// proportion to their size; force-include regardless of extension.
const IMPORTANT_CONFIG: &[&str] = &[
    "package.json",
    "Cargo.toml",
    "pyproject.toml",
    "setup.py",
    "requirements.txt",
    "go.mod",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "composer.json",
    "Gemfile",
    "CMakeLists.txt",
    "Makefile",
    "tsconfig.json",
    "Dockerfile",
    "docker-compose.yml",
];

lazy_static! {
    static ref IGNORE_PATTERNS: Vec<Pattern> = IGNORE_WILDCARDS
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();
}

/* ============================================================
   Public API
   ============================================================ */

pub fn classify(path: &str, name: &str) -> Classification {
    if path.is_empty() || name.is_empty() {
        return Classification::skip("missing path or name");
    }

    if is_ignored(path, name) {
        return Classification::skip("matches ignore rule");
    }

    if IMPORTANT_CONFIG.contains(&name) {
        return Classification {
            should_analyze: true,
            language: config_language(name),
            category: FileCategory::Config,
            priority: 2,
            reason: "important config file",
        };
    }

    // Compound test suffixes first: `x.test.ts` must not read as `.ts`.
    if let Some(lang) = test_suffix_language(name) {
        return Classification {
            should_analyze: true,
            language: lang,
            category: FileCategory::Test,
            priority: 3,
            reason: "test file",
        };
    }

    match extension_of(name).and_then(lookup_extension) {
        Some((language, category, priority)) => Classification {
            should_analyze: true,
            language,
            category,
            priority,
            reason: "classified by extension",
        },
        None => Classification::skip("unknown extension"),
    }
}

/* ============================================================
   Ignore rules
   ============================================================ */

fn is_ignored(path: &str, name: &str) -> bool {
    if IGNORE_SUBSTRINGS.iter().any(|s| path.contains(s)) {
        return true;
    }

    IGNORE_PATTERNS.iter().any(|p| p.matches(name))
}

/* ============================================================
   Extension table
   ============================================================ */

fn extension_of(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Two-segment suffix detection for `.test.<ext>` / `.spec.<ext>`
/// naming, plus the Go and Python equivalents.
fn test_suffix_language(name: &str) -> Option<Language> {
    let stripped = name
        .strip_suffix(".js")
        .or_else(|| name.strip_suffix(".jsx"))
        .map(|rest| (rest, Language::JavaScript))
        .or_else(|| {
            name.strip_suffix(".ts")
                .or_else(|| name.strip_suffix(".tsx"))
                .map(|rest| (rest, Language::TypeScript))
        });

    if let Some((rest, lang)) = stripped {
        if rest.ends_with(".test") || rest.ends_with(".spec") {
            return Some(lang);
        }
    }

    if name.ends_with("_test.go") {
        return Some(Language::Go);
    }

    if name.ends_with(".py") && (name.starts_with("test_") || name.ends_with("_test.py")) {
        return Some(Language::Python);
    }

    None
}

fn lookup_extension(ext: &str) -> Option<(Language, FileCategory, u8)> {
    let entry = match ext {
        "js" | "jsx" | "mjs" | "cjs" => (Language::JavaScript, FileCategory::Source, 1),
        "ts" | "tsx" => (Language::TypeScript, FileCategory::Source, 1),
        "py" => (Language::Python, FileCategory::Source, 1),
        "rs" => (Language::Rust, FileCategory::Source, 1),
        "go" => (Language::Go, FileCategory::Source, 1),
        "java" => (Language::Java, FileCategory::Source, 1),
        "rb" => (Language::Ruby, FileCategory::Source, 1),
        "php" => (Language::Php, FileCategory::Source, 1),
        "cs" => (Language::CSharp, FileCategory::Source, 1),
        "cpp" | "cc" | "cxx" | "c" | "h" | "hpp" => (Language::Cpp, FileCategory::Source, 1),
        "swift" => (Language::Swift, FileCategory::Source, 1),
        "kt" | "kts" => (Language::Kotlin, FileCategory::Source, 1),
        "sql" => (Language::Sql, FileCategory::Source, 2),
        "sh" | "bash" => (Language::Shell, FileCategory::Source, 2),
        "html" | "htm" => (Language::Html, FileCategory::Web, 3),
        "css" | "scss" | "less" => (Language::Css, FileCategory::Web, 3),
        "vue" | "svelte" => (Language::JavaScript, FileCategory::Web, 2),
        "json" => (Language::Json, FileCategory::Config, 3),
        "yml" | "yaml" => (Language::Yaml, FileCategory::Config, 3),
        "toml" | "ini" | "env" => (Language::Toml, FileCategory::Config, 3),
        "md" | "rst" | "txt" => (Language::Markdown, FileCategory::Docs, 4),
        _ => return None,
    };
    Some(entry)
}

fn config_language(name: &str) -> Language {
    match extension_of(name) {
        Some("json") => Language::Json,
        Some("toml") => Language::Toml,
        Some("yml") | Some("yaml") => Language::Yaml,
        Some("py") => Language::Python,
        Some("gradle") | Some("kts") => Language::Kotlin,
        Some("xml") => Language::Unknown,
        _ => Language::Unknown,
    }
}
