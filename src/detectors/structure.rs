//! detectors/structure.rs
//!
//! Project structure inference over the full classified file set.
//! Marker files decide the project type; language extension counts
//! are only a fallback.

use crate::types::{FileCategory, FileRecord, Language, ProjectStructure};

/* ============================================================
   Marker rules
   ============================================================ */

struct TypeRule {
    markers: &'static [&'static str],
    project_type: &'static str,
}

// Ordered: the first matching rule wins, so a mixed repo never
// reports two contradictory types.
const TYPE_RULES: &[TypeRule] = &[
    TypeRule { markers: &["Cargo.toml"], project_type: "rust" },
    TypeRule { markers: &["go.mod"], project_type: "go" },
    TypeRule { markers: &["pyproject.toml", "setup.py", "requirements.txt"], project_type: "python" },
    TypeRule { markers: &["package.json"], project_type: "node" },
    TypeRule { markers: &["pom.xml", "build.gradle", "build.gradle.kts"], project_type: "java" },
    TypeRule { markers: &["composer.json"], project_type: "php" },
    TypeRule { markers: &["Gemfile"], project_type: "ruby" },
    TypeRule { markers: &["CMakeLists.txt"], project_type: "cpp" },
];

const FRAMEWORK_MARKERS: &[(&str, &str)] = &[
    ("next.config", "next"),
    ("nuxt.config", "nuxt"),
    ("angular.json", "angular"),
    ("svelte.config", "svelte"),
    ("vue.config", "vue"),
    ("remix.config", "remix"),
    ("manage.py", "django"),
    ("artisan", "laravel"),
];

const BUILD_TOOL_MARKERS: &[(&str, &str)] = &[
    ("Cargo.toml", "cargo"),
    ("go.mod", "go"),
    ("pom.xml", "maven"),
    ("build.gradle", "gradle"),
    ("webpack.config", "webpack"),
    ("vite.config", "vite"),
    ("rollup.config", "rollup"),
    ("CMakeLists.txt", "cmake"),
    ("Makefile", "make"),
    ("package.json", "npm"),
];

const TEST_FRAMEWORK_MARKERS: &[(&str, &str)] = &[
    ("jest.config", "jest"),
    ("vitest.config", "vitest"),
    ("karma.conf", "karma"),
    ("cypress.config", "cypress"),
    ("playwright.config", "playwright"),
    ("pytest.ini", "pytest"),
    ("conftest.py", "pytest"),
    ("phpunit.xml", "phpunit"),
    (".rspec", "rspec"),
    ("Cargo.toml", "cargo-test"),
    ("go.mod", "go-test"),
    ("pom.xml", "junit"),
    ("build.gradle", "junit"),
];

/* ============================================================
   Public API
   ============================================================ */

pub fn detect(files: &[FileRecord]) -> ProjectStructure {
    let language = dominant_language(files);

    let project_type = TYPE_RULES
        .iter()
        .find(|rule| rule.markers.iter().any(|m| has_marker(files, m)))
        .map(|rule| rule.project_type.to_string())
        .or_else(|| language.map(type_from_language))
        .unwrap_or_else(|| "unknown".into());

    ProjectStructure {
        project_type,
        framework: first_marker_hit(files, FRAMEWORK_MARKERS),
        build_tool: first_marker_hit(files, BUILD_TOOL_MARKERS),
        test_framework: first_marker_hit(files, TEST_FRAMEWORK_MARKERS),
        language: language.map(|l| l.to_string()),
    }
}

/* ============================================================
   Helpers
   ============================================================ */

fn has_marker(files: &[FileRecord], marker: &str) -> bool {
    files
        .iter()
        .any(|f| f.name == marker || f.name.starts_with(&format!("{marker}.")))
}

fn first_marker_hit(files: &[FileRecord], table: &[(&str, &str)]) -> Option<String> {
    table
        .iter()
        .find(|(marker, _)| has_marker(files, marker))
        .map(|(_, value)| value.to_string())
}

/// Most common source language in the set, ties broken by first seen.
fn dominant_language(files: &[FileRecord]) -> Option<Language> {
    let mut counts: Vec<(Language, usize)> = Vec::new();

    for f in files {
        if f.category != FileCategory::Source {
            continue;
        }
        match counts.iter_mut().find(|(l, _)| *l == f.language) {
            Some((_, n)) => *n += 1,
            None => counts.push((f.language, 1)),
        }
    }

    counts
        .into_iter()
        .max_by_key(|(_, n)| *n)
        .map(|(lang, _)| lang)
}

fn type_from_language(lang: Language) -> String {
    match lang {
        Language::JavaScript | Language::TypeScript => "node".into(),
        Language::Python => "python".into(),
        Language::Rust => "rust".into(),
        Language::Go => "go".into(),
        Language::Java => "java".into(),
        Language::Ruby => "ruby".into(),
        Language::Php => "php".into(),
        Language::CSharp => "dotnet".into(),
        Language::Cpp => "cpp".into(),
        _ => "unknown".into(),
    }
}
