//! detectors/strategy.rs
//!
//! Maps a detected project type to its idiomatic test-authoring
//! convention. Total: unrecognized types get the generic entry.

use crate::types::{ProjectStructure, TestStrategy};

/* ============================================================
   Convention table
   ============================================================ */

fn strategy_for_type(project_type: &str) -> TestStrategy {
    let (framework, pattern, dir, mocks) = match project_type {
        "node" => ("jest", "{name}.test.{ext}", "__tests__", "jest"),
        "python" => ("pytest", "test_{name}.py", "tests", "unittest.mock"),
        "rust" => ("cargo-test", "{name}.rs", "tests", "mockall"),
        "go" => ("go-test", "{name}_test.go", ".", "gomock"),
        "java" => ("junit", "{name}Test.java", "src/test/java", "mockito"),
        "php" => ("phpunit", "{name}Test.php", "tests", "mockery"),
        "ruby" => ("rspec", "{name}_spec.rb", "spec", "rspec-mocks"),
        "dotnet" => ("xunit", "{name}Tests.cs", "tests", "moq"),
        "cpp" => ("gtest", "{name}_test.cpp", "test", "gmock"),
        _ => ("generic", "{name}.test", "tests", "none"),
    };

    TestStrategy {
        test_framework: framework.into(),
        test_file_pattern: pattern.into(),
        test_directory: dir.into(),
        mocking_library: mocks.into(),
    }
}

/* ============================================================
   Public API
   ============================================================ */

pub fn resolve(structure: &ProjectStructure) -> TestStrategy {
    let mut strategy = strategy_for_type(&structure.project_type);

    // A framework actually observed in the repo outranks the table
    // default, but naming/directory/mocking conventions stay put.
    if let Some(fw) = &structure.test_framework {
        strategy.test_framework = fw.clone();
    }

    strategy
}
