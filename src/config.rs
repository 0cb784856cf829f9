//! config.rs
//!
//! Caller-supplied generation options. Missing fields take documented
//! defaults; invalid values are coerced, never rejected.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/* ============================================================
   Test types
   ============================================================ */

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum TestType {
    #[default]
    Unit,
    Integration,
    E2e,
    Performance,
    Security,
    Api,
    Database,
    Visual,
    Accessibility,
}

impl TestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Unit => "unit",
            TestType::Integration => "integration",
            TestType::E2e => "e2e",
            TestType::Performance => "performance",
            TestType::Security => "security",
            TestType::Api => "api",
            TestType::Database => "database",
            TestType::Visual => "visual",
            TestType::Accessibility => "accessibility",
        }
    }

    /// Lenient lookup; returns None for unrecognized names.
    pub fn parse(s: &str) -> Option<TestType> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unit" => Some(TestType::Unit),
            "integration" => Some(TestType::Integration),
            "e2e" | "end-to-end" => Some(TestType::E2e),
            "performance" | "perf" => Some(TestType::Performance),
            "security" => Some(TestType::Security),
            "api" => Some(TestType::Api),
            "database" | "db" => Some(TestType::Database),
            "visual" => Some(TestType::Visual),
            "accessibility" | "a11y" => Some(TestType::Accessibility),
            _ => None,
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TestType {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TestType {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(TestType::parse(&raw).unwrap_or_default())
    }
}

/* ============================================================
   Complexity
   ============================================================ */

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    Complex,
    Adaptive,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
            Complexity::Adaptive => "adaptive",
        }
    }

    pub fn parse(s: &str) -> Option<Complexity> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(Complexity::Simple),
            "medium" => Some(Complexity::Medium),
            "complex" => Some(Complexity::Complex),
            "adaptive" => Some(Complexity::Adaptive),
            _ => None,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Complexity {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Complexity {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(Complexity::parse(&raw).unwrap_or_default())
    }
}

/* ============================================================
   Generation config
   ============================================================ */

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    pub types: Vec<TestType>,
    pub complexity: Complexity,
    /// Explicit framework name, or "auto" for the most idiomatic
    /// choice per language.
    pub framework: String,
    pub include_edge_cases: bool,
    pub include_negative_tests: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            types: vec![TestType::Unit],
            complexity: Complexity::Medium,
            framework: "auto".into(),
            include_edge_cases: true,
            include_negative_tests: true,
        }
    }
}

impl GenerationConfig {
    /// First requested type, used as the default for unlabeled cases.
    pub fn primary_type(&self) -> TestType {
        self.types.first().copied().unwrap_or_default()
    }

    /// Deduplicate requested types, preserving order; an empty list
    /// degrades to unit tests.
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::new();
        self.types.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(*t);
                true
            }
        });
        if self.types.is_empty() {
            self.types.push(TestType::Unit);
        }
        self
    }
}

/// Load options from a TOML file; a missing or unreadable file yields
/// pure defaults rather than an error.
pub fn load_file(path: &Path) -> GenerationConfig {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| toml::from_str(&s).ok())
        .map(GenerationConfig::normalized)
        .unwrap_or_default()
}
