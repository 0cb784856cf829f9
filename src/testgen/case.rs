//! testgen/case.rs
//!
//! The pipeline's output unit. Every field has a usable default so a
//! case stays renderable even when the model produced partial data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TestType;

/* ---------- priority ---------- */

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl TestPriority {
    pub fn parse(s: &str) -> Option<TestPriority> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(TestPriority::Low),
            "medium" => Some(TestPriority::Medium),
            "high" => Some(TestPriority::High),
            "critical" => Some(TestPriority::Critical),
            _ => None,
        }
    }
}

/* ---------- provenance ---------- */

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum GeneratedBy {
    #[serde(rename = "model")]
    Model,
    #[serde(rename = "fallback-function-based")]
    FallbackFunctionBased,
    #[serde(rename = "fallback-generic")]
    FallbackGeneric,
}

/* ---------- test case ---------- */

/// Created once per generation request, never mutated, not persisted
/// by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub test_type: TestType,
    pub priority: TestPriority,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teardown: Option<String>,
    pub dependencies: Vec<String>,
    pub tags: Vec<String>,
    pub generated_by: GeneratedBy,
    pub created_at: DateTime<Utc>,
}

impl TestCase {
    /// Fresh bookkeeping fields; everything else starts at its default.
    pub fn stamped(generated_by: GeneratedBy) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            description: String::new(),
            test_type: TestType::Unit,
            priority: TestPriority::Medium,
            file: String::new(),
            function: None,
            code: String::new(),
            setup: None,
            teardown: None,
            dependencies: Vec::new(),
            tags: Vec::new(),
            generated_by,
            created_at: Utc::now(),
        }
    }
}
