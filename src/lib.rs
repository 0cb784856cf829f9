//! Repository-aware test case generation.
//!
//! Classifies an arbitrary multi-language file set, infers the
//! project's test conventions, asks a generative model for test case
//! plans, and falls back to deterministic templates whenever the
//! model is unavailable or unreadable.

pub mod config;
pub mod detectors;
pub mod llm;
pub mod pipeline;
pub mod source;
pub mod testgen;
pub mod types;

pub use config::{Complexity, GenerationConfig, TestType};
pub use pipeline::{generate, GenerationReport, PipelineError};
pub use testgen::case::{GeneratedBy, TestCase, TestPriority};
pub use types::{FileCategory, FileRecord, Language, ProjectStructure, TestStrategy};
