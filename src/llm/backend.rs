//! llm/backend.rs
//!
//! The generative-model boundary. The pipeline only sees this trait;
//! whether the other side is a real provider or nothing at all is the
//! caller's business.

use crate::llm::prompt::ModelPrompt;

pub trait ModelBackend {
    /// One blocking call per request. Errors are ordinary data here:
    /// the pipeline recovers from them, it never retries.
    fn run(&self, prompt: &ModelPrompt) -> Result<String, String>;

    /// Short name for logs and report metadata.
    fn name(&self) -> &'static str {
        "model"
    }
}

/// Backend that always fails, forcing the deterministic path.
pub struct Disabled;

impl ModelBackend for Disabled {
    fn run(&self, _prompt: &ModelPrompt) -> Result<String, String> {
        Err("model backend disabled".into())
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
