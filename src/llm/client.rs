// src/llm/client.rs

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::llm::backend::ModelBackend;
use crate::llm::prompt::ModelPrompt;

const PROMPT_ABI_VERSION: &str = "v1-testloom-repo-analysis";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    Anthropic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
}

/// Blocking HTTP client for hosted model providers.
pub struct HttpModelClient {
    cfg: ProviderConfig,
}

impl HttpModelClient {
    /// Load provider settings from disk, falling back to defaults
    /// (which will fail at request time without an API key).
    pub fn from_disk() -> Self {
        Self {
            cfg: load_config().unwrap_or_else(default_config),
        }
    }

    pub fn with_config(cfg: ProviderConfig) -> Self {
        Self { cfg }
    }

    pub fn save(&self) -> std::io::Result<()> {
        save_config(&self.cfg)
    }
}

impl ModelBackend for HttpModelClient {
    fn run(&self, prompt: &ModelPrompt) -> Result<String, String> {
        if self.cfg.api_key.trim().is_empty() {
            return Err("no API key configured".into());
        }

        let prompt_hash = hash_prompt(prompt);
        let (url, headers, body) = build_request(&self.cfg, prompt, &prompt_hash);

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| e.to_string())?;

        let mut req = client.post(url).json(&body);
        for (k, v) in headers {
            req = req.header(k, v);
        }

        let resp = req.send().map_err(|e| e.to_string())?;
        let status = resp.status();
        let json: Value = resp.json().map_err(|e| e.to_string())?;

        if !status.is_success() {
            return Err(format!("model provider error {}: {}", status, json));
        }

        extract_text(&self.cfg.provider, &json)
    }

    fn name(&self) -> &'static str {
        match self.cfg.provider {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
        }
    }
}

fn hash_prompt(prompt: &ModelPrompt) -> String {
    let mut h = Sha256::new();
    h.update(PROMPT_ABI_VERSION.as_bytes());
    h.update(prompt.system.as_bytes());
    h.update(prompt.user.as_bytes());
    hex::encode(h.finalize())
}

fn build_request(
    cfg: &ProviderConfig,
    prompt: &ModelPrompt,
    prompt_hash: &str,
) -> (String, Vec<(&'static str, String)>, Value) {
    match cfg.provider {
        Provider::OpenAI => {
            let url = cfg
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1/responses".into());

            let body = serde_json::json!({
                "model": cfg.model,
                "instructions": prompt.system,
                "input": prompt.user,
                "prompt_cache_key": prompt_hash,
            });

            (
                url,
                vec![("Authorization", format!("Bearer {}", cfg.api_key))],
                body,
            )
        }

        Provider::Anthropic => {
            let url = cfg
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.anthropic.com/v1/messages".into());

            let body = serde_json::json!({
                "model": cfg.model,
                "max_tokens": 4096,
                "system": prompt.system,
                "messages": [
                    { "role": "user", "content": prompt.user }
                ]
            });

            (
                url,
                vec![
                    ("x-api-key", cfg.api_key.clone()),
                    ("anthropic-version", "2023-06-01".into()),
                ],
                body,
            )
        }
    }
}

fn extract_text(provider: &Provider, v: &Value) -> Result<String, String> {
    match provider {
        Provider::OpenAI => v
            .get("output")
            .and_then(|o| o.as_array())
            .and_then(|arr| {
                arr.iter().find_map(|item| {
                    item.get("content")?
                        .as_array()?
                        .iter()
                        .find_map(|c| c.get("text")?.as_str())
                })
            })
            .map(str::to_owned)
            .ok_or_else(|| "OpenAI response parse failure".into()),

        Provider::Anthropic => v
            .pointer("/content/0/text")
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .ok_or_else(|| "Anthropic response parse failure".into()),
    }
}

fn default_config() -> ProviderConfig {
    ProviderConfig {
        provider: Provider::OpenAI,
        model: "gpt-5.2".to_string(),
        api_key: String::new(),
        base_url: None,
    }
}

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("testloom/model.json")
}

fn load_config() -> Option<ProviderConfig> {
    fs::read_to_string(config_path())
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
}

fn save_config(cfg: &ProviderConfig) -> std::io::Result<()> {
    let path = config_path();
    if let Some(p) = path.parent() {
        fs::create_dir_all(p)?;
    }
    let rendered = serde_json::to_string_pretty(cfg)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(path, rendered)
}
