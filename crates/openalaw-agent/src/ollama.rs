use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

pub const DEFAULT_MODEL: &str = "default";

const PROMPT_PREVIEW_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    pub response: String,
}

/// Local-model bridge. Generation is a placeholder until an inference engine
/// is wired in.
#[derive(Debug, Clone, Default)]
pub struct OllamaBridge;

impl OllamaBridge {
    pub fn new() -> Self {
        Self
    }

    /// Generate a completion for `prompt`; `None` selects [`DEFAULT_MODEL`].
    #[instrument(skip_all, fields(bridge = "ollama"))]
    pub async fn generate(&self, prompt: &str, model: Option<&str>) -> Result<Generation> {
        let model = model.unwrap_or(DEFAULT_MODEL);
        let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
        info!(model, "generating with ollama: {preview}...");
        Ok(Generation {
            response: "Generated response".to_string(),
        })
    }
}
